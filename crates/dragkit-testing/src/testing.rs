use dragkit_core::{Runtime, RuntimeHandle, FRAME_INTERVAL_NANOS};
use dragkit_foundation::{
    BeginInfo, DndCallbacks, DndConfig, DndHandle, DndProvider, DragEndInfo, DraggableOptions,
    DraggableState, DroppableOptions, FinalizeInfo, GestureEvent, GestureInput, GestureState,
    HapticFeedback, Haptics, ItemId, PointerEvent, UpdateInfo,
};
use dragkit_geometry::{Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Upper bound of frames [`DndTestRule::run_until_idle`] advances before
/// giving up.
const MAX_IDLE_FRAMES: usize = 2_000;

/// Consumer callback observed by a [`DndTestRule`].
#[derive(Clone, Debug, PartialEq)]
pub enum DndEvent {
    Begin { event: GestureEvent, info: BeginInfo },
    Update { event: GestureEvent, info: UpdateInfo },
    Finalize { event: GestureEvent, info: FinalizeInfo },
    DragEnd(DragEndInfo),
}

/// Haptics sink that remembers every trigger.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    triggered: RefCell<Vec<HapticFeedback>>,
}

impl RecordingHaptics {
    pub fn triggered(&self) -> Vec<HapticFeedback> {
        self.triggered.borrow().clone()
    }
}

impl Haptics for RecordingHaptics {
    fn trigger(&self, feedback: HapticFeedback) {
        self.triggered.borrow_mut().push(feedback);
    }
}

/// Headless harness for drag-and-drop tests.
///
/// `DndTestRule` owns a runtime whose clock only moves when the test
/// advances it, a provider wired to recording callbacks and haptics, and
/// shorthand for feeding gestures. Time starts at zero.
pub struct DndTestRule {
    runtime: Runtime,
    provider: DndProvider,
    events: Rc<RefCell<Vec<DndEvent>>>,
    haptics: Rc<RecordingHaptics>,
}

impl DndTestRule {
    pub fn new() -> Self {
        Self::with_config(DndConfig::default())
    }

    pub fn with_config(config: DndConfig) -> Self {
        let runtime = Runtime::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let haptics = Rc::new(RecordingHaptics::default());

        let callbacks = {
            let begin = Rc::clone(&events);
            let update = Rc::clone(&events);
            let finalize = Rc::clone(&events);
            let drag_end = Rc::clone(&events);
            DndCallbacks::new()
                .on_begin(move |event, info| {
                    begin.borrow_mut().push(DndEvent::Begin {
                        event: *event,
                        info: info.clone(),
                    })
                })
                .on_update(move |event, info| {
                    update.borrow_mut().push(DndEvent::Update {
                        event: *event,
                        info: info.clone(),
                    })
                })
                .on_finalize(move |event, info| {
                    finalize.borrow_mut().push(DndEvent::Finalize {
                        event: *event,
                        info: info.clone(),
                    })
                })
                .on_drag_end(move |info| drag_end.borrow_mut().push(DndEvent::DragEnd(info.clone())))
        };

        let provider = DndProvider::with_config(runtime.handle(), config).with_callbacks(callbacks);
        let sink: Rc<dyn Haptics> = haptics.clone();
        provider.set_haptics(Some(sink));

        Self {
            runtime,
            provider,
            events,
            haptics,
        }
    }

    pub fn provider(&self) -> &DndProvider {
        &self.provider
    }

    pub fn handle(&self) -> DndHandle {
        self.provider.handle()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now_nanos(&self) -> u64 {
        self.runtime.now_nanos()
    }

    // Registration

    /// Registers a draggable and measures it at `layout`.
    pub fn add_draggable(&self, options: DraggableOptions, layout: Rect) -> ItemId {
        let id = options.id.clone();
        self.provider
            .register_draggable(options)
            .unwrap_or_else(|err| panic!("register draggable {id}: {err}"));
        self.provider
            .set_draggable_layout(id.clone(), layout)
            .unwrap_or_else(|err| panic!("measure draggable {id}: {err}"));
        id
    }

    pub fn add_droppable(&self, options: DroppableOptions, layout: Rect) -> ItemId {
        let id = options.id.clone();
        self.provider
            .register_droppable(options)
            .unwrap_or_else(|err| panic!("register droppable {id}: {err}"));
        self.provider
            .set_droppable_layout(id.clone(), layout)
            .unwrap_or_else(|err| panic!("measure droppable {id}: {err}"));
        id
    }

    // Gestures

    pub fn begin(&self, x: f32, y: f32) {
        self.provider.on_begin(&GestureEvent::begin(x, y));
    }

    pub fn drag_by(&self, translation_x: f32, translation_y: f32) {
        self.provider
            .on_update(&GestureEvent::update(translation_x, translation_y));
    }

    pub fn finalize(&self, state: GestureState, velocity_x: f32, velocity_y: f32) {
        self.provider
            .on_finalize(&GestureEvent::finalize(state, velocity_x, velocity_y));
    }

    /// Ends the gesture successfully with no release velocity.
    pub fn release(&self) {
        self.finalize(GestureState::Ended, 0.0, 0.0);
    }

    pub fn pointer(&self, event: PointerEvent) -> Option<GestureInput> {
        self.provider.on_pointer_event(&event)
    }

    // Time

    pub fn advance_frame(&self) {
        self.runtime
            .advance_frame(self.runtime.now_nanos() + FRAME_INTERVAL_NANOS);
    }

    pub fn advance_frames(&self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Moves the clock forward by `duration` in frame-sized steps.
    pub fn advance_time(&self, duration: Duration) {
        let target = self
            .runtime
            .now_nanos()
            .saturating_add(duration.as_nanos() as u64);
        while self.runtime.now_nanos() < target {
            let next = (self.runtime.now_nanos() + FRAME_INTERVAL_NANOS).min(target);
            self.runtime.advance_frame(next);
        }
    }

    /// Advances frames until no animation or timer is queued.
    ///
    /// Panics if work is still queued after a generous number of frames.
    pub fn run_until_idle(&self) {
        for _ in 0..MAX_IDLE_FRAMES {
            if self.runtime.handle().is_idle() {
                return;
            }
            self.advance_frame();
        }
        panic!("run_until_idle: still busy after {MAX_IDLE_FRAMES} frames");
    }

    // Observations

    pub fn events(&self) -> Vec<DndEvent> {
        self.events.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    pub fn begins(&self) -> Vec<BeginInfo> {
        self.collect(|event| match event {
            DndEvent::Begin { info, .. } => Some(info.clone()),
            _ => None,
        })
    }

    pub fn updates(&self) -> Vec<UpdateInfo> {
        self.collect(|event| match event {
            DndEvent::Update { info, .. } => Some(info.clone()),
            _ => None,
        })
    }

    pub fn finalizes(&self) -> Vec<FinalizeInfo> {
        self.collect(|event| match event {
            DndEvent::Finalize { info, .. } => Some(info.clone()),
            _ => None,
        })
    }

    pub fn drag_ends(&self) -> Vec<DragEndInfo> {
        self.collect(|event| match event {
            DndEvent::DragEnd(info) => Some(info.clone()),
            _ => None,
        })
    }

    pub fn haptic_triggers(&self) -> Vec<HapticFeedback> {
        self.haptics.triggered()
    }

    pub fn state(&self, id: impl Into<ItemId>) -> Option<DraggableState> {
        self.handle().draggable_state(&id.into())
    }

    /// Live offset of a draggable; zero for unknown ids.
    pub fn offset(&self, id: impl Into<ItemId>) -> Point {
        self.handle()
            .draggable_offset(&id.into())
            .unwrap_or(Point::ZERO)
    }

    pub fn resting_offset(&self, id: impl Into<ItemId>) -> Point {
        self.handle()
            .resting_offset(&id.into())
            .unwrap_or(Point::ZERO)
    }

    fn collect<T>(&self, pick: impl Fn(&DndEvent) -> Option<T>) -> Vec<T> {
        self.events.borrow().iter().filter_map(pick).collect()
    }
}

impl Default for DndTestRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
