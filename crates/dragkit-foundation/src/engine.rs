//! Drag gesture engine.
//!
//! Turns begin/update/finalize gesture callbacks into draggable state
//! transitions:
//!
//! ```text
//! Resting -> Pending -> Dragging -> Acting -> Resting
//! ```
//!
//! `Pending` is skipped when no activation delay applies. Release springs the
//! item back to its resting offset; each return animation carries a
//! generation number so a settle arriving after the item was grabbed again is
//! ignored.
//!
//! No `RefCell` borrow is held while consumer callbacks, haptics or
//! animations run.

use crate::callbacks::{BeginInfo, DndCallbacks, DragEndInfo, FinalizeInfo, UpdateInfo};
use crate::config::{DndConfig, Haptics};
use crate::gesture::{GestureEvent, GestureInput, GestureState};
use crate::registry::DndStore;
use crate::{DraggableState, ItemId};
use dragkit_animation::animate_spring_pair;
use dragkit_core::{RuntimeHandle, ScheduledTask};
use dragkit_geometry::{apply_offset, get_distance, Point, Rect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

macro_rules! trace_dnd {
    ($shared:expr, $($arg:tt)+) => {
        if $shared.config.get().debug {
            log::debug!(target: "dragkit::engine", $($arg)+);
        }
    };
}

/// Which item the current gesture is acting on.
#[derive(Debug, Default)]
pub(crate) struct InteractionCursor {
    pub(crate) active_id: Option<ItemId>,
    pub(crate) pending_id: Option<ItemId>,
    pub(crate) pending_activation: Option<ScheduledTask>,
    pub(crate) droppable_active_id: Option<ItemId>,
    /// Live offset captured when the gesture began.
    pub(crate) initial_offset: Point,
    pub(crate) active_layout: Option<Rect>,
    /// Scroll position of the container hosting the items.
    pub(crate) content_offset: Point,
    /// Last gesture state seen. Reported through the handle; settles are
    /// validated by generation instead.
    pub(crate) gesture_state: GestureState,
}

/// State shared by the provider, its inspection handles and the deferred
/// activation and settle closures.
pub(crate) struct DndShared {
    pub(crate) store: RefCell<DndStore>,
    pub(crate) cursor: RefCell<InteractionCursor>,
    pub(crate) config: Cell<DndConfig>,
    pub(crate) callbacks: RefCell<DndCallbacks>,
    pub(crate) haptics: RefCell<Option<Rc<dyn Haptics>>>,
    pub(crate) runtime: RuntimeHandle,
}

impl DndShared {
    pub(crate) fn new(runtime: RuntimeHandle, config: DndConfig) -> Self {
        Self {
            store: RefCell::new(DndStore::new()),
            cursor: RefCell::new(InteractionCursor::default()),
            config: Cell::new(config.sanitized()),
            callbacks: RefCell::new(DndCallbacks::default()),
            haptics: RefCell::new(None),
            runtime,
        }
    }

    pub(crate) fn dispatch(self: &Rc<Self>, input: &GestureInput) {
        match input {
            GestureInput::Begin(event) => self.on_begin(event),
            GestureInput::Update(event) => self.on_update(event),
            GestureInput::Finalize(event) => self.on_finalize(event),
        }
    }

    pub(crate) fn on_begin(self: &Rc<Self>, event: &GestureEvent) {
        self.record_gesture_state(event.state);
        let config = self.config.get();
        if config.disabled {
            trace_dnd!(self, "begin ignored: provider disabled");
            return;
        }
        self.abandon_interaction();

        let content_offset = self.cursor.borrow().content_offset;
        let hit = self
            .store
            .borrow()
            .find_draggable_at(event.position() + content_offset);
        let Some(id) = hit else {
            trace_dnd!(self, "begin at ({}, {}) hit no draggable", event.x, event.y);
            return;
        };

        let grabbed = {
            let mut store = self.store.borrow_mut();
            let prior = store.draggable_state(&id).unwrap_or_default();
            let item_delay = store
                .draggable_options(&id)
                .and_then(|options| options.activation_delay);
            let layout = store.draggable_layout(&id);
            store.draggable_offsets_mut(&id).map(|offsets| {
                let live = offsets.live.get();
                if prior.is_in_motion() {
                    offsets.generation += 1;
                } else {
                    offsets.resting = live;
                }
                (prior, item_delay, layout, offsets.live.clone(), live)
            })
        };
        let Some((prior, item_delay, layout, live_offset, initial_offset)) = grabbed else {
            log::warn!("draggable {id} has no offsets; ignoring begin");
            return;
        };
        if prior.is_in_motion() {
            // Stale generation makes the cancelled settle a no-op.
            live_offset.cancel_animation();
            trace_dnd!(self, "{id} grabbed while {prior:?}, animation interrupted");
        }

        let active_layout = layout
            .map(|layout| apply_offset(&layout, initial_offset))
            .unwrap_or_default();
        self.cursor.borrow_mut().initial_offset = initial_offset;

        let delay = item_delay.unwrap_or(config.activation_delay);
        if delay.is_zero() {
            self.activate(&id);
        } else {
            self.set_state(&id, DraggableState::Pending);
            let weak = Rc::downgrade(self);
            let pending = id.clone();
            let task = self.runtime.schedule_after(delay, move || {
                if let Some(shared) = weak.upgrade() {
                    shared.activate_pending(&pending);
                }
            });
            let mut cursor = self.cursor.borrow_mut();
            cursor.pending_id = Some(id.clone());
            cursor.pending_activation = Some(task);
            trace_dnd!(self, "{id} pending for {delay:?}");
        }

        let callback = self.callbacks.borrow().on_begin.clone();
        if let Some(callback) = callback {
            callback(
                event,
                &BeginInfo {
                    active_id: id,
                    active_layout,
                },
            );
        }
    }

    pub(crate) fn on_update(self: &Rc<Self>, event: &GestureEvent) {
        self.record_gesture_state(event.state);
        let (active, pending) = {
            let cursor = self.cursor.borrow();
            (cursor.active_id.clone(), cursor.pending_id.clone())
        };

        if let Some(id) = active {
            self.drag_to(&id, event);
            return;
        }
        let Some(id) = pending else {
            return;
        };
        let tolerance = self
            .store
            .borrow()
            .draggable_options(&id)
            .map(|options| options.activation_tolerance);
        match tolerance {
            None => {
                log::warn!("pending draggable {id} is no longer registered");
                self.abort_pending();
            }
            Some(tolerance) => {
                let distance = get_distance(event.translation_x, event.translation_y);
                if distance > tolerance {
                    trace_dnd!(
                        self,
                        "{id} moved {distance} before activation (tolerance {tolerance})"
                    );
                    self.abort_pending();
                }
            }
        }
    }

    pub(crate) fn on_finalize(self: &Rc<Self>, event: &GestureEvent) {
        self.record_gesture_state(event.state);
        let active = {
            let mut cursor = self.cursor.borrow_mut();
            cursor.active_layout = None;
            cursor.active_id.take()
        };
        let Some(id) = active else {
            self.abort_pending();
            return;
        };

        let snapshot = {
            let store = self.store.borrow();
            store
                .active_layout(&id)
                .zip(store.draggable_options(&id).cloned())
        };
        let Some((active_layout, options)) = snapshot else {
            log::warn!("released draggable {id} is no longer registered");
            self.cursor.borrow_mut().droppable_active_id = None;
            return;
        };
        trace_dnd!(self, "{id} released with {:?}", event.state);

        let callback = self.callbacks.borrow().on_finalize.clone();
        if let Some(callback) = callback {
            callback(
                event,
                &FinalizeInfo {
                    active_id: id.clone(),
                    active_layout,
                },
            );
        }

        if event.state != GestureState::Failed {
            let over_id = self.cursor.borrow().droppable_active_id.clone();
            let over = over_id.and_then(|over_id| {
                self.store
                    .borrow()
                    .droppable_options(&over_id)
                    .cloned()
            });
            let callback = self.callbacks.borrow().on_drag_end.clone();
            if let Some(callback) = callback {
                callback(&DragEndInfo {
                    active: options,
                    over,
                });
            }
        }

        self.cursor.borrow_mut().droppable_active_id = None;
        self.release_to_rest(&id, event.velocity());
    }

    /// Drops whatever the cursor references for an item that was just
    /// unregistered.
    pub(crate) fn forget_item(&self, id: &ItemId) {
        let task = {
            let mut cursor = self.cursor.borrow_mut();
            if cursor.active_id.as_ref() == Some(id) {
                log::warn!("active draggable {id} unregistered mid-drag");
                cursor.active_id = None;
                cursor.active_layout = None;
                cursor.droppable_active_id = None;
            }
            if cursor.droppable_active_id.as_ref() == Some(id) {
                cursor.droppable_active_id = None;
            }
            if cursor.pending_id.as_ref() == Some(id) {
                cursor.pending_id = None;
                cursor.pending_activation.take()
            } else {
                None
            }
        };
        if let Some(task) = task {
            task.cancel();
        }
    }

    fn drag_to(&self, id: &ItemId, event: &GestureEvent) {
        let initial_offset = self.cursor.borrow().initial_offset;
        let offset = initial_offset + event.translation();

        let lookup = {
            let store = self.store.borrow();
            store
                .draggable_offsets(id)
                .map(|offsets| offsets.live.clone())
                .zip(store.draggable_layout(id))
        };
        let Some((live, layout)) = lookup else {
            log::warn!("dragged item {id} is no longer registered; dropping drag");
            let mut cursor = self.cursor.borrow_mut();
            cursor.active_id = None;
            cursor.active_layout = None;
            cursor.droppable_active_id = None;
            return;
        };
        live.set(offset);

        let active_layout = apply_offset(&layout, offset);
        let over = self.store.borrow().find_droppable_overlapping(&active_layout);
        {
            let mut cursor = self.cursor.borrow_mut();
            if cursor.droppable_active_id != over {
                trace_dnd!(self, "{id} over {over:?}");
            }
            cursor.active_layout = Some(active_layout);
            cursor.droppable_active_id = over.clone();
        }

        let callback = self.callbacks.borrow().on_update.clone();
        if let Some(callback) = callback {
            callback(
                event,
                &UpdateInfo {
                    active_id: id.clone(),
                    active_layout,
                    droppable_active_id: over,
                },
            );
        }
    }

    /// Makes `id` the active item. Returns false when it has no layout.
    fn activate(&self, id: &ItemId) -> bool {
        let Some(active_layout) = self.store.borrow().active_layout(id) else {
            log::warn!("cannot activate draggable {id}: not measured");
            return false;
        };
        self.set_state(id, DraggableState::Dragging);

        let (newly_active, finished_task) = {
            let mut cursor = self.cursor.borrow_mut();
            let newly_active = cursor.active_id.is_none();
            cursor.active_id = Some(id.clone());
            cursor.active_layout = Some(active_layout);
            cursor.pending_id = None;
            (newly_active, cursor.pending_activation.take())
        };
        drop(finished_task);
        trace_dnd!(self, "{id} dragging");

        if newly_active {
            self.trigger_haptics();
        }
        true
    }

    fn activate_pending(&self, id: &ItemId) {
        let still_pending = self.cursor.borrow().pending_id.as_ref() == Some(id);
        if !still_pending {
            return;
        }
        if !self.store.borrow().contains_draggable(id) {
            log::warn!("pending draggable {id} vanished before activation");
            let mut cursor = self.cursor.borrow_mut();
            cursor.pending_id = None;
            cursor.pending_activation = None;
            return;
        }
        self.activate(id);
    }

    /// Cancels a deferred activation, returning the item to rest.
    fn abort_pending(self: &Rc<Self>) {
        let (id, task) = {
            let mut cursor = self.cursor.borrow_mut();
            (cursor.pending_id.take(), cursor.pending_activation.take())
        };
        if let Some(task) = task {
            task.cancel();
        }
        let Some(id) = id else {
            return;
        };

        // Grabbed mid-animation: the item is away from its resting offset.
        let displaced = self
            .store
            .borrow()
            .draggable_offsets(&id)
            .map(|offsets| offsets.live.get() != offsets.resting);
        match displaced {
            Some(true) => self.release_to_rest(&id, Point::ZERO),
            Some(false) => self.set_state(&id, DraggableState::Resting),
            None => {}
        }
        trace_dnd!(self, "{id} activation aborted");
    }

    /// Clears an interaction left over from a gesture that never finalized.
    fn abandon_interaction(self: &Rc<Self>) {
        let active = {
            let mut cursor = self.cursor.borrow_mut();
            cursor.droppable_active_id = None;
            cursor.active_layout = None;
            cursor.active_id.take()
        };
        if let Some(id) = active {
            log::warn!("new gesture began while {id} was still dragging");
            self.release_to_rest(&id, Point::ZERO);
        }
        self.abort_pending();
    }

    fn release_to_rest(self: &Rc<Self>, id: &ItemId, velocity: Point) {
        let started = {
            let mut store = self.store.borrow_mut();
            let animation = store.draggable_offsets_mut(id).map(|offsets| {
                offsets.generation += 1;
                (offsets.live.clone(), offsets.resting, offsets.generation)
            });
            if animation.is_some() {
                let _ = store.set_draggable_state(id, DraggableState::Acting);
            }
            animation
        };
        let Some((live, resting, generation)) = started else {
            return;
        };

        let weak = Rc::downgrade(self);
        let settling = id.clone();
        animate_spring_pair(
            &live,
            resting,
            self.config.get().spring,
            velocity,
            &self.runtime.frame_clock(),
            move |finished_x, finished_y| {
                if let Some(shared) = weak.upgrade() {
                    shared.settle(&settling, generation, finished_x, finished_y);
                }
            },
        );
        trace_dnd!(self, "{id} returning to ({}, {})", resting.x, resting.y);
    }

    /// Commits `Resting` once a return animation completes.
    ///
    /// The generation token stands in for a gesture-state check: any new
    /// grab or release of the item bumps it, so a settle that outlived its
    /// animation never matches. `gesture_state` is kept for inspection only.
    fn settle(&self, id: &ItemId, generation: u64, finished_x: bool, finished_y: bool) {
        let mut store = self.store.borrow_mut();
        let current = store
            .draggable_offsets(id)
            .map(|offsets| offsets.generation);
        let state = store.draggable_state(id);
        if current != Some(generation) || state != Some(DraggableState::Acting) {
            trace_dnd!(
                self,
                "stale settle for {id} ignored (generation {generation}, state {state:?})"
            );
            return;
        }
        let _ = store.set_draggable_state(id, DraggableState::Resting);
        trace_dnd!(
            self,
            "{id} resting (finished x: {finished_x}, y: {finished_y})"
        );
    }

    fn set_state(&self, id: &ItemId, state: DraggableState) {
        if let Err(err) = self.store.borrow_mut().set_draggable_state(id, state) {
            log::warn!("cannot move to {state:?}: {err}");
        }
    }

    fn record_gesture_state(&self, state: GestureState) {
        self.cursor.borrow_mut().gesture_state = state;
    }

    fn trigger_haptics(&self) {
        let Some(feedback) = self.config.get().haptic_feedback else {
            return;
        };
        let haptics = self.haptics.borrow().clone();
        if let Some(haptics) = haptics {
            haptics.trigger(feedback);
        }
    }
}

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
