use crate::callbacks::DndCallbacks;
use crate::config::{DndConfig, Haptics};
use crate::engine::DndShared;
use crate::gesture::{GestureEvent, GestureInput};
use crate::handle::DndHandle;
use crate::pointer::PointerEvent;
use crate::recognizer::PanRecognizer;
use crate::{DndError, DraggableOptions, DroppableOptions, ItemId};
use dragkit_core::RuntimeHandle;
use dragkit_geometry::{Point, Rect};
use std::cell::RefCell;
use std::rc::Rc;

/// Owner of one drag-and-drop context.
///
/// Items register through the provider, gestures are fed to it either as
/// already recognized [`GestureEvent`]s or as raw [`PointerEvent`]s, and
/// [`DndHandle`]s give read-only access to the resulting state.
pub struct DndProvider {
    shared: Rc<DndShared>,
    recognizer: RefCell<PanRecognizer>,
}

impl DndProvider {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self::with_config(runtime, DndConfig::default())
    }

    /// Invalid config values are sanitized.
    pub fn with_config(runtime: RuntimeHandle, config: DndConfig) -> Self {
        let shared = Rc::new(DndShared::new(runtime, config));
        let recognizer = PanRecognizer::new(shared.config.get().min_distance);
        Self {
            shared,
            recognizer: RefCell::new(recognizer),
        }
    }

    pub fn with_callbacks(self, callbacks: DndCallbacks) -> Self {
        self.set_callbacks(callbacks);
        self
    }

    pub fn with_haptics(self, haptics: impl Haptics + 'static) -> Self {
        let haptics: Rc<dyn Haptics> = Rc::new(haptics);
        self.set_haptics(Some(haptics));
        self
    }

    pub fn set_callbacks(&self, callbacks: DndCallbacks) {
        *self.shared.callbacks.borrow_mut() = callbacks;
    }

    pub fn set_haptics(&self, haptics: Option<Rc<dyn Haptics>>) {
        *self.shared.haptics.borrow_mut() = haptics;
    }

    pub fn config(&self) -> DndConfig {
        self.shared.config.get()
    }

    pub fn set_config(&self, config: DndConfig) {
        let config = config.sanitized();
        self.shared.config.set(config);
        self.recognizer
            .borrow_mut()
            .set_min_distance(config.min_distance);
    }

    /// Stops new drags from starting. A drag in progress is unaffected.
    pub fn set_disabled(&self, disabled: bool) {
        let config = self.shared.config.get();
        self.shared.config.set(config.disabled(disabled));
    }

    /// Scroll position of the container hosting the items. Added to pointer
    /// positions before hit testing.
    pub fn set_content_offset(&self, offset: Point) {
        self.shared.cursor.borrow_mut().content_offset = offset;
    }

    pub fn content_offset(&self) -> Point {
        self.shared.cursor.borrow().content_offset
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.shared.runtime.clone()
    }

    pub fn handle(&self) -> DndHandle {
        DndHandle::new(Rc::clone(&self.shared))
    }

    // Registration

    pub fn register_draggable(&self, options: DraggableOptions) -> Result<(), DndError> {
        self.shared.store.borrow_mut().register_draggable(options)
    }

    pub fn update_draggable_options(&self, options: DraggableOptions) -> Result<(), DndError> {
        self.shared
            .store
            .borrow_mut()
            .update_draggable_options(options)
    }

    pub fn set_draggable_layout(
        &self,
        id: impl Into<ItemId>,
        layout: Rect,
    ) -> Result<(), DndError> {
        self.shared
            .store
            .borrow_mut()
            .set_draggable_layout(&id.into(), layout)
    }

    /// Removes the item and stops its return animation.
    pub fn unregister_draggable(&self, id: impl Into<ItemId>) -> Result<(), DndError> {
        let id = id.into();
        let removed = self.shared.store.borrow_mut().unregister_draggable(&id)?;
        removed.live.cancel_animation();
        self.shared.forget_item(&id);
        Ok(())
    }

    pub fn register_droppable(&self, options: DroppableOptions) -> Result<(), DndError> {
        self.shared.store.borrow_mut().register_droppable(options)
    }

    pub fn update_droppable_options(&self, options: DroppableOptions) -> Result<(), DndError> {
        self.shared
            .store
            .borrow_mut()
            .update_droppable_options(options)
    }

    pub fn set_droppable_layout(
        &self,
        id: impl Into<ItemId>,
        layout: Rect,
    ) -> Result<(), DndError> {
        self.shared
            .store
            .borrow_mut()
            .set_droppable_layout(&id.into(), layout)
    }

    pub fn unregister_droppable(&self, id: impl Into<ItemId>) -> Result<(), DndError> {
        let id = id.into();
        self.shared.store.borrow_mut().unregister_droppable(&id)?;
        self.shared.forget_item(&id);
        Ok(())
    }

    // Gesture input

    pub fn on_begin(&self, event: &GestureEvent) {
        self.shared.on_begin(event);
    }

    pub fn on_update(&self, event: &GestureEvent) {
        self.shared.on_update(event);
    }

    pub fn on_finalize(&self, event: &GestureEvent) {
        self.shared.on_finalize(event);
    }

    pub fn dispatch(&self, input: &GestureInput) {
        self.shared.dispatch(input);
    }

    /// Runs the event through the pan recognizer and forwards the resulting
    /// gesture callback, if any.
    pub fn on_pointer_event(&self, event: &PointerEvent) -> Option<GestureInput> {
        let input = self.recognizer.borrow_mut().process(event);
        if let Some(input) = &input {
            self.shared.dispatch(input);
        }
        input
    }
}

impl std::fmt::Debug for DndProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cursor = self.shared.cursor.borrow();
        f.debug_struct("DndProvider")
            .field("config", &self.shared.config.get())
            .field("active_id", &cursor.active_id)
            .field("pending_id", &cursor.pending_id)
            .field("droppable_active_id", &cursor.droppable_active_id)
            .finish()
    }
}
