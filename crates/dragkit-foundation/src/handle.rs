use crate::engine::DndShared;
use crate::gesture::GestureState;
use crate::registry::DndStore;
use crate::{DraggableState, ItemId};
use dragkit_geometry::{Point, Rect};
use std::rc::Rc;

/// Read-only view of a provider's registry and interaction cursor.
///
/// Cheap to clone. Safe to use from inside consumer callbacks.
#[derive(Clone)]
pub struct DndHandle {
    shared: Rc<DndShared>,
}

impl DndHandle {
    pub(crate) fn new(shared: Rc<DndShared>) -> Self {
        Self { shared }
    }

    pub fn active_id(&self) -> Option<ItemId> {
        self.shared.cursor.borrow().active_id.clone()
    }

    pub fn pending_id(&self) -> Option<ItemId> {
        self.shared.cursor.borrow().pending_id.clone()
    }

    pub fn droppable_active_id(&self) -> Option<ItemId> {
        self.shared.cursor.borrow().droppable_active_id.clone()
    }

    /// Layout of the active item translated by its live offset.
    pub fn active_layout(&self) -> Option<Rect> {
        self.shared.cursor.borrow().active_layout
    }

    /// State reported by the most recent gesture event.
    pub fn gesture_state(&self) -> GestureState {
        self.shared.cursor.borrow().gesture_state
    }

    pub fn content_offset(&self) -> Point {
        self.shared.cursor.borrow().content_offset
    }

    pub fn draggable_state(&self, id: &ItemId) -> Option<DraggableState> {
        self.shared.store.borrow().draggable_state(id)
    }

    pub fn draggable_offset(&self, id: &ItemId) -> Option<Point> {
        self.shared
            .store
            .borrow()
            .draggable_offsets(id)
            .map(|offsets| offsets.live.get())
    }

    pub fn resting_offset(&self, id: &ItemId) -> Option<Point> {
        self.shared
            .store
            .borrow()
            .draggable_offsets(id)
            .map(|offsets| offsets.resting)
    }

    pub fn is_animating(&self, id: &ItemId) -> bool {
        self.shared
            .store
            .borrow()
            .draggable_offsets(id)
            .is_some_and(|offsets| offsets.live.is_animating())
    }

    pub fn draggable_layout(&self, id: &ItemId) -> Option<Rect> {
        self.shared.store.borrow().draggable_layout(id)
    }

    pub fn droppable_layout(&self, id: &ItemId) -> Option<Rect> {
        self.shared.store.borrow().droppable_layout(id)
    }

    pub fn draggable_layouts(&self) -> Vec<(ItemId, Rect)> {
        self.with_store(|store| {
            store
                .draggable_layouts()
                .map(|(id, rect)| (id.clone(), *rect))
                .collect()
        })
    }

    pub fn droppable_layouts(&self) -> Vec<(ItemId, Rect)> {
        self.with_store(|store| {
            store
                .droppable_layouts()
                .map(|(id, rect)| (id.clone(), *rect))
                .collect()
        })
    }

    pub fn draggable_offsets(&self) -> Vec<(ItemId, Point)> {
        self.with_store(|store| {
            store
                .offsets()
                .map(|(id, offsets)| (id.clone(), offsets.live.get()))
                .collect()
        })
    }

    pub fn resting_offsets(&self) -> Vec<(ItemId, Point)> {
        self.with_store(|store| {
            store
                .offsets()
                .map(|(id, offsets)| (id.clone(), offsets.resting))
                .collect()
        })
    }

    pub fn draggable_states(&self) -> Vec<(ItemId, DraggableState)> {
        self.with_store(|store| {
            store
                .states()
                .map(|(id, state)| (id.clone(), *state))
                .collect()
        })
    }

    /// Runs `f` with the registry borrowed. `f` must not feed gestures to the
    /// provider.
    pub fn with_store<R>(&self, f: impl FnOnce(&DndStore) -> R) -> R {
        f(&self.shared.store.borrow())
    }
}

impl std::fmt::Debug for DndHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DndHandle")
            .field("active_id", &self.active_id())
            .field("pending_id", &self.pending_id())
            .finish()
    }
}
