//! Consumer callbacks fired by the gesture engine.

use crate::{DraggableOptions, DroppableOptions, GestureEvent, ItemId};
use dragkit_geometry::Rect;
use std::fmt;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub struct BeginInfo {
    pub active_id: ItemId,
    pub active_layout: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateInfo {
    pub active_id: ItemId,
    pub active_layout: Rect,
    pub droppable_active_id: Option<ItemId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FinalizeInfo {
    pub active_id: ItemId,
    pub active_layout: Rect,
}

/// Summary of a completed drop.
#[derive(Clone, Debug, PartialEq)]
pub struct DragEndInfo {
    pub active: DraggableOptions,
    /// Target under the item at release, if any.
    pub over: Option<DroppableOptions>,
}

type BeginCallback = Rc<dyn Fn(&GestureEvent, &BeginInfo)>;
type UpdateCallback = Rc<dyn Fn(&GestureEvent, &UpdateInfo)>;
type FinalizeCallback = Rc<dyn Fn(&GestureEvent, &FinalizeInfo)>;
type DragEndCallback = Rc<dyn Fn(&DragEndInfo)>;

/// Optional hooks observing a drag. Each is called with no engine state
/// borrowed, so handlers may query the provider or its handle.
#[derive(Clone, Default)]
pub struct DndCallbacks {
    pub(crate) on_begin: Option<BeginCallback>,
    pub(crate) on_update: Option<UpdateCallback>,
    pub(crate) on_finalize: Option<FinalizeCallback>,
    pub(crate) on_drag_end: Option<DragEndCallback>,
}

impl DndCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_begin(mut self, callback: impl Fn(&GestureEvent, &BeginInfo) + 'static) -> Self {
        self.on_begin = Some(Rc::new(callback));
        self
    }

    pub fn on_update(mut self, callback: impl Fn(&GestureEvent, &UpdateInfo) + 'static) -> Self {
        self.on_update = Some(Rc::new(callback));
        self
    }

    pub fn on_finalize(
        mut self,
        callback: impl Fn(&GestureEvent, &FinalizeInfo) + 'static,
    ) -> Self {
        self.on_finalize = Some(Rc::new(callback));
        self
    }

    pub fn on_drag_end(mut self, callback: impl Fn(&DragEndInfo) + 'static) -> Self {
        self.on_drag_end = Some(Rc::new(callback));
        self
    }
}

impl fmt::Debug for DndCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DndCallbacks")
            .field("on_begin", &self.on_begin.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_finalize", &self.on_finalize.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .finish()
    }
}
