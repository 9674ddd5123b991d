//! Shared store of registered draggables and droppables.
//!
//! Every map is keyed by [`ItemId`] and keeps registration order, which is
//! also the hit-testing order: the first matching item wins.

use crate::{DndError, DraggableOptions, DraggableState, DroppableOptions, ItemId};
use dragkit_animation::AnimatedOffset;
use dragkit_geometry::{apply_offset, includes_point, overlaps_rectangle, Point, Rect};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

type ItemMap<V> = IndexMap<ItemId, V, FxBuildHasher>;

/// Displacement of a draggable from its layout origin.
#[derive(Clone, Debug)]
pub struct OffsetPair {
    /// Offset currently rendered; follows the pointer or the return spring.
    pub live: AnimatedOffset,
    /// Offset the item springs back to when released.
    pub resting: Point,
    /// Bumped whenever a return animation is started or interrupted.
    pub(crate) generation: u64,
}

impl OffsetPair {
    fn new() -> Self {
        Self {
            live: AnimatedOffset::new(Point::ZERO),
            resting: Point::ZERO,
            generation: 0,
        }
    }
}

#[derive(Default)]
pub struct DndStore {
    draggable_layouts: ItemMap<Rect>,
    draggable_options: ItemMap<DraggableOptions>,
    draggable_offsets: ItemMap<OffsetPair>,
    draggable_states: ItemMap<DraggableState>,
    droppable_layouts: ItemMap<Rect>,
    droppable_options: ItemMap<DroppableOptions>,
}

impl DndStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Draggables

    pub fn register_draggable(&mut self, options: DraggableOptions) -> Result<(), DndError> {
        if self.draggable_options.contains_key(&options.id) {
            return Err(DndError::DuplicateItem { id: options.id });
        }
        let options = options.sanitized();
        let id = options.id.clone();
        self.draggable_offsets.insert(id.clone(), OffsetPair::new());
        self.draggable_states.insert(id.clone(), DraggableState::Resting);
        self.draggable_options.insert(id, options);
        Ok(())
    }

    pub fn update_draggable_options(&mut self, options: DraggableOptions) -> Result<(), DndError> {
        match self.draggable_options.get_mut(&options.id) {
            Some(slot) => {
                *slot = options.sanitized();
                Ok(())
            }
            None => Err(DndError::UnknownItem { id: options.id }),
        }
    }

    pub fn set_draggable_layout(&mut self, id: &ItemId, layout: Rect) -> Result<(), DndError> {
        if !self.draggable_options.contains_key(id) {
            return Err(unknown(id));
        }
        self.draggable_layouts.insert(id.clone(), layout);
        Ok(())
    }

    /// Removes every entry of `id` and hands back its offsets. The caller
    /// cancels the live animation once the store is no longer borrowed.
    pub fn unregister_draggable(&mut self, id: &ItemId) -> Result<OffsetPair, DndError> {
        if self.draggable_options.shift_remove(id).is_none() {
            return Err(unknown(id));
        }
        self.draggable_layouts.shift_remove(id);
        self.draggable_states.shift_remove(id);
        self.draggable_offsets
            .shift_remove(id)
            .ok_or_else(|| unknown(id))
    }

    pub fn contains_draggable(&self, id: &ItemId) -> bool {
        self.draggable_options.contains_key(id)
    }

    pub fn draggable_options(&self, id: &ItemId) -> Option<&DraggableOptions> {
        self.draggable_options.get(id)
    }

    pub fn draggable_layout(&self, id: &ItemId) -> Option<Rect> {
        self.draggable_layouts.get(id).copied()
    }

    pub fn draggable_offsets(&self, id: &ItemId) -> Option<&OffsetPair> {
        self.draggable_offsets.get(id)
    }

    pub(crate) fn draggable_offsets_mut(&mut self, id: &ItemId) -> Option<&mut OffsetPair> {
        self.draggable_offsets.get_mut(id)
    }

    pub fn draggable_state(&self, id: &ItemId) -> Option<DraggableState> {
        self.draggable_states.get(id).copied()
    }

    pub(crate) fn set_draggable_state(
        &mut self,
        id: &ItemId,
        state: DraggableState,
    ) -> Result<DraggableState, DndError> {
        self.draggable_states
            .get_mut(id)
            .map(|slot| std::mem::replace(slot, state))
            .ok_or_else(|| unknown(id))
    }

    /// Layout translated by the live offset.
    pub fn active_layout(&self, id: &ItemId) -> Option<Rect> {
        let layout = self.draggable_layout(id)?;
        let live = self.draggable_offsets.get(id)?.live.get();
        Some(apply_offset(&layout, live))
    }

    /// First enabled, measured draggable whose layout contains `point` once
    /// the item's live offset is taken into account.
    pub fn find_draggable_at(&self, point: Point) -> Option<ItemId> {
        self.draggable_options
            .values()
            .filter(|options| !options.disabled)
            .find(|options| {
                let Some(layout) = self.draggable_layouts.get(&options.id) else {
                    return false;
                };
                let live = self
                    .draggable_offsets
                    .get(&options.id)
                    .map(|offsets| offsets.live.get())
                    .unwrap_or(Point::ZERO);
                includes_point(layout, point - live)
            })
            .map(|options| options.id.clone())
    }

    // Droppables

    pub fn register_droppable(&mut self, options: DroppableOptions) -> Result<(), DndError> {
        if self.droppable_options.contains_key(&options.id) {
            return Err(DndError::DuplicateItem { id: options.id });
        }
        self.droppable_options.insert(options.id.clone(), options);
        Ok(())
    }

    pub fn update_droppable_options(&mut self, options: DroppableOptions) -> Result<(), DndError> {
        match self.droppable_options.get_mut(&options.id) {
            Some(slot) => {
                *slot = options;
                Ok(())
            }
            None => Err(DndError::UnknownItem { id: options.id }),
        }
    }

    pub fn set_droppable_layout(&mut self, id: &ItemId, layout: Rect) -> Result<(), DndError> {
        if !self.droppable_options.contains_key(id) {
            return Err(unknown(id));
        }
        self.droppable_layouts.insert(id.clone(), layout);
        Ok(())
    }

    pub fn unregister_droppable(&mut self, id: &ItemId) -> Result<(), DndError> {
        if self.droppable_options.shift_remove(id).is_none() {
            return Err(unknown(id));
        }
        self.droppable_layouts.shift_remove(id);
        Ok(())
    }

    pub fn contains_droppable(&self, id: &ItemId) -> bool {
        self.droppable_options.contains_key(id)
    }

    pub fn droppable_options(&self, id: &ItemId) -> Option<&DroppableOptions> {
        self.droppable_options.get(id)
    }

    pub fn droppable_layout(&self, id: &ItemId) -> Option<Rect> {
        self.droppable_layouts.get(id).copied()
    }

    /// First enabled, measured droppable overlapping `rect`.
    pub fn find_droppable_overlapping(&self, rect: &Rect) -> Option<ItemId> {
        self.droppable_options
            .values()
            .filter(|options| !options.disabled)
            .find(|options| {
                self.droppable_layouts
                    .get(&options.id)
                    .is_some_and(|layout| overlaps_rectangle(layout, rect))
            })
            .map(|options| options.id.clone())
    }

    // Snapshots, in registration order.

    pub fn draggable_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.draggable_options.keys()
    }

    pub fn droppable_ids(&self) -> impl Iterator<Item = &ItemId> {
        self.droppable_options.keys()
    }

    pub fn draggable_layouts(&self) -> impl Iterator<Item = (&ItemId, &Rect)> {
        self.draggable_layouts.iter()
    }

    pub fn droppable_layouts(&self) -> impl Iterator<Item = (&ItemId, &Rect)> {
        self.droppable_layouts.iter()
    }

    pub fn offsets(&self) -> impl Iterator<Item = (&ItemId, &OffsetPair)> {
        self.draggable_offsets.iter()
    }

    pub fn states(&self) -> impl Iterator<Item = (&ItemId, &DraggableState)> {
        self.draggable_states.iter()
    }
}

fn unknown(id: &ItemId) -> DndError {
    DndError::UnknownItem { id: id.clone() }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
