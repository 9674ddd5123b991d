/// Interaction state of a single draggable.
///
/// `Resting -> Pending -> Dragging -> Acting -> Resting`; `Pending` is
/// skipped when no activation delay applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DraggableState {
    #[default]
    Resting,
    /// Touched, waiting for the activation delay.
    Pending,
    /// Following the pointer.
    Dragging,
    /// Released and springing back to its resting offset.
    Acting,
}

impl DraggableState {
    /// Dragging or springing back; re-grabbing such an item must not move
    /// its resting offset.
    #[inline]
    pub fn is_in_motion(&self) -> bool {
        matches!(self, DraggableState::Dragging | DraggableState::Acting)
    }
}
