//! Per-item configuration supplied by registration collaborators.

use crate::{ItemData, ItemId};
use std::time::Duration;

/// Options of a draggable item.
#[derive(Clone, Debug, PartialEq)]
pub struct DraggableOptions {
    pub id: ItemId,
    pub data: Option<ItemData>,
    pub disabled: bool,
    /// Hold time before the item activates. `None` inherits the provider's
    /// [`DndConfig::activation_delay`](crate::DndConfig::activation_delay);
    /// `Some(Duration::ZERO)` activates immediately.
    pub activation_delay: Option<Duration>,
    /// Maximum pointer travel while the activation delay is running.
    pub activation_tolerance: f32,
}

impl DraggableOptions {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: None,
            disabled: false,
            activation_delay: None,
            activation_tolerance: f32::INFINITY,
        }
    }

    pub fn with_data(mut self, data: ItemData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_activation_delay(mut self, delay: Duration) -> Self {
        self.activation_delay = Some(delay);
        self
    }

    pub fn with_activation_tolerance(mut self, tolerance: f32) -> Self {
        self.activation_tolerance = tolerance;
        self
    }

    /// Clamps a negative or NaN tolerance to zero.
    pub(crate) fn sanitized(mut self) -> Self {
        if self.activation_tolerance.is_nan() || self.activation_tolerance < 0.0 {
            log::warn!(
                "draggable {}: activation tolerance {} clamped to 0",
                self.id,
                self.activation_tolerance
            );
            self.activation_tolerance = 0.0;
        }
        self
    }
}

/// Options of a droppable target.
#[derive(Clone, Debug, PartialEq)]
pub struct DroppableOptions {
    pub id: ItemId,
    pub data: Option<ItemData>,
    pub disabled: bool,
}

impl DroppableOptions {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            data: None,
            disabled: false,
        }
    }

    pub fn with_data(mut self, data: ItemData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}
