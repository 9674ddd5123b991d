//! Provider-wide configuration and haptic feedback.

use crate::DndError;
use dragkit_animation::SpringSpec;
use std::time::Duration;

/// Minimum pointer travel (logical pixels) before a pan gesture activates.
pub const DEFAULT_MIN_DISTANCE: f32 = 0.0;

/// Kind of feedback requested from the host when a drag activates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HapticFeedback {
    Selection,
    ImpactLight,
    ImpactMedium,
    ImpactHeavy,
}

/// Host hook for haptic feedback.
///
/// Called synchronously from the transition that activated a drag.
pub trait Haptics {
    fn trigger(&self, feedback: HapticFeedback);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DndConfig {
    /// Spring used to return released items to their resting offset.
    pub spring: SpringSpec,
    /// Default hold time before a touched item activates.
    pub activation_delay: Duration,
    /// Pointer travel required before the pan recognizer reports updates.
    pub min_distance: f32,
    /// Suppresses new drags. Drags already in progress finish normally.
    pub disabled: bool,
    pub haptic_feedback: Option<HapticFeedback>,
    /// Traces engine transitions at debug level.
    pub debug: bool,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            spring: SpringSpec::default(),
            activation_delay: Duration::ZERO,
            min_distance: DEFAULT_MIN_DISTANCE,
            disabled: false,
            haptic_feedback: None,
            debug: false,
        }
    }
}

impl DndConfig {
    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_activation_delay(mut self, delay: Duration) -> Self {
        self.activation_delay = delay;
        self
    }

    /// Millisecond variant for hosts that keep delays as floats. Negative and
    /// NaN inputs become zero.
    pub fn with_activation_delay_millis(self, millis: f64) -> Self {
        let millis = if millis.is_finite() && millis > 0.0 {
            millis
        } else {
            if millis != 0.0 {
                log::warn!("activation delay {millis}ms clamped to 0");
            }
            0.0
        };
        self.with_activation_delay(Duration::from_secs_f64(millis / 1000.0))
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_haptic_feedback(mut self, feedback: HapticFeedback) -> Self {
        self.haptic_feedback = Some(feedback);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Reports the first invalid value.
    pub fn validate(&self) -> Result<(), DndError> {
        if self.min_distance.is_nan() || self.min_distance < 0.0 {
            return Err(DndError::InvalidConfig {
                field: "min_distance",
                value: f64::from(self.min_distance),
            });
        }
        let spring_fields = [
            ("spring.stiffness", self.spring.stiffness),
            ("spring.damping_ratio", self.spring.damping_ratio),
        ];
        for (field, value) in spring_fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(DndError::InvalidConfig {
                    field,
                    value: f64::from(value),
                });
            }
        }
        Ok(())
    }

    /// Returns a copy with every invalid value replaced, logging each fix.
    pub fn sanitized(mut self) -> Self {
        if let Err(err) = self.validate() {
            log::warn!("sanitizing dnd config: {err}");
        }
        if self.min_distance.is_nan() || self.min_distance < 0.0 {
            self.min_distance = 0.0;
        }
        self.spring = self.spring.sanitized();
        self
    }
}
