//! Turns raw pointer events into pan gesture callbacks.

use crate::gesture::{GestureEvent, GestureInput, GestureState};
use crate::pointer::{PointerEvent, PointerEventKind, PointerId};
use crate::velocity_tracker::VelocityTracker1D;
use dragkit_geometry::Point;

/// Upper bound for the release velocity handed to the return spring, in
/// logical pixels per second.
pub const MAX_RELEASE_VELOCITY: f32 = 8_000.0;

#[derive(Clone, Copy, Debug)]
struct Tracking {
    pointer: PointerId,
    start: Point,
    activated: bool,
}

/// Single-pointer pan recognizer.
///
/// Down always begins a gesture. Moves are reported once the pointer has
/// travelled `min_distance` from where it went down. Pointers other than the
/// one that began the gesture are ignored.
#[derive(Clone, Debug)]
pub struct PanRecognizer {
    min_distance: f32,
    tracking: Option<Tracking>,
    velocity_x: VelocityTracker1D,
    velocity_y: VelocityTracker1D,
}

impl PanRecognizer {
    pub fn new(min_distance: f32) -> Self {
        Self {
            min_distance: min_distance.max(0.0),
            tracking: None,
            velocity_x: VelocityTracker1D::new(),
            velocity_y: VelocityTracker1D::new(),
        }
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn set_min_distance(&mut self, min_distance: f32) {
        self.min_distance = if min_distance.is_nan() {
            0.0
        } else {
            min_distance.max(0.0)
        };
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    pub fn process(&mut self, event: &PointerEvent) -> Option<GestureInput> {
        match event.kind {
            PointerEventKind::Down => self.on_down(event),
            PointerEventKind::Move => self.on_move(event),
            PointerEventKind::Up => self.on_release(event, false),
            PointerEventKind::Cancel => self.on_release(event, true),
        }
    }

    fn on_down(&mut self, event: &PointerEvent) -> Option<GestureInput> {
        if self.tracking.is_some() {
            return None;
        }
        self.velocity_x.reset();
        self.velocity_y.reset();
        self.track_velocity(event);
        self.tracking = Some(Tracking {
            pointer: event.id,
            start: event.position,
            activated: false,
        });
        Some(GestureInput::Begin(GestureEvent::begin(
            event.position.x,
            event.position.y,
        )))
    }

    fn on_move(&mut self, event: &PointerEvent) -> Option<GestureInput> {
        let tracking = self.tracking.as_mut()?;
        if tracking.pointer != event.id {
            return None;
        }
        let translation = event.position - tracking.start;
        if !tracking.activated {
            if translation.length() < self.min_distance {
                return None;
            }
            tracking.activated = true;
        }
        self.track_velocity(event);
        Some(GestureInput::Update(
            GestureEvent::update(translation.x, translation.y)
                .with_position(event.position.x, event.position.y),
        ))
    }

    fn on_release(&mut self, event: &PointerEvent, cancelled: bool) -> Option<GestureInput> {
        let tracking = self.tracking?;
        if tracking.pointer != event.id {
            return None;
        }
        self.tracking = None;

        if cancelled {
            return Some(GestureInput::Finalize(GestureEvent::finalize(
                GestureState::Cancelled,
                0.0,
                0.0,
            )));
        }

        self.track_velocity(event);
        let translation = event.position - tracking.start;
        let (state, velocity) = if tracking.activated {
            (
                GestureState::Ended,
                Point::new(
                    self.velocity_x
                        .calculate_velocity_with_max(MAX_RELEASE_VELOCITY),
                    self.velocity_y
                        .calculate_velocity_with_max(MAX_RELEASE_VELOCITY),
                ),
            )
        } else {
            (GestureState::Failed, Point::ZERO)
        };
        Some(GestureInput::Finalize(
            GestureEvent::finalize(state, velocity.x, velocity.y)
                .with_position(event.position.x, event.position.y)
                .with_translation(translation.x, translation.y),
        ))
    }

    fn track_velocity(&mut self, event: &PointerEvent) {
        self.velocity_x
            .add_data_point(event.time_ms, event.position.x);
        self.velocity_y
            .add_data_point(event.time_ms, event.position.y);
    }
}

impl Default for PanRecognizer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MIN_DISTANCE)
    }
}

#[cfg(test)]
#[path = "tests/recognizer_tests.rs"]
mod tests;
