//! Release velocity estimation for pan gestures.
//!
//! Uses the impulse strategy: every pair of consecutive samples contributes
//! the kinetic energy needed to move from the previous velocity to the new
//! one, and the accumulated energy is converted back into a velocity.

const CAPACITY: usize = 20;

/// Samples older than this (relative to the newest one) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped in between.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    value: f32,
}

/// Single-axis velocity tracker over absolute positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    ring: [Sample; CAPACITY],
    next: usize,
    len: usize,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_data_point(&mut self, time_ms: i64, value: f32) {
        self.ring[self.next] = Sample { time_ms, value };
        self.next = (self.next + 1) % CAPACITY;
        self.len = (self.len + 1).min(CAPACITY);
    }

    /// Velocity in units per second, zero with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let mut window = [(0.0f32, 0.0f32); CAPACITY];
        let mut count = 0;

        let mut newer: Option<Sample> = None;
        let mut newest_time = 0;
        for sample in self.newest_first() {
            match newer {
                None => newest_time = sample.time_ms,
                Some(newer) => {
                    if newest_time - sample.time_ms > HORIZON_MS
                        || newer.time_ms - sample.time_ms > ASSUME_STOPPED_MS
                    {
                        break;
                    }
                }
            }
            window[count] = ((sample.time_ms - newest_time) as f32, sample.value);
            count += 1;
            newer = Some(sample);
        }

        if count < 2 {
            return 0.0;
        }
        let window = &mut window[..count];
        window.reverse();
        impulse_velocity(window) * 1000.0
    }

    /// [`calculate_velocity`](Self::calculate_velocity) clamped to
    /// `±max_velocity`. A non-positive limit yields zero.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.next = 0;
        self.len = 0;
    }

    fn newest_first(&self) -> impl Iterator<Item = Sample> + '_ {
        (1..=self.len).map(move |back| self.ring[(self.next + CAPACITY - back) % CAPACITY])
    }
}

/// `samples` are `(time_ms, value)` ordered oldest first. Returns units/ms.
fn impulse_velocity(samples: &[(f32, f32)]) -> f32 {
    let mut work = 0.0f32;
    for (index, pair) in samples.windows(2).enumerate() {
        let (t0, x0) = pair[0];
        let (t1, x1) = pair[1];
        if t1 == t0 {
            continue;
        }
        let velocity = (x1 - x0) / (t1 - t0);
        work += (velocity - energy_to_velocity(work)) * velocity.abs();
        if index == 0 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_motion_reports_its_speed() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..6 {
            let t = step * 10;
            tracker.add_data_point(t, t as f32);
        }
        let velocity = tracker.calculate_velocity();
        assert!((velocity - 1000.0).abs() < 1.0, "velocity {velocity}");
    }

    #[test]
    fn negative_direction_is_negative() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..5 {
            tracker.add_data_point(step * 8, -(step as f32) * 4.0);
        }
        assert!(tracker.calculate_velocity() < 0.0);
    }

    #[test]
    fn single_sample_has_no_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 10.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn pause_before_release_drops_old_motion() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 50.0);
        tracker.add_data_point(200, 50.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn velocity_is_capped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 1000.0);
        tracker.add_data_point(2, 2000.0);
        assert_eq!(tracker.calculate_velocity_with_max(500.0), 500.0);
        assert_eq!(tracker.calculate_velocity_with_max(0.0), 0.0);
    }

    #[test]
    fn ring_keeps_only_recent_samples() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..50 {
            tracker.add_data_point(step * 5, (step * 5) as f32 * 2.0);
        }
        let velocity = tracker.calculate_velocity();
        assert!((velocity - 2000.0).abs() < 1.0, "velocity {velocity}");

        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }
}
