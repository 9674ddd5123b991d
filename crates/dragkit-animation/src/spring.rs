//! Damped harmonic oscillator used by every spring animation.

/// Upper bound on the integration step.
const SUB_STEP_SECONDS: f32 = 0.004;

/// Cap on sub-steps per call so extreme parameters cannot stall a frame.
const MAX_SUB_STEPS: f32 = 4096.0;

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Speed (units/second) below which the spring may come to rest.
    pub velocity_threshold: f32,
    /// Distance to target below which the spring may come to rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Create a spring with default material design values.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 1.0,
            position_threshold: 0.01,
        }
    }

    /// Create a bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Create a stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    pub fn with_damping_ratio(mut self, damping_ratio: f32) -> Self {
        self.damping_ratio = damping_ratio;
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    /// Replaces non-finite or non-positive parameters with the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default_spring();
        let pick = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            damping_ratio: pick(self.damping_ratio, defaults.damping_ratio),
            stiffness: pick(self.stiffness, defaults.stiffness),
            velocity_threshold: pick(self.velocity_threshold, defaults.velocity_threshold),
            position_threshold: pick(self.position_threshold, defaults.position_threshold),
        }
    }

    /// Advances `(position, velocity)` toward `target` by `dt` seconds.
    ///
    /// Uses semi-implicit Euler integration. The sub-step keeps both
    /// `h * omega` and `h * damping` at or below 1, which bounds the
    /// integrator for any stiffness and damping ratio. A non-finite result
    /// snaps to the target.
    pub fn step(&self, position: f32, velocity: f32, target: f32, dt: f32) -> SpringStep {
        let stiffness = self.stiffness;
        let omega = stiffness.sqrt();
        let damping = 2.0 * self.damping_ratio * omega;
        let max_step = SUB_STEP_SECONDS.min(1.0 / omega).min(1.0 / damping);

        let sub_steps = (dt / max_step).ceil().clamp(1.0, MAX_SUB_STEPS) as u32;
        let step = dt / sub_steps as f32;

        let mut position = position;
        let mut velocity = velocity;
        for _ in 0..sub_steps {
            let displacement = position - target;
            let force = -stiffness * displacement - damping * velocity;
            velocity += force * step;
            position += velocity * step;
        }

        if !position.is_finite() || !velocity.is_finite() {
            log::warn!("spring diverged ({self:?}); snapping to target {target}");
            return SpringStep {
                position: target,
                velocity: 0.0,
                settled: true,
            };
        }

        let settled = velocity.abs() < self.velocity_threshold
            && (position - target).abs() < self.position_threshold;
        SpringStep {
            position,
            velocity,
            settled,
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Result of advancing a spring by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringStep {
    pub position: f32,
    pub velocity: f32,
    /// Both speed and distance are under the spring's thresholds.
    pub settled: bool,
}
