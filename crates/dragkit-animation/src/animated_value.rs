use crate::SpringSpec;
use dragkit_core::{FrameCallbackRegistration, FrameClock, NANOS_PER_MILLI};
use std::cell::RefCell;
use std::rc::Rc;

type SettleCallback = Box<dyn FnOnce(bool) + 'static>;

/// Frames longer than this are clamped so a stalled host does not make the
/// spring jump.
const MAX_FRAME_DELTA_NANOS: u64 = 100 * NANOS_PER_MILLI;

/// Shared animatable scalar.
///
/// Clones share the same value. Writing through [`AnimatedValue::set`] or
/// starting a new animation cancels the running one; a cancelled animation
/// reports `false` to its settle callback, a completed one reports `true`.
/// Settle callbacks always run after the value's internal borrow is released,
/// so they may start a new animation on the same value.
#[derive(Clone)]
pub struct AnimatedValue {
    inner: Rc<RefCell<AnimatedValueInner>>,
}

struct AnimatedValueInner {
    current: f32,
    velocity: f32,
    target: f32,
    spec: SpringSpec,
    clock: Option<FrameClock>,
    last_frame_nanos: u64,
    registration: Option<FrameCallbackRegistration>,
    on_settle: Option<SettleCallback>,
}

impl AnimatedValue {
    pub fn new(initial: f32) -> Self {
        let inner = AnimatedValueInner {
            current: initial,
            velocity: 0.0,
            target: initial,
            spec: SpringSpec::default(),
            clock: None,
            last_frame_nanos: 0,
            registration: None,
            on_settle: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    pub fn get(&self) -> f32 {
        self.inner.borrow().current
    }

    /// Current spring velocity; zero when idle.
    pub fn velocity(&self) -> f32 {
        self.inner.borrow().velocity
    }

    /// Target of the running animation, or the current value when idle.
    pub fn target(&self) -> f32 {
        self.inner.borrow().target
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().on_settle.is_some()
    }

    /// Writes the value immediately, cancelling any running animation.
    pub fn set(&self, value: f32) {
        self.cancel_animation();
        let mut inner = self.inner.borrow_mut();
        inner.current = value;
        inner.target = value;
        inner.velocity = 0.0;
    }

    /// Stops the running animation where it is. No-op when idle.
    pub fn cancel_animation(&self) {
        let settle = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.velocity = 0.0;
            inner.target = inner.current;
            inner.on_settle.take()
        };
        if let Some(settle) = settle {
            settle(false);
        }
    }

    /// Springs the value toward `target`, starting with `velocity`
    /// (units/second). `on_settle` runs exactly once.
    pub fn animate_to(
        &self,
        target: f32,
        spec: SpringSpec,
        velocity: f32,
        clock: &FrameClock,
        on_settle: impl FnOnce(bool) + 'static,
    ) {
        self.cancel_animation();
        {
            let mut inner = self.inner.borrow_mut();
            inner.target = target;
            inner.spec = spec.sanitized();
            inner.velocity = if velocity.is_finite() { velocity } else { 0.0 };
            inner.last_frame_nanos = clock.runtime_handle().now_nanos();
            inner.clock = Some(clock.clone());
            inner.on_settle = Some(Box::new(on_settle));
        }
        Self::schedule_frame(&self.inner);
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatedValueInner>>) {
        let clock = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            match inner.clock.clone() {
                Some(clock) => clock,
                None => return,
            }
        };
        let weak = Rc::downgrade(this);
        let registration = clock.with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("animated value scheduled on a dropped runtime; animation will not run");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatedValueInner>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut settled = None;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            if inner.on_settle.is_none() {
                return;
            }

            let delta_nanos = frame_time_nanos
                .saturating_sub(inner.last_frame_nanos)
                .min(MAX_FRAME_DELTA_NANOS);
            inner.last_frame_nanos = frame_time_nanos;
            let dt = delta_nanos as f32 / 1_000_000_000.0;

            if dt == 0.0 {
                schedule_next = true;
            } else {
                let step = inner
                    .spec
                    .step(inner.current, inner.velocity, inner.target, dt);
                if step.settled {
                    inner.current = inner.target;
                    inner.velocity = 0.0;
                    settled = inner.on_settle.take();
                } else {
                    inner.current = step.position;
                    inner.velocity = step.velocity;
                    schedule_next = true;
                }
            }
        }

        if let Some(settle) = settled {
            settle(true);
        } else if schedule_next {
            Self::schedule_frame(this);
        }
    }
}

impl std::fmt::Debug for AnimatedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("AnimatedValue")
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("velocity", &inner.velocity)
            .field("animating", &inner.on_settle.is_some())
            .finish()
    }
}
