//! Two-axis spring animation built from a pair of independent scalars.

use crate::{AnimatedValue, SpringSpec};
use dragkit_core::FrameClock;
use dragkit_geometry::Point;
use std::cell::RefCell;
use std::rc::Rc;

/// A 2D offset whose axes animate independently.
#[derive(Clone, Debug)]
pub struct AnimatedOffset {
    pub x: AnimatedValue,
    pub y: AnimatedValue,
}

impl AnimatedOffset {
    pub fn new(initial: Point) -> Self {
        Self {
            x: AnimatedValue::new(initial.x),
            y: AnimatedValue::new(initial.y),
        }
    }

    pub fn get(&self) -> Point {
        Point::new(self.x.get(), self.y.get())
    }

    /// Writes both axes immediately, cancelling any running animation.
    pub fn set(&self, value: Point) {
        self.x.set(value.x);
        self.y.set(value.y);
    }

    pub fn cancel_animation(&self) {
        self.x.cancel_animation();
        self.y.cancel_animation();
    }

    pub fn is_animating(&self) -> bool {
        self.x.is_animating() || self.y.is_animating()
    }
}

impl Default for AnimatedOffset {
    fn default() -> Self {
        Self::new(Point::ZERO)
    }
}

struct PairSettle {
    x: Option<bool>,
    y: Option<bool>,
    callback: Option<Box<dyn FnOnce(bool, bool) + 'static>>,
}

impl PairSettle {
    fn record(this: &Rc<RefCell<Self>>, axis_x: bool, finished: bool) {
        let ready = {
            let mut settle = this.borrow_mut();
            if axis_x {
                settle.x = Some(finished);
            } else {
                settle.y = Some(finished);
            }
            match (settle.x, settle.y) {
                (Some(x), Some(y)) => settle.callback.take().map(|callback| (callback, x, y)),
                _ => None,
            }
        };
        if let Some((callback, x, y)) = ready {
            callback(x, y);
        }
    }
}

/// Springs `offset` toward `target`, seeding each axis with its own
/// component of `velocity`.
///
/// `on_settle(finished_x, finished_y)` runs exactly once, after both axes
/// either reached the target (`true`) or were cancelled or superseded
/// (`false`). Each axis stays individually cancellable through
/// `offset.x` / `offset.y`.
pub fn animate_spring_pair(
    offset: &AnimatedOffset,
    target: Point,
    spec: SpringSpec,
    velocity: Point,
    clock: &FrameClock,
    on_settle: impl FnOnce(bool, bool) + 'static,
) {
    let settle = Rc::new(RefCell::new(PairSettle {
        x: None,
        y: None,
        callback: Some(Box::new(on_settle)),
    }));

    let settle_x = Rc::clone(&settle);
    offset.x.animate_to(target.x, spec, velocity.x, clock, move |finished| {
        PairSettle::record(&settle_x, true, finished);
    });
    offset.y.animate_to(target.y, spec, velocity.y, clock, move |finished| {
        PairSettle::record(&settle, false, finished);
    });
}
