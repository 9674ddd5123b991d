//! Free-standing hit-testing helpers used by the gesture engine.

use crate::{Point, Rect};

/// Returns true when `point` lies within the closed bounds of `rect`.
#[inline]
pub fn includes_point(rect: &Rect, point: Point) -> bool {
    rect.contains(point.x, point.y)
}

/// Returns true when the two rectangles share a non-empty interior.
///
/// Edge-touching rectangles are treated as non-overlapping so that a drop
/// target is never reported for an item that merely sits next to it.
#[inline]
pub fn overlaps_rectangle(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Translates the origin of `rect` by `offset`; the size is unchanged.
#[inline]
pub fn apply_offset(rect: &Rect, offset: Point) -> Rect {
    rect.translate(offset.x, offset.y)
}

/// Euclidean norm of `(dx, dy)`.
#[inline]
pub fn get_distance(dx: f32, dy: f32) -> f32 {
    dx.hypot(dy)
}
