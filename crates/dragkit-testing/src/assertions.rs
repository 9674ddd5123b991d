//! Approximate-equality assertions for positions that come out of spring
//! integration.

use dragkit_geometry::{Point, Rect};

/// Assert that two values are approximately equal within tolerance.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_point_approx_eq(actual: Point, expected: Point, tolerance: f32, msg: &str) {
    assert_approx_eq(actual.x, expected.x, tolerance, &format!("{} - x", msg));
    assert_approx_eq(actual.y, expected.y, tolerance, &format!("{} - y", msg));
}

pub fn assert_rect_approx_eq(actual: Rect, expected: Rect, tolerance: f32, msg: &str) {
    assert_point_approx_eq(actual.origin(), expected.origin(), tolerance, msg);
    assert_approx_eq(
        actual.width,
        expected.width,
        tolerance,
        &format!("{} - width", msg),
    );
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{} - height", msg),
    );
}

/// Assert that a point lies inside a rectangle, edges included.
pub fn assert_rect_contains_point(rect: Rect, point: Point, msg: &str) {
    assert!(
        rect.contains(point.x, point.y),
        "{}: point ({}, {}) not in rect {:?}",
        msg,
        point.x,
        point.y,
        rect
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_accepts_values_within_tolerance() {
        assert_approx_eq(1.0, 1.05, 0.1, "close");
        assert_point_approx_eq(Point::new(1.0, 2.0), Point::new(1.01, 1.99), 0.02, "point");
        assert_rect_approx_eq(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(0.001, 0.0, 10.0, 10.0),
            0.01,
            "rect",
        );
    }

    #[test]
    #[should_panic(expected = "far")]
    fn approx_eq_rejects_distant_values() {
        assert_approx_eq(1.0, 2.0, 0.1, "far");
    }

    #[test]
    fn contains_point_includes_edges() {
        assert_rect_contains_point(Rect::new(0.0, 0.0, 10.0, 10.0), Point::new(10.0, 0.0), "edge");
    }
}
