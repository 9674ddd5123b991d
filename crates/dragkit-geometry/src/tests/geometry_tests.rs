use super::*;

#[test]
fn rect_center_and_edges() {
    let r = Rect::new(100.0, 200.0, 50.0, 30.0);
    let c = r.center();
    assert!((c.x - 125.0).abs() < 0.001);
    assert!((c.y - 215.0).abs() < 0.001);
    assert_eq!(r.right(), 150.0);
    assert_eq!(r.bottom(), 230.0);
}

#[test]
fn rect_from_origin_size_round_trips_parts() {
    let r = Rect::from_origin_size(Point::new(3.0, 4.0), Size::new(10.0, 20.0));
    assert_eq!(r.origin(), Point::new(3.0, 4.0));
    assert_eq!(r.size(), Size::new(10.0, 20.0));
}

#[test]
fn point_arithmetic() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(10.0, 20.0);
    assert_eq!(a + b, Point::new(11.0, 22.0));
    assert_eq!(b - a, Point::new(9.0, 18.0));
    assert_eq!(-a, Point::new(-1.0, -2.0));

    let mut c = a;
    c += b;
    assert_eq!(c, Point::new(11.0, 22.0));
}

#[test]
fn point_length() {
    assert_eq!(Point::new(3.0, 4.0).length(), 5.0);
    assert!(!Point::new(f32::NAN, 0.0).is_finite());
}

#[test]
fn empty_size_detection() {
    assert!(Size::ZERO.is_empty());
    assert!(Size::new(10.0, 0.0).is_empty());
    assert!(!Size::new(1.0, 1.0).is_empty());
    assert!(Rect::ZERO.is_empty());
}
