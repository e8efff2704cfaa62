use qreader_base::{Point, Rect, Size};

// --- Construction ---

#[test]
fn test_from_xywh() {
    let r = Rect::from_xywh(1.0, 2.0, 3.0, 4.0);
    assert_eq!(r.origin, Point::new(1.0, 2.0));
    assert_eq!(r.size, Size::new(3.0, 4.0));
}

#[test]
fn test_zero() {
    let r = Rect::zero();
    assert_eq!(r.origin, Point::new(0.0, 0.0));
    assert!(r.size.is_empty());
}

// --- Accessors ---

#[test]
fn test_edges() {
    let r = Rect::from_xywh(1.0, 2.0, 3.0, 4.0);
    assert_eq!(r.min_x(), 1.0);
    assert_eq!(r.min_y(), 2.0);
    assert_eq!(r.max_x(), 4.0);
    assert_eq!(r.max_y(), 6.0);
}

#[test]
fn test_center() {
    let r = Rect::from_xywh(0.0, 0.0, 320.0, 568.0);
    let c = r.center();
    assert!((c.x - 160.0).abs() < 1e-10);
    assert!((c.y - 284.0).abs() < 1e-10);
}

#[test]
fn test_center_with_offset_origin() {
    let r = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.center(), Point::new(60.0, 45.0));
}

#[test]
fn test_local_bounds_drops_origin() {
    let r = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.local_bounds(), Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
}

// --- Contains ---

#[test]
fn test_contains_inside_and_min_edge() {
    let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(5.0, 5.0)));
    assert!(r.contains(Point::new(0.0, 0.0)));
}

#[test]
fn test_contains_excludes_max_edge() {
    let r = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
    assert!(!r.contains(Point::new(10.0, 5.0)));
    assert!(!r.contains(Point::new(5.0, 10.0)));
}

#[test]
fn test_size_is_empty() {
    assert!(Size::new(0.0, 10.0).is_empty());
    assert!(Size::new(10.0, -1.0).is_empty());
    assert!(!Size::new(1.0, 1.0).is_empty());
}
