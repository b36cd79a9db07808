//! Tests for geographic extents

use super::*;
use proptest::prelude::*;

#[test]
fn test_new_valid_extents() {
    let extents = Extents::new(-10.0, -5.0, 10.0, 5.0);
    assert!(extents.is_ok(), "Valid bounds should not error");

    let extents = extents.unwrap();
    assert_eq!(extents.min_lon, -10.0);
    assert_eq!(extents.max_lat, 5.0);
}

#[test]
fn test_new_inverted_longitude() {
    let result = Extents::new(10.0, 0.0, -10.0, 1.0);
    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        ExtentsError::InvertedLongitude(_, _)
    ));
}

#[test]
fn test_new_inverted_latitude() {
    let result = Extents::new(0.0, 5.0, 1.0, -5.0);
    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        ExtentsError::InvertedLatitude(_, _)
    ));
}

#[test]
fn test_new_rejects_nan_bounds() {
    // NaN satisfies neither min <= max nor min > max; the ordered check
    // must reject it rather than admit an extents nothing can intersect
    assert!(matches!(
        Extents::new(f64::NAN, 0.0, 1.0, 1.0),
        Err(ExtentsError::InvertedLongitude(_, _))
    ));
    assert!(matches!(
        Extents::new(0.0, 0.0, f64::NAN, 1.0),
        Err(ExtentsError::InvertedLongitude(_, _))
    ));
    assert!(matches!(
        Extents::new(0.0, f64::NAN, 1.0, 1.0),
        Err(ExtentsError::InvertedLatitude(_, _))
    ));
    assert!(matches!(
        Extents::new(0.0, 0.0, 1.0, f64::NAN),
        Err(ExtentsError::InvertedLatitude(_, _))
    ));
}

#[test]
fn test_width_and_height() {
    let extents = Extents::new(-10.0, -5.0, 30.0, 15.0).unwrap();
    assert_eq!(extents.width(), 40.0);
    assert_eq!(extents.height(), 20.0);
}

#[test]
fn test_intersects_overlapping() {
    let a = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let b = Extents::new(5.0, 5.0, 15.0, 15.0).unwrap();
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_intersects_disjoint() {
    let a = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let b = Extents::new(11.0, 0.0, 20.0, 10.0).unwrap();
    assert!(!a.intersects(&b));
    assert!(!b.intersects(&a));
}

#[test]
fn test_intersects_touching_edge() {
    // Shared eastern/western edge at lon 10: closed bounds, so these intersect
    let a = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let b = Extents::new(10.0, 0.0, 20.0, 10.0).unwrap();
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn test_intersects_touching_corner() {
    // Rectangles meeting at the single point (10, 10)
    let a = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let b = Extents::new(10.0, 10.0, 20.0, 20.0).unwrap();
    assert!(a.intersects(&b));
}

#[test]
fn test_degenerate_extents_intersect_what_they_touch() {
    // A zero-area extents behaves as the point it occupies
    let point = Extents::new(5.0, 5.0, 5.0, 5.0).unwrap();
    let inside = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let outside = Extents::new(6.0, 6.0, 10.0, 10.0).unwrap();

    assert!(point.intersects(&inside));
    assert!(!point.intersects(&outside));
}

#[test]
fn test_contains_closed_bounds() {
    let extents = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    assert!(extents.contains(5.0, 5.0));
    assert!(extents.contains(0.0, 0.0), "Corner point lies on the boundary");
    assert!(extents.contains(10.0, 10.0));
    assert!(!extents.contains(10.1, 5.0));
}

#[test]
fn test_union_covers_both() {
    let a = Extents::new(0.0, 0.0, 10.0, 10.0).unwrap();
    let b = Extents::new(5.0, -5.0, 20.0, 5.0).unwrap();

    let u = a.union(&b);
    assert_eq!(u.min_lon, 0.0);
    assert_eq!(u.min_lat, -5.0);
    assert_eq!(u.max_lon, 20.0);
    assert_eq!(u.max_lat, 10.0);
}

#[test]
fn test_union_of_disjoint_spans_gap() {
    let a = Extents::new(-20.0, -20.0, -10.0, -10.0).unwrap();
    let b = Extents::new(10.0, 10.0, 20.0, 20.0).unwrap();

    let u = a.union(&b);
    assert_eq!(u.width(), 40.0);
    assert_eq!(u.height(), 40.0);
}

#[test]
fn test_world_intersects_any_valid_extents() {
    let box_a = Extents::new(-1.0, -1.0, 1.0, 1.0).unwrap();
    assert!(Extents::WORLD.intersects(&box_a));
    assert!(Extents::WORLD.contains(0.0, 0.0));
}

proptest! {
    #[test]
    fn prop_union_contains_both_inputs(
        a1 in -180.0f64..180.0,
        a2 in -180.0f64..180.0,
        b1 in -90.0f64..90.0,
        b2 in -90.0f64..90.0,
        c1 in -180.0f64..180.0,
        c2 in -180.0f64..180.0,
        d1 in -90.0f64..90.0,
        d2 in -90.0f64..90.0,
    ) {
        let a = Extents::new(a1.min(a2), b1.min(b2), a1.max(a2), b1.max(b2)).unwrap();
        let b = Extents::new(c1.min(c2), d1.min(d2), c1.max(c2), d1.max(d2)).unwrap();

        let u = a.union(&b);
        prop_assert!(u.contains(a.min_lon, a.min_lat));
        prop_assert!(u.contains(a.max_lon, a.max_lat));
        prop_assert!(u.contains(b.min_lon, b.min_lat));
        prop_assert!(u.contains(b.max_lon, b.max_lat));
    }

    #[test]
    fn prop_intersects_is_symmetric(
        a1 in -180.0f64..180.0,
        a2 in -180.0f64..180.0,
        b1 in -90.0f64..90.0,
        b2 in -90.0f64..90.0,
        c1 in -180.0f64..180.0,
        c2 in -180.0f64..180.0,
        d1 in -90.0f64..90.0,
        d2 in -90.0f64..90.0,
    ) {
        let a = Extents::new(a1.min(a2), b1.min(b2), a1.max(a2), b1.max(b2)).unwrap();
        let b = Extents::new(c1.min(c2), d1.min(d2), c1.max(c2), d1.max(d2)).unwrap();

        prop_assert_eq!(a.intersects(&b), b.intersects(&a));
    }
}
