//! Tests for connected component records.

use super::*;
use crate::error::ErrorKind;

fn pts(raw: &[(i32, i32)]) -> Vec<IVec2> {
    raw.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
}

/// 3x3 ring around (2, 2).
fn ring(connectivity: Connectivity) -> ConnectedComponent {
    ConnectedComponent::from_points(
        1,
        connectivity,
        pts(&[
            (1, 1),
            (2, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (2, 3),
            (3, 3),
        ]),
    )
}

#[test]
fn test_empty_record_reports_missing_features() {
    let c = ConnectedComponent::new(3, Connectivity::Eight);
    assert_eq!(c.label(), 3);
    assert_eq!(c.area().unwrap_err().kind(), ErrorKind::Precondition);
    assert_eq!(
        c.centroid().unwrap_err(),
        Error::MissingFeature {
            need: "point set",
            feature: "centroid"
        }
    );
    assert_eq!(
        c.extent().unwrap_err().to_string(),
        "Need at least point set or contour to compute bounding box"
    );
    assert!(c.points().is_err());
    assert!(c.contour().is_err());
    assert!(c.convex_hull().is_err());
    assert!(c.contains(IVec2::ZERO).is_err());
}

#[test]
fn test_from_points_sorts_and_dedups() {
    let c = ConnectedComponent::from_points(
        1,
        Connectivity::Four,
        pts(&[(2, 1), (0, 0), (1, 1), (0, 0)]),
    );
    assert_eq!(c.points().unwrap(), pts(&[(0, 0), (1, 1), (2, 1)]).as_slice());
    assert_eq!(c.size().unwrap(), 3);
}

#[test]
fn test_derived_values_from_points() {
    let c = ring(Connectivity::Eight);
    assert_eq!(c.area().unwrap(), 8);
    assert_eq!(c.centroid().unwrap(), DVec2::new(2.0, 2.0));
    assert_eq!(c.bounding_box().unwrap(), Rect::new(1, 1, 3, 3));
    assert!((c.extent().unwrap() - 9.0 / 8.0).abs() < 1e-12);
}

#[test]
fn test_centroid_narrows_to_f32() {
    let c = ConnectedComponent::from_points(1, Connectivity::Four, pts(&[(0, 0), (1, 0), (1, 1)]));
    let centroid = c.centroid().unwrap();
    assert!((centroid.x - 2.0 / 3.0).abs() < 1e-12);
    assert!((centroid.y - 1.0 / 3.0).abs() < 1e-12);
    let narrow = centroid.as_vec2();
    assert!((narrow.x - 2.0f32 / 3.0).abs() < 1e-6);
    assert!((narrow.y - 1.0f32 / 3.0).abs() < 1e-6);
    let extent: f64 = c.extent().unwrap();
    assert!((extent - 4.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_contains_uses_scan_order() {
    let c = ring(Connectivity::Eight);
    assert!(c.contains(IVec2::new(3, 2)).unwrap());
    assert!(!c.contains(IVec2::new(2, 2)).unwrap());
    assert!(!c.contains(IVec2::new(0, 0)).unwrap());
}

#[test]
fn test_contours_traced_on_demand() {
    let c = ring(Connectivity::Eight);
    assert_eq!(
        c.contour().unwrap(),
        pts(&[(1, 1), (2, 1), (3, 1), (3, 2), (3, 3), (2, 3), (1, 3), (1, 2)]).as_slice()
    );
    let inner = c.inner_contours().unwrap();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner[0], pts(&[(2, 1), (1, 2), (2, 3), (3, 2)]));
    assert!(!c.solid().unwrap());

    let block = ConnectedComponent::from_points(
        2,
        Connectivity::Four,
        pts(&[(5, 5), (6, 5), (5, 6), (6, 6)]),
    );
    assert!(block.solid().unwrap());
    assert_eq!(block.contour().unwrap().len(), 4);
}

#[test]
fn test_bounding_box_from_contour_only() {
    let c = ConnectedComponent::new(1, Connectivity::Eight);
    c.contour
        .set(pts(&[(4, 2), (6, 2), (6, 5), (4, 5)]))
        .unwrap();
    assert_eq!(c.bounding_box().unwrap(), Rect::new(4, 2, 3, 4));
}

#[test]
fn test_convex_hull_orientations() {
    let c = ring(Connectivity::Eight);
    let cw = c.convex_hull().unwrap().to_vec();
    assert_eq!(cw, pts(&[(1, 1), (3, 1), (3, 3), (1, 3)]));
    assert_eq!(
        c.convex_hull_ccw().unwrap(),
        pts(&[(1, 1), (1, 3), (3, 3), (3, 1)])
    );
}

#[test]
fn test_fill_adds_holes() {
    let mut c = ring(Connectivity::Eight);
    let before = c.centroid().unwrap();
    c.fill().unwrap();
    assert_eq!(c.area().unwrap(), 9);
    assert!(c.contains(IVec2::new(2, 2)).unwrap());
    assert!(c.solid().unwrap());
    assert_eq!(c.centroid().unwrap(), before);
    assert_eq!(c.extent().unwrap(), 1.0);
    assert_eq!(c.contour().unwrap().len(), 8);
}

#[test]
fn test_fill_respects_connectivity() {
    // ###
    // #.#
    // ##.
    let points = pts(&[
        (0, 0),
        (1, 0),
        (2, 0),
        (0, 1),
        (2, 1),
        (0, 2),
        (1, 2),
    ]);
    // 4-connected background cannot reach (1,1)
    let mut c = ConnectedComponent::from_points(1, Connectivity::Eight, points.clone());
    c.fill().unwrap();
    assert_eq!(c.area().unwrap(), 8);
    assert!(c.contains(IVec2::new(1, 1)).unwrap());
    assert!(!c.contains(IVec2::new(2, 2)).unwrap());

    // 8-connected background leaks in through (2,2)
    let mut c = ConnectedComponent::from_points(1, Connectivity::Four, points);
    c.fill().unwrap();
    assert_eq!(c.area().unwrap(), 7);
    assert!(!c.contains(IVec2::new(1, 1)).unwrap());
}

#[test]
fn test_fill_needs_points() {
    let mut c = ConnectedComponent::new(1, Connectivity::Eight);
    assert_eq!(c.fill().unwrap_err().kind(), ErrorKind::Precondition);
}

#[test]
fn test_merge() {
    let mut a = ConnectedComponent::from_points(4, Connectivity::Eight, pts(&[(0, 0), (1, 0)]));
    let b = ConnectedComponent::from_points(2, Connectivity::Eight, pts(&[(5, 5)]));
    assert_eq!(a.bounding_box().unwrap(), Rect::new(0, 0, 2, 1));
    a.merge(&b);
    assert_eq!(a.label(), 2);
    assert_eq!(a.area().unwrap(), 3);
    assert_eq!(a.points().unwrap(), pts(&[(0, 0), (1, 0), (5, 5)]).as_slice());
    assert_eq!(a.bounding_box().unwrap(), Rect::new(0, 0, 6, 6));
}

#[test]
fn test_merge_without_points_keeps_area() {
    let mut a = ConnectedComponent::new(1, Connectivity::Four);
    a.area = Some(5);
    let b = ConnectedComponent::from_points(2, Connectivity::Four, pts(&[(1, 1), (2, 1)]));
    a.merge(&b);
    assert_eq!(a.area().unwrap(), 7);
    assert!(a.points().is_err());
}

#[test]
fn test_distance() {
    let a = ConnectedComponent::from_points(1, Connectivity::Eight, pts(&[(0, 0), (1, 0)]));
    let b = ConnectedComponent::from_points(2, Connectivity::Eight, pts(&[(4, 4), (4, 0)]));
    assert_eq!(a.distance(&b).unwrap(), 3.0);
    assert_eq!(b.distance(&a).unwrap(), 3.0);
    let empty = ConnectedComponent::new(3, Connectivity::Eight);
    assert!(a.distance(&empty).is_err());
}

#[test]
fn test_fill_color() {
    let mut c = ConnectedComponent::new(1, Connectivity::Eight);
    assert_eq!(c.fill_color(), None);
    c.set_fill_color(Color::RED);
    assert_eq!(c.fill_color(), Some(Color::RED));
}
