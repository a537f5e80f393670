#![allow(clippy::unwrap_used)]

use std::sync::Once;

use approx::assert_abs_diff_eq;
use planform::math::{Point3, DEDUP_TOLERANCE};
use planform::operations::boolean::{CleanFace, FacesIntersect, IntersectFace};
use planform::operations::creation::ShapeFinder;
use planform::operations::offset::OffsetPolygon;
use planform::operations::query::{
    Area2D, CheckOrientation, Centroid2D, MinBoundingBox, NodeWithinFace,
};
use planform::operations::transform::RotateNodes;
use planform::topology::{FaceId, System};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .init();
    });
}

fn p(x: f64, y: f64) -> Point3 {
    Point3::new(x, y, 0.0)
}

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point3> {
    vec![p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]
}

fn area(system: &System, face: FaceId) -> f64 {
    Area2D::new(face).execute(system).unwrap()
}

fn square_with_hole(system: &mut System) -> FaceId {
    let face = system.add_face_from_points(&square(0.0, 0.0, 10.0, 10.0), None);
    let nodes = square(4.0, 4.0, 6.0, 6.0)
        .into_iter()
        .map(|q| system.add_node(q))
        .collect();
    system.add_hole(face, nodes).unwrap();
    face
}

#[test]
fn area_invariant_under_rotation_and_reversal() {
    init_tracing();
    let points = vec![p(0.0, 0.0), p(8.0, 0.0), p(8.0, 3.0), p(3.0, 3.0), p(3.0, 7.0), p(0.0, 7.0)];
    let mut rotated = points.clone();
    rotated.rotate_left(2);
    let mut reversed = points.clone();
    reversed.reverse();

    let mut system = System::new();
    let faces: Vec<FaceId> = [points, rotated, reversed]
        .iter()
        .map(|ring| system.add_face_from_points(ring, None))
        .collect();
    for face in faces {
        assert_abs_diff_eq!(area(&system, face), 36.0, epsilon = 1e-9);
    }
}

#[test]
fn orientation_flips_with_reversal() {
    init_tracing();
    let points = vec![p(0.0, 0.0), p(4.0, 1.0), p(5.0, 5.0), p(1.0, 4.0)];
    let mut reversed = points.clone();
    reversed.reverse();
    assert_ne!(
        CheckOrientation::new(points).execute(),
        CheckOrientation::new(reversed).execute()
    );
}

#[test]
fn square_with_hole_area() {
    init_tracing();
    let mut system = System::new();
    let face = square_with_hole(&mut system);
    assert_abs_diff_eq!(area(&system, face), 96.0, epsilon = 1e-9);
}

#[test]
fn overlapping_squares_intersect_to_quarter() {
    init_tracing();
    let mut system = System::new();
    let a = system.add_face_from_points(&square(0.0, 0.0, 10.0, 10.0), None);
    let b = system.add_face_from_points(&square(5.0, 5.0, 15.0, 15.0), None);

    let result = IntersectFace::new(a, b).execute(&mut system).unwrap();
    assert_eq!(result.len(), 1);
    assert_abs_diff_eq!(area(&system, result[0]), 25.0, epsilon = 1e-9);
    assert_eq!(system.face_nodes(result[0]).unwrap().len(), 4);
}

#[test]
fn intersection_is_idempotent() {
    init_tracing();
    let mut system = System::new();
    let a = system.add_face_from_points(&[p(0.0, 0.0), p(10.0, 0.0), p(6.0, 8.0)], None);
    let b = system.add_face_from_points(&square(2.0, 1.0, 12.0, 6.0), None);

    let first = IntersectFace::new(a, b).execute(&mut system).unwrap();
    assert_eq!(first.len(), 1);
    let second = IntersectFace::new(first[0], b).execute(&mut system).unwrap();
    assert_eq!(second.len(), 1);

    let before = system.node_points(first[0]).unwrap();
    let after = system.node_points(second[0]).unwrap();
    assert_eq!(before.len(), after.len());
    for q in &after {
        assert!(before.iter().any(|r| {
            (q.x - r.x).abs() <= DEDUP_TOLERANCE && (q.y - r.y).abs() <= DEDUP_TOLERANCE
        }));
    }
    assert_abs_diff_eq!(area(&system, first[0]), area(&system, second[0]), epsilon = 1e-9);
}

#[test]
fn faces_intersect_is_symmetric() {
    init_tracing();
    let mut system = System::new();
    let a = square_with_hole(&mut system);
    let b = system.add_face_from_points(&square(8.0, 8.0, 20.0, 20.0), None);
    let c = system.add_face_from_points(&square(4.5, 4.5, 5.5, 5.5), None);
    let d = system.add_face_from_points(&square(30.0, 30.0, 31.0, 31.0), None);

    for other in [b, c, d] {
        assert_eq!(
            FacesIntersect::new(a, other).execute(&system).unwrap(),
            FacesIntersect::new(other, a).execute(&system).unwrap()
        );
    }
    assert!(FacesIntersect::new(a, b).execute(&system).unwrap());
    assert!(!FacesIntersect::new(a, c).execute(&system).unwrap());
    assert!(!FacesIntersect::new(a, d).execute(&system).unwrap());
}

#[test]
fn zero_offset_returns_input() {
    init_tracing();
    let points = vec![p(0.0, 0.0), p(7.0, 0.0), p(7.0, 2.0), p(0.0, 5.0)];
    let loops = OffsetPolygon::new(points.clone(), 0.0).execute();
    assert_eq!(loops, vec![points]);
}

#[test]
fn outward_offset_grows_square() {
    init_tracing();
    let loops = OffsetPolygon::new(square(0.0, 0.0, 10.0, 10.0), -1.0).execute();
    assert_eq!(loops.len(), 1);
    let mut system = System::new();
    let face = system.add_face_from_points(&loops[0], None);
    assert_abs_diff_eq!(area(&system, face), 144.0, epsilon = 1e-6);
    for q in &loops[0] {
        assert_abs_diff_eq!(q.x.abs().max((q.x - 10.0).abs()), 11.0, epsilon = 1e-6);
        assert_abs_diff_eq!(q.y.abs().max((q.y - 10.0).abs()), 11.0, epsilon = 1e-6);
    }
}

#[test]
fn bounding_box_is_rectangle() {
    init_tracing();
    let cloud = vec![
        p(0.0, 0.0),
        p(6.0, 1.0),
        p(9.0, 4.0),
        p(5.0, 7.0),
        p(1.0, 5.0),
        p(4.0, 3.0),
    ];
    for angle in [0.0, 17.0, 63.0, 140.0] {
        let bbox = MinBoundingBox::new(RotateNodes::new(cloud.clone(), angle).execute()).execute();
        assert!(bbox.is_valid());
        assert!(bbox.size[0] >= bbox.size[1]);
        for i in 0..4 {
            let a = bbox.corners[i];
            let b = bbox.corners[(i + 1) % 4];
            let c = bbox.corners[(i + 2) % 4];
            let dot = (b - a).dot(&(c - b));
            assert_abs_diff_eq!(dot, 0.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn collinear_points_have_no_bounding_box() {
    init_tracing();
    let bbox = MinBoundingBox::new(vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)]).execute();
    assert_abs_diff_eq!(bbox.angle, -1.0);
    assert!(bbox.corners.is_empty());
    assert!(bbox.size.is_empty());
}

#[test]
fn membership_respects_holes() {
    init_tracing();
    let mut system = System::new();
    let face = square_with_hole(&mut system);
    assert!(!NodeWithinFace::new(face, p(5.0, 5.0)).execute(&system).unwrap());
    assert!(NodeWithinFace::new(face, p(1.0, 1.0)).execute(&system).unwrap());
    assert!(!NodeWithinFace::new(face, p(11.0, 1.0)).execute(&system).unwrap());
}

#[test]
fn centroid_far_from_origin() {
    init_tracing();
    let mut system = System::new();
    let face = system.add_face_from_points(
        &square(2_500_000.0, 1_200_000.0, 2_500_010.0, 1_200_004.0),
        None,
    );
    let c = Centroid2D::new(face).execute(&system).unwrap();
    assert_abs_diff_eq!(c.x, 2_500_005.0, epsilon = 1e-6);
    assert_abs_diff_eq!(c.y, 1_200_002.0, epsilon = 1e-6);
}

#[test]
fn grid_of_lines_yields_four_cells() {
    init_tracing();
    let mut system = System::new();
    for c in [0.0, 5.0, 10.0] {
        system.add_face_from_points(&[p(-2.0, c), p(12.0, c)], Some("walls"));
        system.add_face_from_points(&[p(c, -2.0), p(c, 12.0)], Some("walls"));
    }
    let out = ShapeFinder::new("walls", "rooms")
        .with_dangling_edge_removal(true)
        .execute(&system)
        .unwrap();
    let rooms = out.system.faces_in_view("rooms");
    assert_eq!(rooms.len(), 4);
    let total: f64 = rooms.iter().map(|&f| area(&out.system, f)).sum();
    assert_abs_diff_eq!(total, 100.0, epsilon = 1e-9);
}

#[test]
fn dangling_tail_is_pruned() {
    init_tracing();
    let mut system = System::new();
    system.add_face_from_points(&square(0.0, 0.0, 10.0, 10.0), Some("walls"));
    system.add_face_from_points(&[p(10.0, 10.0), p(15.0, 15.0)], Some("walls"));
    system.add_face_from_points(&[p(15.0, 15.0), p(20.0, 15.0)], Some("walls"));

    let out = ShapeFinder::new("walls", "rooms")
        .with_dangling_edge_removal(true)
        .execute(&system)
        .unwrap();
    let rooms = out.system.faces_in_view("rooms");
    assert_eq!(rooms.len(), 1);
    assert_eq!(out.system.face_nodes(rooms[0]).unwrap().len(), 4);
}

#[test]
fn snap_rounding_closes_near_square() {
    init_tracing();
    let mut system = System::new();
    system.add_face_from_points(&[p(0.0, 0.0), p(10.0, 0.0)], Some("walls"));
    system.add_face_from_points(&[p(10.02, 0.01), p(10.0, 10.0)], Some("walls"));
    system.add_face_from_points(&[p(10.0, 10.0), p(0.0, 10.0)], Some("walls"));
    system.add_face_from_points(&[p(0.0, 10.0), p(0.01, 0.03)], Some("walls"));

    let out = ShapeFinder::new("walls", "rooms")
        .with_snap_rounding(0.5)
        .execute(&system)
        .unwrap();
    assert_eq!(out.system.faces_in_view("rooms").len(), 1);
}

#[test]
fn clean_face_preserves_net_area() {
    init_tracing();
    let mut system = System::new();
    let face = square_with_hole(&mut system);
    let fragments = CleanFace::new(face).execute(&mut system).unwrap();
    let total: f64 = fragments.iter().map(|&f| area(&system, f)).sum();
    assert_abs_diff_eq!(total, 96.0, epsilon = 1e-9);

    let strip = system.add_face_from_points(&square(0.0, 0.0, 10.0, 10.0), None);
    let nodes = square(4.0, 0.0, 6.0, 10.0)
        .into_iter()
        .map(|q| system.add_node(q))
        .collect();
    system.add_hole(strip, nodes).unwrap();
    let halves = CleanFace::new(strip).execute(&mut system).unwrap();
    assert_eq!(halves.len(), 2);
    for half in halves {
        assert!(system.hole_ids(half).unwrap().is_empty());
        assert_abs_diff_eq!(area(&system, half), 40.0, epsilon = 1e-9);
    }
}
