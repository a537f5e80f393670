use spade::{DelaunayTriangulation, Point2 as SpadePoint2, Triangulation};

use super::kernel::{KernelKind, Orientation};
use super::polygon_2d::ring_signed_area;
use super::Point2;

/// Computes the convex hull of a point set, counter-clockwise.
///
/// The hull is read off the outer face of a Delaunay triangulation, so
/// duplicate points are merged and hull predicates are exact. Collinear
/// vertices along hull edges are removed.
///
/// Returns `None` if the hull is not a simple polygon: fewer than three
/// distinct points, all points collinear, or coordinates the triangulation
/// rejects (non-finite or out of range).
#[must_use]
pub fn convex_hull(points: &[Point2]) -> Option<Vec<Point2>> {
    let mut triangulation = DelaunayTriangulation::<SpadePoint2<f64>>::new();
    for p in points {
        triangulation.insert(SpadePoint2::new(p.x, p.y)).ok()?;
    }
    if triangulation.num_vertices() < 3 || triangulation.all_vertices_on_line() {
        return None;
    }

    let mut hull: Vec<Point2> = triangulation
        .convex_hull()
        .map(|edge| {
            let p = edge.from().position();
            Point2::new(p.x, p.y)
        })
        .collect();
    if ring_signed_area(&hull) < 0.0 {
        hull.reverse();
    }

    let hull = drop_collinear(&hull);
    (hull.len() >= 3).then_some(hull)
}

fn drop_collinear(ring: &[Point2]) -> Vec<Point2> {
    let n = ring.len();
    (0..n)
        .filter(|&i| {
            KernelKind::Exact.orient2d(&ring[(i + n - 1) % n], &ring[i], &ring[(i + 1) % n])
                != Orientation::Collinear
        })
        .map(|i| ring[i])
        .collect()
}
