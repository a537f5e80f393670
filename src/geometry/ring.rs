use crate::math::kernel::{KernelKind, Orientation};
use crate::math::polygon_2d::{
    bounded_side, is_simple, ring_orientation, ring_signed_area, BoundedSide,
};
use crate::math::{to_2d, to_3d, Point2, Point3};

/// A closed planar ring, stored without a repeated closing vertex.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ring {
    points: Vec<Point2>,
}

impl Ring {
    /// Creates a ring, dropping consecutive duplicates and a repeated closing point.
    #[must_use]
    pub fn new(mut points: Vec<Point2>) -> Self {
        points.dedup();
        while points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Self { points }
    }

    /// Creates a ring from 3D points projected onto the XY plane.
    #[must_use]
    pub fn from_points(points: &[Point3]) -> Self {
        Self::new(points.iter().map(to_2d).collect())
    }

    /// The ring vertices in order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the ring has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the directed edges `(p[i], p[i + 1])`, closing edge included.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed area, positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        ring_signed_area(&self.points)
    }

    /// Unsigned area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    #[must_use]
    pub fn orientation(&self, kernel: KernelKind) -> Orientation {
        ring_orientation(&self.points, kernel)
    }

    #[must_use]
    pub fn is_simple(&self, kernel: KernelKind) -> bool {
        is_simple(&self.points, kernel)
    }

    /// Reverses the traversal direction in place.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Returns the ring traversed in `target` orientation.
    #[must_use]
    pub fn oriented(mut self, target: Orientation, kernel: KernelKind) -> Self {
        if self.orientation(kernel) == target.reversed() {
            self.reverse();
        }
        self
    }

    #[must_use]
    pub fn bounded_side(&self, p: &Point2, kernel: KernelKind) -> BoundedSide {
        bounded_side(&self.points, p, kernel)
    }

    /// Vertices lifted to 3D at `z = 0`.
    #[must_use]
    pub fn to_points_3d(&self) -> Vec<Point3> {
        self.points.iter().map(to_3d).collect()
    }
}
