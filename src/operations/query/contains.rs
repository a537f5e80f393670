use tracing::warn;

use crate::error::Result;
use crate::geometry::Ring;
use crate::math::kernel::{KernelKind, Orientation};
use crate::math::polygon_2d::BoundedSide;
use crate::math::{to_2d, Point2, Point3};
use crate::topology::{FaceId, System};

/// Tests whether a point lies within a face, holes excluded.
///
/// Points on the outer boundary count as within. Points strictly inside a
/// hole do not; points on a hole boundary do. Holes are tested recursively,
/// so an island inside a hole counts as within again. A hole that is not
/// simple reports every point as inside it.
pub struct NodeWithinFace {
    face: FaceId,
    point: Point3,
    kernel: KernelKind,
}

impl NodeWithinFace {
    /// Creates a new `NodeWithinFace` query.
    #[must_use]
    pub fn new(face: FaceId, point: Point3) -> Self {
        Self {
            face,
            point,
            kernel: KernelKind::Exact,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Executes the query. A face whose outer boundary is not simple reports
    /// `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face, a hole or a node is not found.
    pub fn execute(&self, system: &System) -> Result<bool> {
        within(system, self.face, &to_2d(&self.point), self.kernel, false)
    }
}

/// With `strict`, boundary points are not within. A ring that is not simple
/// contains every point.
fn within(
    system: &System,
    face: FaceId,
    p: &Point2,
    kernel: KernelKind,
    strict: bool,
) -> Result<bool> {
    let ring = Ring::from_points(&system.node_points(face)?);
    if !ring.is_simple(kernel) {
        warn!(?face, "polygon is not simple, cannot perform node within face");
        return Ok(true);
    }

    match ring
        .oriented(Orientation::CounterClockwise, kernel)
        .bounded_side(p, kernel)
    {
        BoundedSide::Outside => return Ok(false),
        BoundedSide::OnBoundary if strict => return Ok(false),
        BoundedSide::OnBoundary | BoundedSide::Inside => {}
    }

    for &hole in system.hole_ids(face)? {
        if within(system, hole, p, kernel, true)? {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn holed_square(system: &mut System) -> FaceId {
        let face = system.add_face_from_points(
            &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            None,
        );
        let hole = [p(4.0, 4.0), p(6.0, 4.0), p(6.0, 6.0), p(4.0, 6.0)]
            .iter()
            .map(|q| system.add_node(*q))
            .collect();
        system.add_hole(face, hole).unwrap();
        face
    }

    #[test]
    fn point_in_hole_is_outside() {
        let mut system = System::new();
        let face = holed_square(&mut system);
        assert!(!NodeWithinFace::new(face, p(5.0, 5.0)).execute(&system).unwrap());
        assert!(NodeWithinFace::new(face, p(1.0, 1.0)).execute(&system).unwrap());
    }

    #[test]
    fn boundaries_count_as_within() {
        let mut system = System::new();
        let face = holed_square(&mut system);
        assert!(NodeWithinFace::new(face, p(10.0, 5.0)).execute(&system).unwrap());
        assert!(NodeWithinFace::new(face, p(4.0, 5.0)).execute(&system).unwrap());
        assert!(!NodeWithinFace::new(face, p(11.0, 5.0)).execute(&system).unwrap());
    }

    #[test]
    fn clockwise_face_is_normalized() {
        let mut system = System::new();
        let face = system.add_face_from_points(
            &[p(0.0, 0.0), p(0.0, 2.0), p(2.0, 2.0), p(2.0, 0.0)],
            None,
        );
        assert!(NodeWithinFace::new(face, p(1.0, 1.0)).execute(&system).unwrap());
    }

    #[test]
    fn non_simple_face_fails_open() {
        let mut system = System::new();
        let face = system.add_face_from_points(
            &[p(0.0, 0.0), p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0)],
            None,
        );
        assert!(NodeWithinFace::new(face, p(50.0, 50.0)).execute(&system).unwrap());
    }

    #[test]
    fn island_in_hole_is_within() {
        let mut system = System::new();
        let face = holed_square(&mut system);
        let hole = system.hole_ids(face).unwrap()[0];
        let island = [p(4.5, 4.5), p(5.5, 4.5), p(5.5, 5.5), p(4.5, 5.5)]
            .iter()
            .map(|q| system.add_node(*q))
            .collect();
        system.add_hole(hole, island).unwrap();

        assert!(NodeWithinFace::new(face, p(5.0, 5.0)).execute(&system).unwrap());
        assert!(!NodeWithinFace::new(face, p(4.2, 4.2)).execute(&system).unwrap());
    }

    #[test]
    fn non_simple_hole_excludes_point() {
        let mut system = System::new();
        let face = system.add_face_from_points(
            &[p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            None,
        );
        let bowtie = [p(2.0, 2.0), p(6.0, 6.0), p(6.0, 2.0), p(2.0, 6.0)]
            .iter()
            .map(|q| system.add_node(*q))
            .collect();
        system.add_hole(face, bowtie).unwrap();

        assert!(!NodeWithinFace::new(face, p(4.0, 3.0)).execute(&system).unwrap());
        assert!(!NodeWithinFace::new(face, p(8.0, 8.0)).execute(&system).unwrap());
    }
}
