use tracing::warn;

use crate::error::Result;
use crate::math::distance_2d::min_coordinates;
use crate::math::{Point3, Vector3};
use crate::topology::{FaceId, System};

use super::orientation::CheckOrientation;

/// Computes the arithmetic mean of a face's boundary nodes.
pub struct Centroid {
    face: FaceId,
}

impl Centroid {
    /// Creates a new `Centroid` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query. A face without nodes yields the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its nodes is not found.
    pub fn execute(&self, system: &System) -> Result<Point3> {
        Ok(self.mean(system)?.unwrap_or_else(Point3::origin))
    }

    /// Writes the centroid coordinates to `out`.
    ///
    /// `out` is left untouched when the face has no nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its nodes is not found.
    pub fn execute_into(&self, system: &System, out: &mut [f64; 3]) -> Result<()> {
        if let Some(c) = self.mean(system)? {
            *out = [c.x, c.y, c.z];
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self, system: &System) -> Result<Option<Point3>> {
        let points = system.node_points(self.face)?;
        if points.is_empty() {
            warn!(face = ?self.face, "no nodes given, cannot compute centroid");
            return Ok(None);
        }
        let sum: Vector3 = points.iter().map(|p| p.coords).sum();
        Ok(Some(Point3::from(sum / points.len() as f64)))
    }
}

/// Computes the area centroid of a face's outer boundary in the XY plane.
///
/// Coordinates are shifted by the minimum coordinate of the boundary before
/// the first-moment sums and shifted back afterwards, which keeps the
/// products small for faces far from the origin. The z coordinate is taken
/// from the first node.
pub struct Centroid2D {
    face: FaceId,
}

impl Centroid2D {
    /// Creates a new `Centroid2D` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query. Boundaries with fewer than three nodes, or with
    /// zero area, yield the origin.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its nodes is not found.
    pub fn execute(&self, system: &System) -> Result<Point3> {
        let mut points = system.node_points(self.face)?;
        if points.len() < 3 {
            return Ok(Point3::origin());
        }

        if !CheckOrientation::new(points.clone()).execute() {
            points.reverse();
        }
        let z = points[0].z;
        let offset = min_coordinates(&points);

        let closed = points.first() == points.last();
        let shifted: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p.x - offset.x, p.y - offset.y))
            .collect();

        let (mut area2, mut cx, mut cy) = (0.0, 0.0, 0.0);
        let mut add = |(x0, y0): (f64, f64), (x1, y1): (f64, f64)| {
            let cross = x0 * y1 - x1 * y0;
            area2 += cross;
            cx += (x0 + x1) * cross;
            cy += (y0 + y1) * cross;
        };
        for pair in shifted.windows(2) {
            add(pair[0], pair[1]);
        }
        if !closed {
            add(shifted[shifted.len() - 1], shifted[0]);
        }

        if area2 == 0.0 {
            warn!(face = ?self.face, "face has zero area, cannot compute centroid");
            return Ok(Point3::origin());
        }
        let a6 = area2 * 3.0;
        Ok(Point3::new(cx / a6 + offset.x, cy / a6 + offset.y, z))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn mean_of_nodes() {
        let mut system = System::new();
        let face = system.add_face_from_points(
            &[Point3::new(0.0, 0.0, 1.0), Point3::new(4.0, 0.0, 1.0), Point3::new(4.0, 2.0, 4.0)],
            None,
        );
        let c = Centroid::new(face).execute(&system).unwrap();
        assert_abs_diff_eq!(c.x, 8.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.z, 2.0, epsilon = 1e-12);

        let mut out = [0.0; 3];
        Centroid::new(face).execute_into(&system, &mut out).unwrap();
        assert_abs_diff_eq!(out[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_face_yields_origin_and_untouched_buffer() {
        let mut system = System::new();
        let face = system.add_face(Vec::new(), None);
        assert_eq!(Centroid::new(face).execute(&system).unwrap(), Point3::origin());

        let mut out = [7.0, 8.0, 9.0];
        Centroid::new(face).execute_into(&system, &mut out).unwrap();
        assert_eq!(out, [7.0, 8.0, 9.0]);
    }

    #[test]
    fn area_centroid_of_l_shape() {
        let mut system = System::new();
        // Unit squares at (0..2, 0..1) and (0..1, 1..2): area 3.
        let face = system.add_face_from_points(
            &[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(1.0, 1.0), p(1.0, 2.0), p(0.0, 2.0)],
            None,
        );
        let c = Centroid2D::new(face).execute(&system).unwrap();
        assert_abs_diff_eq!(c.x, 5.0 / 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, 5.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn area_centroid_is_orientation_independent() {
        let mut system = System::new();
        let ccw = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(0.0, 2.0)];
        let mut cw = ccw;
        cw.reverse();
        let a = system.add_face_from_points(&ccw, None);
        let b = system.add_face_from_points(&cw, None);
        let ca = Centroid2D::new(a).execute(&system).unwrap();
        let cb = Centroid2D::new(b).execute(&system).unwrap();
        assert_abs_diff_eq!(ca.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ca.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(ca.x, cb.x, epsilon = 1e-12);
        assert_abs_diff_eq!(ca.y, cb.y, epsilon = 1e-12);
    }

    #[test]
    fn area_centroid_far_from_origin() {
        let mut system = System::new();
        let (x, y) = (2_600_000.0, 1_200_000.0);
        let face = system.add_face_from_points(
            &[
                Point3::new(x, y, 5.0),
                Point3::new(x + 1.0, y, 5.0),
                Point3::new(x + 1.0, y + 1.0, 5.0),
                Point3::new(x, y + 1.0, 5.0),
                Point3::new(x, y, 5.0),
            ],
            None,
        );
        let c = Centroid2D::new(face).execute(&system).unwrap();
        assert_abs_diff_eq!(c.x, x + 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, y + 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(c.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn short_boundary_yields_origin() {
        let mut system = System::new();
        let face = system.add_face_from_points(&[p(1.0, 1.0), p(2.0, 2.0)], None);
        assert_eq!(Centroid2D::new(face).execute(&system).unwrap(), Point3::origin());
    }
}
