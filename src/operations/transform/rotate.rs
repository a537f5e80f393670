use nalgebra::Rotation2;

use crate::math::{Point2, Point3};

/// Rotates points about the origin in the XY plane.
pub struct RotateNodes {
    points: Vec<Point3>,
    angle: f64,
}

impl RotateNodes {
    /// Creates a new `RotateNodes` operation.
    ///
    /// * `angle` - Rotation angle in degrees, counter-clockwise.
    #[must_use]
    pub fn new(points: Vec<Point3>, angle: f64) -> Self {
        Self { points, angle }
    }

    /// Executes the rotation; z coordinates pass through unchanged.
    #[must_use]
    pub fn execute(&self) -> Vec<Point3> {
        let rot = Rotation2::new(self.angle.to_radians());
        self.points
            .iter()
            .map(|p| {
                let q = rot * Point2::new(p.x, p.y);
                Point3::new(q.x, q.y, p.z)
            })
            .collect()
    }
}
