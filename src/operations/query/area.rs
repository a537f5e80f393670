use crate::error::Result;
use crate::geometry::Ring;
use crate::topology::{FaceId, System};

/// Computes the net planar area of a face: outer area minus hole areas.
///
/// Ring orientation does not matter; every ring contributes its absolute
/// area.
pub struct Area2D {
    face: FaceId,
}

impl Area2D {
    /// Creates a new `Area2D` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the face, a hole or a node is not found.
    pub fn execute(&self, system: &System) -> Result<f64> {
        let mut area = Ring::from_points(&system.node_points(self.face)?).area();
        for &hole in system.hole_ids(self.face)? {
            area -= Ring::from_points(&system.node_points(hole)?).area();
        }
        Ok(area)
    }
}
