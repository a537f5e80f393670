use tracing::debug;

use crate::error::Result;
use crate::math::kernel::KernelKind;
use crate::topology::{FaceId, System};

use super::boolean_face::BooleanFace;
use super::select::BooleanOp;

/// Replaces a face with holes by the region its holes leave over.
///
/// The outer boundary is copied as a hole-free face, then every hole is
/// subtracted in turn from all fragments produced so far. A hole that lies
/// strictly inside a fragment comes back as a hole of the difference; a hole
/// touching the boundary cuts the fragment open.
pub struct CleanFace {
    face: FaceId,
    kernel: KernelKind,
}

impl CleanFace {
    /// Creates a new `CleanFace` operation.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self {
            face,
            kernel: KernelKind::Exact,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Executes the operation and returns the final fragments.
    ///
    /// # Errors
    ///
    /// Returns an error if the face, a hole or a node is not found.
    pub fn execute(&self, system: &mut System) -> Result<Vec<FaceId>> {
        let points = system.node_points(self.face)?;
        let view = system.face(self.face)?.view.clone();
        let holes = system.hole_ids(self.face)?.to_vec();

        let mut fragments = vec![system.add_face_from_points(&points, view.as_deref())];

        for hole in holes {
            let mut next = Vec::new();
            for fragment in fragments {
                let pieces = BooleanFace::new(fragment, hole, BooleanOp::Difference)
                    .with_kernel(self.kernel)
                    .execute(system)?;
                debug!(pieces = pieces.len(), "hole subtracted from fragment");
                next.extend(pieces);
            }
            fragments = next;
        }

        Ok(fragments)
    }
}
