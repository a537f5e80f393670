use tracing::debug;

use crate::error::Result;
use crate::math::kernel::KernelKind;
use crate::topology::{FaceId, System};

use super::boolean_face::IntersectFace;

/// Tests whether two faces share interior area.
///
/// The faces are copied into a scratch system and intersected there, so the
/// caller's system is never touched. Faces that only meet along edges, such
/// as a patch filling a hole exactly, do not intersect.
pub struct FacesIntersect {
    face_a: FaceId,
    face_b: FaceId,
    kernel: KernelKind,
}

impl FacesIntersect {
    /// Creates a new `FacesIntersect` test.
    #[must_use]
    pub fn new(face_a: FaceId, face_b: FaceId) -> Self {
        Self {
            face_a,
            face_b,
            kernel: KernelKind::Exact,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Executes the test.
    ///
    /// # Errors
    ///
    /// Returns an error if either face or their nodes are not found.
    pub fn execute(&self, system: &System) -> Result<bool> {
        let mut scratch = System::new();
        let a = system.copy_face_into(self.face_a, &mut scratch)?;
        let b = system.copy_face_into(self.face_b, &mut scratch)?;

        let faces = IntersectFace::new(a, b)
            .with_kernel(self.kernel)
            .execute(&mut scratch)?;
        debug!(faces = faces.len(), "scratch intersection");
        Ok(!faces.is_empty())
    }
}
