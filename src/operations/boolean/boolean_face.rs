use tracing::{debug, info};

use crate::error::{GeometryError, OperationError, PlanformError, Result};
use crate::geometry::polygon::OUTER_BOUNDARY;
use crate::geometry::PolygonWithHoles;
use crate::math::kernel::KernelKind;
use crate::math::DEDUP_TOLERANCE;
use crate::topology::{FaceId, System};

use super::assemble::materialize;
use super::engine::overlay;
use super::select::BooleanOp;

/// Applies a boolean operation to two faces, holes included.
///
/// Result faces (and their holes) are inserted into the system as new nodes
/// and faces; the operands are left untouched.
pub struct BooleanFace {
    face_a: FaceId,
    face_b: FaceId,
    op: BooleanOp,
    kernel: KernelKind,
    dedup_tolerance: f64,
    view: Option<String>,
}

impl BooleanFace {
    /// Creates a new `BooleanFace` operation computing `face_a op face_b`.
    #[must_use]
    pub fn new(face_a: FaceId, face_b: FaceId, op: BooleanOp) -> Self {
        Self {
            face_a,
            face_b,
            op,
            kernel: KernelKind::Exact,
            dedup_tolerance: DEDUP_TOLERANCE,
            view: None,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Sets the coordinate tolerance under which result vertices are merged.
    #[must_use]
    pub fn with_dedup_tolerance(mut self, tolerance: f64) -> Self {
        self.dedup_tolerance = tolerance;
        self
    }

    /// Tags the result faces with `view`.
    #[must_use]
    pub fn with_view(mut self, view: &str) -> Self {
        self.view = Some(view.to_owned());
        self
    }

    /// Executes the operation and returns the new faces.
    ///
    /// If a ring of either operand is not simple, nothing is produced.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a negative or non-finite
    /// dedup tolerance, or a topology error if an operand face, one of its
    /// holes or nodes is not found in the system.
    pub fn execute(&self, system: &mut System) -> Result<Vec<FaceId>> {
        if !self.dedup_tolerance.is_finite() || self.dedup_tolerance < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "dedup tolerance {}",
                self.dedup_tolerance
            ))
            .into());
        }
        let Some(a) = operand(system, self.face_a, self.kernel)? else {
            return Ok(Vec::new());
        };
        let Some(b) = operand(system, self.face_b, self.kernel)? else {
            return Ok(Vec::new());
        };

        let polygons = overlay(&a, &b, self.op, self.kernel);
        debug!(op = ?self.op, polygons = polygons.len(), "boolean overlay done");
        materialize(system, &polygons, self.view.as_deref(), self.dedup_tolerance)
    }
}

/// Builds a boolean operand, or `None` if one of its rings is degenerate or
/// not simple.
fn operand(
    system: &System,
    face: FaceId,
    kernel: KernelKind,
) -> Result<Option<PolygonWithHoles>> {
    match PolygonWithHoles::from_face(system, face, kernel) {
        Ok(polygon) => Ok(Some(polygon)),
        Err(PlanformError::Geometry(
            GeometryError::NotSimple(ring) | GeometryError::Degenerate(ring),
        )) => {
            if ring == OUTER_BOUNDARY {
                debug!(?face, "polygon is not simple, cannot perform boolean operation");
            } else {
                info!(?face, %ring, "hole is not simple, cannot perform boolean operation");
            }
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Computes the intersection of two faces.
pub struct IntersectFace {
    inner: BooleanFace,
}

impl IntersectFace {
    /// Creates a new `IntersectFace` operation.
    #[must_use]
    pub fn new(face_a: FaceId, face_b: FaceId) -> Self {
        Self {
            inner: BooleanFace::new(face_a, face_b, BooleanOp::Intersect),
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.inner = self.inner.with_kernel(kernel);
        self
    }

    #[must_use]
    pub fn with_view(mut self, view: &str) -> Self {
        self.inner = self.inner.with_view(view);
        self
    }

    /// Executes the intersection, creating the result faces in the system.
    ///
    /// # Errors
    ///
    /// Returns an error if an operand face or its nodes are not found.
    pub fn execute(&self, system: &mut System) -> Result<Vec<FaceId>> {
        self.inner.execute(system)
    }
}
