use tracing::warn;

use crate::geometry::Ring;
use crate::math::kernel::{KernelKind, Orientation};
use crate::math::Point3;

/// Tests whether a node loop runs counter-clockwise.
pub struct CheckOrientation {
    points: Vec<Point3>,
    kernel: KernelKind,
}

impl CheckOrientation {
    /// Creates a new `CheckOrientation` query.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self {
            points,
            kernel: KernelKind::Exact,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Returns `true` for a counter-clockwise loop.
    ///
    /// A loop that is not simple has no orientation and reports `true`.
    #[must_use]
    pub fn execute(&self) -> bool {
        let ring = Ring::from_points(&self.points);
        if !ring.is_simple(self.kernel) {
            warn!("polygon is not simple, cannot check orientation");
            return true;
        }
        ring.orientation(self.kernel) != Orientation::Clockwise
    }
}
