use tracing::{debug, warn};

use crate::geometry::Ring;
use crate::math::kernel::{KernelKind, Orientation};
use crate::math::polygon_2d::{remove_collinear, ring_signed_area};
use crate::math::{to_3d, Point2, Point3};

use super::skeleton::Wavefront;

/// Offsets a closed node loop by a signed distance.
///
/// Positive distances shrink the polygon, negative distances grow it with
/// mitered corners. A shrinking polygon may split into several loops.
pub struct OffsetPolygon {
    points: Vec<Point3>,
    distance: f64,
    kernel: KernelKind,
}

impl OffsetPolygon {
    /// Creates a new `OffsetPolygon` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, distance: f64) -> Self {
        Self {
            points,
            distance,
            kernel: KernelKind::Inexact,
        }
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Executes the offset; every resulting loop is counter-clockwise with
    /// z = 0.
    ///
    /// A zero distance returns the input loop. A loop that is not simple
    /// yields nothing.
    #[must_use]
    pub fn execute(&self) -> Vec<Vec<Point3>> {
        if self.distance == 0.0 {
            return vec![self.points.iter().map(|p| Point3::new(p.x, p.y, 0.0)).collect()];
        }

        let ring = Ring::from_points(&self.points);
        if !ring.is_simple(self.kernel) {
            warn!("polygon is not simple, cannot perform offset");
            return Vec::new();
        }

        let outward = self.distance < 0.0;
        let target = if outward {
            Orientation::Clockwise
        } else {
            Orientation::CounterClockwise
        };
        let ring = ring.oriented(target, self.kernel);
        let points = remove_collinear(ring.points().to_vec(), self.kernel);

        let Some(mut front) = Wavefront::new(&points) else {
            return Vec::new();
        };
        front.run_until(self.distance.abs());

        let tolerance = offset_tolerance(&points);
        let loops: Vec<Vec<Point3>> = front
            .loops()
            .into_iter()
            .filter_map(|mut ring| {
                if outward {
                    ring.reverse();
                }
                let ring = clean_loop(ring, tolerance);
                (ring.len() >= 3 && ring_signed_area(&ring) > 0.0)
                    .then(|| ring.iter().map(to_3d).collect())
            })
            .collect();

        debug!(loops = loops.len(), distance = self.distance, "offset done");
        loops
    }
}

fn offset_tolerance(points: &[Point2]) -> f64 {
    1e-9 * points
        .iter()
        .flat_map(|p| [p.x.abs(), p.y.abs()])
        .fold(1.0_f64, f64::max)
}

/// Drops vertices that coincide with their successor or sit on the line
/// through their neighbours, both within `tolerance`.
fn clean_loop(mut ring: Vec<Point2>, tolerance: f64) -> Vec<Point2> {
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let base = next - prev;
            let dup = (cur - prev).norm() <= tolerance || (next - cur).norm() <= tolerance;
            let off_line = if base.norm() > tolerance {
                base.perp(&(cur - prev)).abs() / base.norm()
            } else {
                (cur - prev).norm()
            };
            if dup || off_line <= tolerance {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
    ring
}
