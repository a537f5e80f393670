use tracing::debug;

use crate::math::distance_2d::{angle_between, distance_2d};
use crate::math::hull::convex_hull;
use crate::math::{to_2d, to_3d, Point2, Point3, Vector2};

/// A minimum-area oriented rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBox {
    /// Corners counter-clockwise, z = 0. Empty for degenerate input.
    pub corners: Vec<Point3>,
    /// `[length, width]` with `length >= width`. Empty for degenerate input.
    pub size: Vec<f64>,
    /// Angle in degrees between the x axis and the long side; `-1` for
    /// degenerate input.
    pub angle: f64,
}

impl OrientedBox {
    fn degenerate() -> Self {
        Self {
            corners: Vec::new(),
            size: Vec::new(),
            angle: -1.0,
        }
    }

    /// Returns `false` for the degenerate sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.corners.len() == 4
    }
}

/// Computes the minimum-area bounding rectangle of a point set by rotating
/// calipers over its convex hull.
pub struct MinBoundingBox {
    points: Vec<Point3>,
}

impl MinBoundingBox {
    /// Creates a new `MinBoundingBox` query.
    #[must_use]
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    /// Executes the query.
    ///
    /// Fewer than three distinct points or collinear input yield the
    /// degenerate sentinel.
    #[must_use]
    pub fn execute(&self) -> OrientedBox {
        let mut points: Vec<Point2> = self.points.iter().map(to_2d).collect();
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        let Some(hull) = convex_hull(&points) else {
            debug!(points = points.len(), "degenerate hull, no bounding box");
            return OrientedBox::degenerate();
        };
        let Some(corners) = min_rectangle(&hull) else {
            return OrientedBox::degenerate();
        };

        let mut length = distance_2d(&corners[0], &corners[1]);
        let mut width = distance_2d(&corners[0], &corners[3]);
        let mut angle = angle_between(&Vector2::x(), &(corners[1] - corners[0])).to_degrees();
        if length < width {
            angle += 90.0;
            std::mem::swap(&mut length, &mut width);
        }

        OrientedBox {
            corners: corners.iter().map(to_3d).collect(),
            size: vec![length, width],
            angle,
        }
    }
}

/// Rotating calipers: one candidate rectangle per hull edge, flush with it.
///
/// `hull` must be counter-clockwise. The corners come back
/// counter-clockwise, corner 0 to 1 along the supporting edge.
fn min_rectangle(hull: &[Point2]) -> Option<[Point2; 4]> {
    let n = hull.len();
    if n < 3 {
        return None;
    }

    let mut best: Option<(f64, [Point2; 4])> = None;
    for i in 0..n {
        let origin = hull[i];
        let edge = hull[(i + 1) % n] - origin;
        let len = edge.norm();
        if len == 0.0 {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let (mut s_min, mut s_max, mut t_max) = (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64);
        for q in hull {
            let d = q - origin;
            let s = u.dot(&d);
            s_min = s_min.min(s);
            s_max = s_max.max(s);
            t_max = t_max.max(v.dot(&d));
        }

        let area = (s_max - s_min) * t_max;
        if best.as_ref().is_none_or(|(a, _)| area < *a) {
            let c0 = origin + u * s_min;
            let c1 = origin + u * s_max;
            best = Some((area, [c0, c1, c1 + v * t_max, c0 + v * t_max]));
        }
    }

    best.map(|(_, corners)| corners)
}
