use super::{Point2, Point3, Vector2};

/// Euclidean distance between two points in the XY plane.
#[must_use]
pub fn distance_2d(a: &Point2, b: &Point2) -> f64 {
    (b - a).norm()
}

/// Unsigned angle between two vectors, in radians within `[0, pi]`.
///
/// Returns `0.0` if either vector has zero length.
#[must_use]
pub fn angle_between(u: &Vector2, v: &Vector2) -> f64 {
    let denom = u.norm() * v.norm();
    if denom < 1e-20 {
        return 0.0;
    }
    (u.dot(v) / denom).clamp(-1.0, 1.0).acos()
}

/// Per-axis minimum over a point set; the origin for an empty set.
#[must_use]
pub fn min_coordinates(points: &[Point3]) -> Point3 {
    let Some(first) = points.first() else {
        return Point3::origin();
    };
    points.iter().skip(1).fold(*first, |acc, p| {
        Point3::new(acc.x.min(p.x), acc.y.min(p.y), acc.z.min(p.z))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn right_angle() {
        let a = angle_between(&Vector2::new(1.0, 0.0), &Vector2::new(0.0, 3.0));
        assert_abs_diff_eq!(a, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn min_coordinates_per_axis() {
        let m = min_coordinates(&[
            Point3::new(3.0, -1.0, 2.0),
            Point3::new(-2.0, 4.0, 5.0),
            Point3::new(1.0, 0.0, -7.0),
        ]);
        assert_abs_diff_eq!(m.x, -2.0);
        assert_abs_diff_eq!(m.y, -1.0);
        assert_abs_diff_eq!(m.z, -7.0);
    }
}
