use super::kernel::{KernelKind, Orientation};
use super::{Point2, Vector2, TOLERANCE};

/// Result of intersecting two closed segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    None,
    /// The segments meet in a single point.
    Point(Point2),
    /// The segments are collinear and share a sub-segment, ordered along the first.
    Overlap(Point2, Point2),
}

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = d1.perp(d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dp = p2 - p1;
    let t = dp.perp(d2) / cross;
    let u = dp.perp(d1) / cross;
    Some((t, u))
}

/// Returns `true` if `p` lies on the closed segment `a -> b`.
#[must_use]
pub fn on_segment(p: &Point2, a: &Point2, b: &Point2, kernel: KernelKind) -> bool {
    kernel.orient2d(a, b, p) == Orientation::Collinear && within_box(p, a, b)
}

/// Returns `true` if the closed segments `a -> b` and `c -> d` share any point.
#[must_use]
pub fn segments_intersect(
    a: &Point2,
    b: &Point2,
    c: &Point2,
    d: &Point2,
    kernel: KernelKind,
) -> bool {
    let o1 = kernel.orient2d(a, b, c);
    let o2 = kernel.orient2d(a, b, d);
    let o3 = kernel.orient2d(c, d, a);
    let o4 = kernel.orient2d(c, d, b);

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == Orientation::Collinear && within_box(c, a, b))
        || (o2 == Orientation::Collinear && within_box(d, a, b))
        || (o3 == Orientation::Collinear && within_box(a, c, d))
        || (o4 == Orientation::Collinear && within_box(b, c, d))
}

/// Intersects the closed segments `a -> b` and `c -> d`.
///
/// Predicates use `kernel`; the crossing point of a proper intersection is
/// constructed in floating point. Touching endpoints are returned exactly.
#[must_use]
pub fn segment_intersection(
    a: &Point2,
    b: &Point2,
    c: &Point2,
    d: &Point2,
    kernel: KernelKind,
) -> SegmentIntersection {
    let o1 = kernel.orient2d(a, b, c);
    let o2 = kernel.orient2d(a, b, d);

    if o1 == Orientation::Collinear && o2 == Orientation::Collinear {
        return collinear_overlap(a, b, c, d);
    }

    let o3 = kernel.orient2d(c, d, a);
    let o4 = kernel.orient2d(c, d, b);

    if o1 == Orientation::Collinear && within_box(c, a, b) {
        return SegmentIntersection::Point(*c);
    }
    if o2 == Orientation::Collinear && within_box(d, a, b) {
        return SegmentIntersection::Point(*d);
    }
    if o3 == Orientation::Collinear && within_box(a, c, d) {
        return SegmentIntersection::Point(*a);
    }
    if o4 == Orientation::Collinear && within_box(b, c, d) {
        return SegmentIntersection::Point(*b);
    }

    let crosses = o1 != o2
        && o3 != o4
        && o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear;
    if !crosses {
        return SegmentIntersection::None;
    }

    match line_line_intersect_2d(a, &(b - a), c, &(d - c)) {
        Some((t, _)) => SegmentIntersection::Point(a + (b - a) * t.clamp(0.0, 1.0)),
        // Predicates say the segments cross, so they are far from parallel;
        // fall back to the midpoint of the closest endpoints just in case.
        None => SegmentIntersection::Point(nalgebra::center(a, c)),
    }
}

fn collinear_overlap(a: &Point2, b: &Point2, c: &Point2, d: &Point2) -> SegmentIntersection {
    let dir = b - a;
    let param = |p: &Point2| (p - a).dot(&dir);
    let len = dir.norm_squared();
    if len < TOLERANCE * TOLERANCE {
        return if within_box(a, c, d) {
            SegmentIntersection::Point(*a)
        } else {
            SegmentIntersection::None
        };
    }

    let (tc, td) = (param(c), param(d));
    let (lo_pt, lo, hi_pt, hi) = if tc <= td { (c, tc, d, td) } else { (d, td, c, tc) };
    let start = if lo > 0.0 { (*lo_pt, lo) } else { (*a, 0.0) };
    let end = if hi < len { (*hi_pt, hi) } else { (*b, len) };

    if start.1 > end.1 {
        SegmentIntersection::None
    } else if start.0 == end.0 || (end.1 - start.1) < TOLERANCE {
        SegmentIntersection::Point(start.0)
    } else {
        SegmentIntersection::Overlap(start.0, end.0)
    }
}

fn within_box(p: &Point2, a: &Point2, b: &Point2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
