use super::intersect_2d::{on_segment, segments_intersect};
use super::kernel::{KernelKind, Orientation};
use super::Point2;

/// Location of a point relative to a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundedSide {
    Inside,
    OnBoundary,
    Outside,
}

/// Signed area of a planar ring, positive for counter-clockwise.
///
/// Coordinates are taken relative to the first vertex, which keeps the
/// products small for rings far from the origin.
#[must_use]
pub fn ring_signed_area(ring: &[Point2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let o = ring[0];
    let mut sum = 0.0;
    for i in 1..n - 1 {
        sum += (ring[i] - o).perp(&(ring[i + 1] - o));
    }
    sum * 0.5
}

/// Orientation of a ring.
///
/// The sign of the area decides; a ring whose floating-point area is zero
/// falls back to the orientation at its lowest-leftmost vertex.
#[must_use]
pub fn ring_orientation(ring: &[Point2], kernel: KernelKind) -> Orientation {
    if ring.len() < 3 {
        return Orientation::Collinear;
    }
    let area = ring_signed_area(ring);
    if area > 0.0 {
        return Orientation::CounterClockwise;
    }
    if area < 0.0 {
        return Orientation::Clockwise;
    }
    let n = ring.len();
    let mut k = 0;
    for (i, p) in ring.iter().enumerate().skip(1) {
        let b = &ring[k];
        if p.y < b.y || (p.y == b.y && p.x < b.x) {
            k = i;
        }
    }
    kernel.orient2d(&ring[(k + n - 1) % n], &ring[k], &ring[(k + 1) % n])
}

/// Returns `true` if the ring is a simple polygon.
///
/// A simple ring has at least three vertices, non-adjacent edges that never
/// touch, and adjacent edges that share only their common vertex.
#[must_use]
pub fn is_simple(ring: &[Point2], kernel: KernelKind) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = &ring[i];
        let a1 = &ring[(i + 1) % n];
        if a0 == a1 {
            return false;
        }
        for j in (i + 1)..n {
            let b0 = &ring[j];
            let b1 = &ring[(j + 1) % n];
            if j == i + 1 {
                // Edges i and j share a1 == b0.
                if on_segment(b1, a0, a1, kernel) || on_segment(a0, b0, b1, kernel) {
                    return false;
                }
            } else if i == 0 && j == n - 1 {
                // Closing edge shares a0 == b1.
                if on_segment(b0, a0, a1, kernel) || on_segment(a1, b0, b1, kernel) {
                    return false;
                }
            } else if segments_intersect(a0, a1, b0, b1, kernel) {
                return false;
            }
        }
    }
    true
}

/// Classifies `p` against a closed ring of either orientation (crossing test).
#[must_use]
pub fn bounded_side(ring: &[Point2], p: &Point2, kernel: KernelKind) -> BoundedSide {
    let n = ring.len();
    if n < 3 {
        return BoundedSide::Outside;
    }
    let mut inside = false;
    for i in 0..n {
        let a = &ring[i];
        let b = &ring[(i + 1) % n];
        if on_segment(p, a, b, kernel) {
            return BoundedSide::OnBoundary;
        }
        if (a.y > p.y) != (b.y > p.y) {
            let o = kernel.orient2d(a, b, p);
            let crosses_right = if b.y > a.y {
                o == Orientation::CounterClockwise
            } else {
                o == Orientation::Clockwise
            };
            if crosses_right {
                inside = !inside;
            }
        }
    }
    if inside {
        BoundedSide::Inside
    } else {
        BoundedSide::Outside
    }
}

/// Removes vertices collinear with their neighbours, spikes included.
#[must_use]
pub fn remove_collinear(mut ring: Vec<Point2>, kernel: KernelKind) -> Vec<Point2> {
    let mut i = 0;
    let mut stable = 0;
    while ring.len() >= 3 && stable < ring.len() {
        let n = ring.len();
        let idx = i % n;
        let prev = ring[(idx + n - 1) % n];
        let next = ring[(idx + 1) % n];
        if kernel.orient2d(&prev, &ring[idx], &next) == Orientation::Collinear {
            ring.remove(idx);
            stable = 0;
        } else {
            i = idx + 1;
            stable += 1;
        }
    }
    ring
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
    }

    #[test]
    fn ring_area_far_from_origin() {
        let ring: Vec<Point2> = square()
            .iter()
            .map(|q| p(q.x + 5.0e6, q.y + 3.0e6))
            .collect();
        assert_abs_diff_eq!(ring_signed_area(&ring), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn orientation_of_square() {
        let mut ring = square();
        assert_eq!(ring_orientation(&ring, KernelKind::Exact), Orientation::CounterClockwise);
        ring.reverse();
        assert_eq!(ring_orientation(&ring, KernelKind::Exact), Orientation::Clockwise);
    }

    #[test]
    fn bowtie_is_not_simple() {
        let ring = vec![p(0.0, 0.0), p(10.0, 10.0), p(10.0, 0.0), p(0.0, 10.0)];
        assert!(!is_simple(&ring, KernelKind::Exact));
        assert!(is_simple(&square(), KernelKind::Exact));
    }

    #[test]
    fn collinear_triangle_is_not_simple() {
        let ring = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)];
        assert!(!is_simple(&ring, KernelKind::Exact));
    }

    #[test]
    fn ring_touching_itself_is_not_simple() {
        // Vertex (5, 0) touches the bottom edge from above.
        let ring = vec![
            p(0.0, 0.0),
            p(10.0, 0.0),
            p(10.0, 10.0),
            p(5.0, 0.0),
            p(0.0, 10.0),
        ];
        assert!(!is_simple(&ring, KernelKind::Exact));
    }

    #[test]
    fn collinear_vertices_are_removed() {
        let ring = remove_collinear(
            vec![p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            KernelKind::Exact,
        );
        assert_eq!(ring.len(), 4);
        assert!(!ring.contains(&p(5.0, 0.0)));
    }

    #[test]
    fn spike_is_removed() {
        // (10, 5) -> (12, 5) -> (10, 5) runs out and back along one line.
        let ring = remove_collinear(
            vec![
                p(0.0, 0.0),
                p(10.0, 0.0),
                p(10.0, 5.0),
                p(12.0, 5.0),
                p(10.0, 5.0),
                p(10.0, 10.0),
                p(0.0, 10.0),
            ],
            KernelKind::Exact,
        );
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn bounded_side_classification() {
        let ring = square();
        let k = KernelKind::Exact;
        assert_eq!(bounded_side(&ring, &p(5.0, 5.0), k), BoundedSide::Inside);
        assert_eq!(bounded_side(&ring, &p(10.0, 5.0), k), BoundedSide::OnBoundary);
        assert_eq!(bounded_side(&ring, &p(0.0, 0.0), k), BoundedSide::OnBoundary);
        assert_eq!(bounded_side(&ring, &p(15.0, 5.0), k), BoundedSide::Outside);
        let rev: Vec<Point2> = ring.into_iter().rev().collect();
        assert_eq!(bounded_side(&rev, &p(1.0, 9.0), k), BoundedSide::Inside);
    }
}
