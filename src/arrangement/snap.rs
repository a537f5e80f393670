use std::collections::HashSet;

use crate::math::intersect_2d::{segment_intersection, SegmentIntersection};
use crate::math::kernel::KernelKind;
use crate::math::Point2;

use super::Segment;

type Pixel = (i64, i64);

/// Snap-rounds `segments` onto a grid of square pixels of side `tolerance`.
///
/// Every pixel holding a segment endpoint or an intersection point is hot.
/// Each segment is replaced by the polyline through the centres of the hot
/// pixels it passes, in order along the segment. Endpoints closer than
/// `tolerance` thereby usually collapse to one point, and segments passing
/// near a vertex are bent through it.
#[must_use]
pub fn snap_round(segments: &[Segment], tolerance: f64, kernel: KernelKind) -> Vec<Segment> {
    if tolerance <= 0.0 {
        return segments.to_vec();
    }
    let grid = Grid { size: tolerance };

    let mut hot: HashSet<Pixel> = HashSet::new();
    for s in segments {
        hot.insert(grid.pixel(&s.start));
        hot.insert(grid.pixel(&s.end));
    }
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a, b) = (&segments[i], &segments[j]);
            match segment_intersection(&a.start, &a.end, &b.start, &b.end, kernel) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point(p) => {
                    hot.insert(grid.pixel(&p));
                }
                SegmentIntersection::Overlap(p, q) => {
                    hot.insert(grid.pixel(&p));
                    hot.insert(grid.pixel(&q));
                }
            }
        }
    }

    let mut hot: Vec<Pixel> = hot.into_iter().collect();
    hot.sort_unstable();

    let mut out = Vec::new();
    for s in segments {
        let mut crossed: Vec<(f64, Pixel)> = hot
            .iter()
            .filter_map(|&px| grid.clip(s, px).map(|t| (t, px)))
            .collect();
        crossed.sort_by(|a, b| a.0.total_cmp(&b.0));
        crossed.dedup_by(|a, b| a.1 == b.1);

        let route: Vec<Point2> = crossed.iter().map(|&(_, px)| grid.center(px)).collect();
        for pair in route.windows(2) {
            let piece = Segment::new(pair[0], pair[1]);
            if !piece.is_degenerate() {
                out.push(piece);
            }
        }
    }
    out
}

struct Grid {
    size: f64,
}

impl Grid {
    #[allow(clippy::cast_possible_truncation)]
    fn pixel(&self, p: &Point2) -> Pixel {
        ((p.x / self.size).floor() as i64, (p.y / self.size).floor() as i64)
    }

    #[allow(clippy::cast_precision_loss)]
    fn center(&self, px: Pixel) -> Point2 {
        Point2::new(
            (px.0 as f64 + 0.5) * self.size,
            (px.1 as f64 + 0.5) * self.size,
        )
    }

    /// Liang-Barsky clip of `s` against the closed pixel square. Returns the
    /// segment parameter of the middle of the clipped part.
    #[allow(clippy::cast_precision_loss)]
    fn clip(&self, s: &Segment, px: Pixel) -> Option<f64> {
        let min = Point2::new(px.0 as f64 * self.size, px.1 as f64 * self.size);
        let max = Point2::new(min.x + self.size, min.y + self.size);
        let d = s.end - s.start;

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        let checks = [
            (-d.x, s.start.x - min.x),
            (d.x, max.x - s.start.x),
            (-d.y, s.start.y - min.y),
            (d.y, max.y - s.start.y),
        ];
        for (p, q) in checks {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some(0.5 * (t0 + t1))
    }
}
