use std::collections::HashMap;

use crate::math::intersect_2d::{segment_intersection, SegmentIntersection};
use crate::math::kernel::KernelKind;
use crate::math::Point2;

use super::Segment;

/// A piece of an input segment between two consecutive welded vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitEdge {
    pub from: usize,
    pub to: usize,
    /// Index of the input segment this piece came from.
    pub source: usize,
}

/// Input segments cut at every mutual intersection.
#[derive(Debug, Clone, Default)]
pub struct SplitSegments {
    pub vertices: Vec<Point2>,
    pub edges: Vec<SplitEdge>,
}

/// Splits `segments` at all pairwise intersections and overlaps.
///
/// Cut points closer than `weld_tolerance` share one vertex. Pieces keep the
/// direction of their input segment; zero-length pieces are dropped.
#[must_use]
pub fn split_segments(
    segments: &[Segment],
    kernel: KernelKind,
    weld_tolerance: f64,
) -> SplitSegments {
    let mut cuts: Vec<Vec<Point2>> = segments.iter().map(|s| vec![s.start, s.end]).collect();

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a, b) = (&segments[i], &segments[j]);
            match segment_intersection(&a.start, &a.end, &b.start, &b.end, kernel) {
                SegmentIntersection::None => {}
                SegmentIntersection::Point(p) => {
                    cuts[i].push(p);
                    cuts[j].push(p);
                }
                SegmentIntersection::Overlap(p, q) => {
                    cuts[i].extend([p, q]);
                    cuts[j].extend([p, q]);
                }
            }
        }
    }

    let mut welder = VertexWelder::new(weld_tolerance);
    let mut edges = Vec::new();

    for (source, (segment, mut points)) in segments.iter().zip(cuts).enumerate() {
        let dir = segment.end - segment.start;
        points.sort_by(|p, q| {
            (p - segment.start)
                .dot(&dir)
                .total_cmp(&(q - segment.start).dot(&dir))
        });

        let ids: Vec<usize> = points.iter().map(|p| welder.get_or_insert(*p)).collect();
        for pair in ids.windows(2) {
            if pair[0] != pair[1] {
                edges.push(SplitEdge {
                    from: pair[0],
                    to: pair[1],
                    source,
                });
            }
        }
    }

    // Welding can make a piece repeat its own vertex further along; drop
    // back-to-back duplicates from the same source.
    edges.dedup();

    SplitSegments {
        vertices: welder.into_points(),
        edges,
    }
}

/// Spatial hash-based vertex welder.
///
/// Groups points by grid cell and merges points that are within `tolerance`
/// of each other.
pub struct VertexWelder {
    tolerance: f64,
    points: Vec<Point2>,
    map: HashMap<(i64, i64), Vec<usize>>,
}

impl VertexWelder {
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(f64::MIN_POSITIVE),
            points: Vec::new(),
            map: HashMap::new(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn cell_key(&self, p: &Point2) -> (i64, i64) {
        let inv = 1.0 / self.tolerance;
        ((p.x * inv).floor() as i64, (p.y * inv).floor() as i64)
    }

    /// Returns the index of a welded vertex within tolerance of `point`,
    /// inserting a new vertex if none exists.
    pub fn get_or_insert(&mut self, point: Point2) -> usize {
        let key = self.cell_key(&point);

        // Search in neighboring cells (3x3) for a match
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.map.get(&(key.0 + dx, key.1 + dy)) else {
                    continue;
                };
                for &idx in bucket {
                    if (self.points[idx] - point).norm() <= self.tolerance {
                        return idx;
                    }
                }
            }
        }

        let idx = self.points.len();
        self.points.push(point);
        self.map.entry(key).or_default().push(idx);
        idx
    }

    /// Consumes the welder, returning the welded vertices.
    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }
}
