use std::collections::HashSet;

use crate::arrangement::{split_at_repeated_vertices, split_segments, trace_cycles, Segment};
use crate::geometry::PolygonWithHoles;
use crate::math::kernel::KernelKind;
use crate::math::polygon_2d::BoundedSide;
use crate::math::{Point2, Vector2, TOLERANCE};

use super::assemble::assemble_polygons;
use super::select::{should_keep_edge, BooleanOp, EdgeClass, EdgeSource, KeepDecision};

/// Vertices of the overlay closer than this are welded together.
pub const WELD_TOLERANCE: f64 = TOLERANCE * 1000.0;

/// Computes `a op b` by overlaying the two boundaries.
///
/// Both operands must be normalized (outer counter-clockwise, holes
/// clockwise) so that each operand's interior lies left of its edges. The
/// boundary edges are split against each other, classified, filtered by the
/// decision table, and the surviving edges are traced into result rings.
#[must_use]
pub fn overlay(
    a: &PolygonWithHoles,
    b: &PolygonWithHoles,
    op: BooleanOp,
    kernel: KernelKind,
) -> Vec<PolygonWithHoles> {
    let mut segments = Vec::new();
    let mut sources = Vec::new();
    for (source, polygon) in [(EdgeSource::A, a), (EdgeSource::B, b)] {
        for ring in polygon.rings() {
            for (p, q) in ring.edges() {
                segments.push(Segment::new(p, q));
                sources.push(source);
            }
        }
    }

    let split = split_segments(&segments, kernel, WELD_TOLERANCE);

    // Collapse duplicate pieces within one operand.
    let mut directed = HashSet::new();
    let mut pieces = Vec::new();
    for e in &split.edges {
        let source = sources[e.source];
        if directed.insert((source, e.from, e.to)) {
            pieces.push((source, e.from, e.to));
        }
    }

    let mut kept = Vec::new();
    for &(source, from, to) in &pieces {
        let (other_source, other) = match source {
            EdgeSource::A => (EdgeSource::B, b),
            EdgeSource::B => (EdgeSource::A, a),
        };
        let class = if directed.contains(&(other_source, from, to)) {
            EdgeClass::SharedSame
        } else if directed.contains(&(other_source, to, from)) {
            EdgeClass::SharedOpposite
        } else {
            classify_edge(&split.vertices[from], &split.vertices[to], other, kernel)
        };

        match should_keep_edge(source, class, op) {
            KeepDecision::Keep => kept.push((from, to)),
            KeepDecision::KeepFlipped => kept.push((to, from)),
            KeepDecision::Discard => {}
        }
    }

    // A result touching itself at a vertex is traced as one pinched cycle.
    let loops = trace_cycles(&split.vertices, &kept)
        .iter()
        .flat_map(|cycle| split_at_repeated_vertices(cycle, &kept))
        .map(|cycle| cycle.iter().map(|&i| split.vertices[kept[i].0]).collect())
        .collect();

    assemble_polygons(loops, kernel)
}

/// Classifies an edge that shares no welded edge with `other`.
///
/// The midpoint decides. A midpoint on the other boundary means the edge
/// runs along it without matching its vertices; then a probe just left of
/// the edge, on the edge's own interior side, tells the direction.
fn classify_edge(
    from: &Point2,
    to: &Point2,
    other: &PolygonWithHoles,
    kernel: KernelKind,
) -> EdgeClass {
    let mid = Point2::from((from.coords + to.coords) * 0.5);
    match other.bounded_side(&mid, kernel) {
        BoundedSide::Inside => EdgeClass::Inside,
        BoundedSide::Outside => EdgeClass::Outside,
        BoundedSide::OnBoundary => {
            let dir = to - from;
            let len = dir.norm();
            if len == 0.0 {
                return EdgeClass::Outside;
            }
            let left = Vector2::new(-dir.y, dir.x) / len;
            let probe = mid + left * (len * 1e-6).max(WELD_TOLERANCE);
            if other.bounded_side(&probe, kernel) == BoundedSide::Inside {
                EdgeClass::SharedSame
            } else {
                EdgeClass::SharedOpposite
            }
        }
    }
}
