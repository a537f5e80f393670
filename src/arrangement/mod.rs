//! Planar arrangement of line segments.
//!
//! Segments are split at their mutual intersections, coincident vertices are
//! welded and duplicate edges merged. Faces are not stored; they are derived
//! on demand by walking the half-edge cycles of the current edge set.

pub mod snap;
pub mod split;
pub mod walk;

pub use snap::snap_round;
pub use split::{split_segments, SplitEdge, SplitSegments, VertexWelder};
pub use walk::{split_at_repeated_vertices, trace_cycles};

use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::debug;

use crate::math::kernel::KernelKind;
use crate::math::polygon_2d::ring_signed_area;
use crate::math::Point2;

/// A straight line segment in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point2,
    pub end: Point2,
}

impl Segment {
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns `true` if both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

slotmap::new_key_type! {
    /// Identifier of an undirected arrangement edge.
    pub struct EdgeKey;
}

/// An undirected edge between two arrangement vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrEdge {
    pub from: usize,
    pub to: usize,
}

/// Vertices and undirected edges of the subdivision induced by a segment set.
#[derive(Debug, Clone, Default)]
pub struct Arrangement {
    vertices: Vec<Point2>,
    edges: SlotMap<EdgeKey, ArrEdge>,
}

impl Arrangement {
    /// Builds the arrangement of `segments`.
    ///
    /// Vertices closer than `weld_tolerance` are merged; an edge that appears
    /// more than once (overlapping input segments) is kept once.
    #[must_use]
    pub fn from_segments(segments: &[Segment], kernel: KernelKind, weld_tolerance: f64) -> Self {
        let split = split_segments(segments, kernel, weld_tolerance);

        let mut seen = HashSet::new();
        let mut edges = SlotMap::with_key();
        for e in &split.edges {
            let key = (e.from.min(e.to), e.from.max(e.to));
            if seen.insert(key) {
                edges.insert(ArrEdge { from: key.0, to: key.1 });
            }
        }

        Self {
            vertices: split.vertices,
            edges,
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over the current edges.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &ArrEdge)> {
        self.edges.iter()
    }

    /// Number of edges incident to every vertex.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        let mut degree = vec![0; self.vertices.len()];
        for edge in self.edges.values() {
            degree[edge.from] += 1;
            degree[edge.to] += 1;
        }
        degree
    }

    /// Removes edges with a loose end until every remaining vertex has at
    /// least two incident edges.
    ///
    /// Each scan schedules all edges that touch a vertex of degree below two
    /// and removes them together. Returns the total number of removed edges.
    pub fn remove_dangling_edges(&mut self) -> usize {
        let mut total = 0;
        loop {
            let degree = self.degrees();
            let dangling: Vec<EdgeKey> = self
                .edges
                .iter()
                .filter(|(_, e)| degree[e.from] < 2 || degree[e.to] < 2)
                .map(|(key, _)| key)
                .collect();

            debug!(removed = dangling.len(), "dangling edge scan");
            if dangling.is_empty() {
                return total;
            }
            total += dangling.len();
            for key in dangling {
                self.edges.remove(key);
            }
        }
    }

    /// Boundaries of all bounded faces.
    ///
    /// Each boundary lists its distinct points in the order the walk visits
    /// them, counter-clockwise. An edge reaching into a face is walked along
    /// both sides, so its points appear once only.
    #[must_use]
    pub fn bounded_faces(&self) -> Vec<Vec<Point2>> {
        let mut half_edges = Vec::with_capacity(self.edges.len() * 2);
        for e in self.edges.values() {
            half_edges.push((e.from, e.to));
            half_edges.push((e.to, e.from));
        }

        let mut faces = Vec::new();
        for cycle in trace_cycles(&self.vertices, &half_edges) {
            let walk: Vec<Point2> = cycle.iter().map(|&i| self.vertices[half_edges[i].0]).collect();
            // Outer boundaries of connected components walk clockwise.
            if ring_signed_area(&walk) <= 0.0 {
                continue;
            }

            let mut visited = HashSet::new();
            let boundary = cycle
                .iter()
                .map(|&i| half_edges[i].0)
                .filter(|&v| visited.insert(v))
                .map(|v| self.vertices[v])
                .collect();
            faces.push(boundary);
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    fn square_segments() -> Vec<Segment> {
        vec![
            seg(0.0, 0.0, 10.0, 0.0),
            seg(10.0, 0.0, 10.0, 10.0),
            seg(10.0, 10.0, 0.0, 10.0),
            seg(0.0, 10.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn square_yields_one_face() {
        let arr = Arrangement::from_segments(&square_segments(), KernelKind::Exact, 1e-9);
        let faces = arr.bounded_faces();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].len(), 4);
        assert!(ring_signed_area(&faces[0]) > 0.0);
    }

    #[test]
    fn grid_of_three_by_three_lines() {
        let mut segments = Vec::new();
        for i in 0..3 {
            let c = f64::from(i) * 5.0;
            segments.push(seg(0.0, c, 10.0, c));
            segments.push(seg(c, 0.0, c, 10.0));
        }
        let arr = Arrangement::from_segments(&segments, KernelKind::Exact, 1e-9);
        assert_eq!(arr.vertices().len(), 9);
        assert_eq!(arr.edge_count(), 12);
        assert_eq!(arr.bounded_faces().len(), 4);
    }

    #[test]
    fn duplicate_segments_are_merged() {
        let mut segments = square_segments();
        segments.push(seg(10.0, 0.0, 0.0, 0.0));
        let arr = Arrangement::from_segments(&segments, KernelKind::Exact, 1e-9);
        assert_eq!(arr.edge_count(), 4);
    }

    #[test]
    fn dangling_tail_is_pruned() {
        let mut segments = square_segments();
        segments.push(seg(10.0, 10.0, 15.0, 15.0));
        segments.push(seg(15.0, 15.0, 20.0, 15.0));
        let mut arr = Arrangement::from_segments(&segments, KernelKind::Exact, 1e-9);
        assert_eq!(arr.edge_count(), 6);

        let removed = arr.remove_dangling_edges();
        assert_eq!(removed, 2);
        assert_eq!(arr.edge_count(), 4);
        assert!(arr.degrees().iter().all(|&d| d == 0 || d >= 2));
        assert_eq!(arr.bounded_faces().len(), 1);
    }

    #[test]
    fn tail_inside_face_keeps_distinct_points() {
        let mut segments = square_segments();
        segments.push(seg(0.0, 0.0, 5.0, 5.0));
        let arr = Arrangement::from_segments(&segments, KernelKind::Exact, 1e-9);
        let faces = arr.bounded_faces();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].len(), 5);
    }

    #[test]
    fn open_polyline_has_no_face() {
        let mut arr = Arrangement::from_segments(
            &[seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 1.0, 1.0)],
            KernelKind::Exact,
            1e-9,
        );
        assert!(arr.bounded_faces().is_empty());
        arr.remove_dangling_edges();
        assert_eq!(arr.edge_count(), 0);
    }
}
