use tracing::debug;

use crate::arrangement::{snap_round, Arrangement, Segment};
use crate::error::Result;
use crate::math::kernel::KernelKind;
use crate::math::{to_2d, to_3d, TOLERANCE};
use crate::topology::System;

/// Faces extracted by [`ShapeFinder`].
#[derive(Debug, Default)]
pub struct ShapeFinderOutput {
    /// Fresh system holding only the extracted faces and their nodes.
    pub system: System,
    /// Number of bounded faces visited, kept or not.
    pub face_count: usize,
}

/// Builds closed faces from the line work of one view.
///
/// Every face of the input view contributes the segments between its
/// consecutive nodes. The segments are split into a planar arrangement and
/// each bounded cell becomes a face of the result view.
pub struct ShapeFinder {
    view: String,
    result_view: String,
    snap_tolerance: Option<f64>,
    remove_dangling: bool,
    kernel: KernelKind,
}

impl ShapeFinder {
    /// Creates a new `ShapeFinder` reading faces tagged `view` and tagging
    /// the extracted faces `result_view`.
    #[must_use]
    pub fn new(view: &str, result_view: &str) -> Self {
        Self {
            view: view.to_owned(),
            result_view: result_view.to_owned(),
            snap_tolerance: None,
            remove_dangling: false,
            kernel: KernelKind::Exact,
        }
    }

    /// Snap-rounds the segments to a grid of `tolerance` before building
    /// the arrangement.
    #[must_use]
    pub fn with_snap_rounding(mut self, tolerance: f64) -> Self {
        self.snap_tolerance = Some(tolerance);
        self
    }

    /// Prunes edges with a loose end before extracting faces.
    #[must_use]
    pub fn with_dangling_edge_removal(mut self, remove: bool) -> Self {
        self.remove_dangling = remove;
        self
    }

    #[must_use]
    pub fn with_kernel(mut self, kernel: KernelKind) -> Self {
        self.kernel = kernel;
        self
    }

    /// Executes the extraction. The input system is not modified.
    ///
    /// # Errors
    ///
    /// Returns an error if a face of the input view references a missing
    /// node.
    pub fn execute(&self, system: &System) -> Result<ShapeFinderOutput> {
        let mut segments = self.collect_segments(system)?;
        if let Some(tolerance) = self.snap_tolerance {
            segments = snap_round(&segments, tolerance, self.kernel);
        }

        let mut arrangement =
            Arrangement::from_segments(&segments, self.kernel, TOLERANCE * 1000.0);
        if self.remove_dangling {
            let removed = arrangement.remove_dangling_edges();
            debug!(removed, "removed edges with loose end");
        }

        let mut output = ShapeFinderOutput::default();
        for boundary in arrangement.bounded_faces() {
            output.face_count += 1;
            if boundary.len() < 3 {
                continue;
            }
            let nodes = boundary
                .iter()
                .map(|p| output.system.add_node(to_3d(p)))
                .collect();
            output.system.add_face(nodes, Some(&self.result_view));
        }

        debug!(faces = output.face_count, "number of extracted faces");
        Ok(output)
    }

    /// Segments between consecutive nodes of every face in the input view;
    /// rings of three or more nodes are closed.
    fn collect_segments(&self, system: &System) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        for face in system.faces_in_view(&self.view) {
            let points = system.node_points(face)?;
            let n = points.len();
            let count = match n {
                0 | 1 => 0,
                2 => 1,
                _ => n,
            };
            for i in 0..count {
                let segment = Segment::new(to_2d(&points[i]), to_2d(&points[(i + 1) % n]));
                if !segment.is_degenerate() {
                    segments.push(segment);
                }
            }
        }
        Ok(segments)
    }
}
