use crate::error::{GeometryError, Result};
use crate::math::kernel::{KernelKind, Orientation};
use crate::math::polygon_2d::BoundedSide;
use crate::math::Point2;
use crate::topology::{FaceId, System};

use super::ring::Ring;

/// Ring name carried by `GeometryError::NotSimple` for the outer boundary.
pub const OUTER_BOUNDARY: &str = "outer boundary";

/// A simple outer ring with simple hole rings, outer counter-clockwise and
/// holes clockwise.
///
/// Computation-only: built from a face snapshot and dropped after one
/// algorithm consumed it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonWithHoles {
    pub outer: Ring,
    pub holes: Vec<Ring>,
}

impl PolygonWithHoles {
    /// Creates a polygon, normalizing ring orientations.
    #[must_use]
    pub fn new(outer: Ring, holes: Vec<Ring>, kernel: KernelKind) -> Self {
        Self {
            outer: outer.oriented(Orientation::CounterClockwise, kernel),
            holes: holes
                .into_iter()
                .map(|h| h.oriented(Orientation::Clockwise, kernel))
                .collect(),
        }
    }

    /// Builds the polygon of a stored face and its holes.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if a ring has fewer than three
    /// nodes, `GeometryError::NotSimple` if the outer ring or a hole ring is
    /// not simple, or a topology error if the face or its nodes are missing.
    pub fn from_face(system: &System, face: FaceId, kernel: KernelKind) -> Result<Self> {
        let outer = checked_ring(system, face, OUTER_BOUNDARY, kernel)?;

        let mut holes = Vec::new();
        for (i, &hole) in system.hole_ids(face)?.iter().enumerate() {
            holes.push(checked_ring(system, hole, &format!("hole {i}"), kernel)?);
        }

        Ok(Self::new(outer, holes, kernel))
    }

    /// Net area: outer area minus hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.outer.area() - self.holes.iter().map(Ring::area).sum::<f64>()
    }

    /// Classifies `p` against the region; hole boundaries count as boundary.
    #[must_use]
    pub fn bounded_side(&self, p: &Point2, kernel: KernelKind) -> BoundedSide {
        match self.outer.bounded_side(p, kernel) {
            BoundedSide::Outside => BoundedSide::Outside,
            BoundedSide::OnBoundary => BoundedSide::OnBoundary,
            BoundedSide::Inside => {
                for hole in &self.holes {
                    match hole.bounded_side(p, kernel) {
                        BoundedSide::Inside => return BoundedSide::Outside,
                        BoundedSide::OnBoundary => return BoundedSide::OnBoundary,
                        BoundedSide::Outside => {}
                    }
                }
                BoundedSide::Inside
            }
        }
    }

    /// Iterates over all rings, outer first.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.outer).chain(self.holes.iter())
    }
}

fn checked_ring(system: &System, face: FaceId, name: &str, kernel: KernelKind) -> Result<Ring> {
    let ring = Ring::from_points(&system.node_points(face)?);
    if ring.len() < 3 {
        return Err(GeometryError::Degenerate(name.to_owned()).into());
    }
    if !ring.is_simple(kernel) {
        return Err(GeometryError::NotSimple(name.to_owned()).into());
    }
    Ok(ring)
}
