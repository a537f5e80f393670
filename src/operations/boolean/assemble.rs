use tracing::{debug, error};

use crate::error::Result;
use crate::geometry::{PolygonWithHoles, Ring};
use crate::math::kernel::KernelKind;
use crate::math::polygon_2d::{remove_collinear, BoundedSide};
use crate::math::{compare_2d, to_3d, Point2};
use crate::topology::{FaceId, System};

/// Groups traced result loops into polygons with holes.
///
/// Counter-clockwise loops are outer boundaries, clockwise loops are holes.
/// Each hole goes to the smallest outer boundary that contains it.
#[must_use]
pub fn assemble_polygons(loops: Vec<Vec<Point2>>, kernel: KernelKind) -> Vec<PolygonWithHoles> {
    let mut outers = Vec::new();
    let mut holes = Vec::new();

    for points in loops {
        let ring = Ring::new(remove_collinear(points, kernel));
        if ring.len() < 3 {
            continue;
        }
        let area = ring.signed_area();
        if area > 0.0 {
            outers.push(ring);
        } else if area < 0.0 {
            holes.push(ring);
        }
    }

    let mut polygons: Vec<PolygonWithHoles> = outers
        .into_iter()
        .map(|outer| PolygonWithHoles {
            outer,
            holes: Vec::new(),
        })
        .collect();

    for hole in holes {
        let owner = polygons
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                hole.points()
                    .iter()
                    .all(|q| p.outer.bounded_side(q, kernel) != BoundedSide::Outside)
            })
            .min_by(|(_, p), (_, q)| p.outer.area().total_cmp(&q.outer.area()))
            .map(|(i, _)| i);

        match owner {
            Some(i) => polygons[i].holes.push(hole),
            None => debug!(vertices = hole.len(), "result hole has no enclosing boundary"),
        }
    }

    polygons
}

/// Removes points that repeat an earlier point of the same loop within
/// `tolerance`.
fn dedup_points(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let mut kept: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !kept.iter().any(|q| compare_2d(p, q, tolerance)) {
            kept.push(*p);
        }
    }
    kept
}

/// Inserts result polygons into `system` as new nodes and faces.
///
/// A polygon whose outer boundary keeps fewer than three distinct points is
/// dropped; so is a hole loop that does.
///
/// # Errors
///
/// Returns an error if attaching a hole to a freshly created face fails.
pub fn materialize(
    system: &mut System,
    polygons: &[PolygonWithHoles],
    view: Option<&str>,
    dedup_tolerance: f64,
) -> Result<Vec<FaceId>> {
    let mut faces = Vec::with_capacity(polygons.len());

    for polygon in polygons {
        let outer = dedup_points(polygon.outer.points(), dedup_tolerance);
        if outer.len() < 3 {
            error!(nodes = outer.len(), "result face has fewer than three nodes, dropped");
            continue;
        }
        let nodes = outer.iter().map(|p| system.add_node(to_3d(p))).collect();
        let face = system.add_face(nodes, view);

        for hole in &polygon.holes {
            let points = dedup_points(hole.points(), dedup_tolerance);
            if points.len() < 3 {
                error!(nodes = points.len(), "result hole has fewer than three nodes, dropped");
                continue;
            }
            let nodes = points.iter().map(|p| system.add_node(to_3d(p))).collect();
            system.add_hole(face, nodes)?;
        }

        faces.push(face);
    }

    Ok(faces)
}
