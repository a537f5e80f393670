pub mod face;
pub mod node;

pub use face::{FaceData, FaceId};
pub use node::{NodeData, NodeId};

use crate::error::TopologyError;
use crate::math::Point3;
use slotmap::SlotMap;

/// Arena that owns the nodes and faces of one geometric universe.
///
/// Faces reference nodes (and hole faces) via typed IDs, so nodes are shared
/// rather than copied. Everything the operations produce is inserted here.
#[derive(Debug, Default, Clone)]
pub struct System {
    nodes: SlotMap<NodeId, NodeData>,
    faces: SlotMap<FaceId, FaceData>,
}

impl System {
    /// Creates a new, empty system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    /// Inserts a node and returns its ID.
    pub fn add_node(&mut self, point: Point3) -> NodeId {
        self.nodes.insert(NodeData::new(point))
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the system.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, TopologyError> {
        self.nodes
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))
    }

    /// Returns a mutable reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the system.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, TopologyError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))
    }

    /// Number of nodes in the system.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Face operations ---

    /// Inserts a face over existing nodes and returns its ID.
    ///
    /// The store does not validate the ring; producers reject faces with
    /// fewer than three distinct nodes before calling this.
    pub fn add_face(&mut self, nodes: Vec<NodeId>, view: Option<&str>) -> FaceId {
        self.faces.insert(FaceData::new(nodes, view))
    }

    /// Creates nodes at `points` and a face over them.
    pub fn add_face_from_points(&mut self, points: &[Point3], view: Option<&str>) -> FaceId {
        let nodes = points.iter().map(|p| self.add_node(*p)).collect();
        self.add_face(nodes, view)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the system.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Returns a mutable reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the system.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, TopologyError> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Number of faces in the system, holes included.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Iterates over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        self.faces.keys()
    }

    /// IDs of the faces created under `view`, in insertion order.
    #[must_use]
    pub fn faces_in_view(&self, view: &str) -> Vec<FaceId> {
        self.faces
            .iter()
            .filter(|(_, face)| face.view.as_deref() == Some(view))
            .map(|(id, _)| id)
            .collect()
    }

    /// Boundary node IDs of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found.
    pub fn face_nodes(&self, face: FaceId) -> Result<&[NodeId], TopologyError> {
        Ok(&self.face(face)?.nodes)
    }

    /// Resolves the boundary nodes of a face to their positions.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or one of its nodes is not found.
    pub fn node_points(&self, face: FaceId) -> Result<Vec<Point3>, TopologyError> {
        self.face(face)?
            .nodes
            .iter()
            .map(|&id| self.node(id).map(|n| n.point))
            .collect()
    }

    /// Hole faces of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found.
    pub fn hole_ids(&self, face: FaceId) -> Result<&[FaceId], TopologyError> {
        Ok(&self.face(face)?.holes)
    }

    /// Creates a hole face over `nodes` and attaches it to `face`.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found.
    pub fn add_hole(&mut self, face: FaceId, nodes: Vec<NodeId>) -> Result<FaceId, TopologyError> {
        self.face(face)?;
        let hole = self.faces.insert(FaceData::new(nodes, None));
        self.face_mut(face)?.holes.push(hole);
        Ok(hole)
    }

    /// Detaches all holes from a face. The hole faces stay in the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is not found.
    pub fn clear_holes(&mut self, face: FaceId) -> Result<(), TopologyError> {
        self.face_mut(face)?.holes.clear();
        Ok(())
    }

    /// Copies a face's geometry (boundary nodes and holes, recursively) into
    /// `target` as fresh nodes and faces, keeping the view tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the face, one of its holes or nodes is not found.
    pub fn copy_face_into(
        &self,
        face: FaceId,
        target: &mut System,
    ) -> Result<FaceId, TopologyError> {
        let data = self.face(face)?;
        let points = self.node_points(face)?;
        let copy = target.add_face_from_points(&points, data.view.as_deref());
        for &hole in &data.holes {
            let hole_copy = self.copy_face_into(hole, target)?;
            target.face_mut(hole_copy)?.view = None;
            target.face_mut(copy)?.holes.push(hole_copy);
        }
        Ok(copy)
    }
}
