use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for a face in a [`System`](super::System).
    pub struct FaceId;
}

/// Data associated with a face.
///
/// A face is a closed ring of shared nodes (the outer boundary) plus zero or
/// more hole faces. The ring is stored without a repeated closing node.
#[derive(Debug, Clone, Default)]
pub struct FaceData {
    /// Ordered boundary nodes.
    pub nodes: Vec<NodeId>,
    /// Faces designating holes of this face.
    pub holes: Vec<FaceId>,
    /// View tag the face was created under, if any.
    pub view: Option<String>,
}

impl FaceData {
    /// Creates a face from its boundary nodes.
    #[must_use]
    pub fn new(nodes: Vec<NodeId>, view: Option<&str>) -> Self {
        Self {
            nodes,
            holes: Vec::new(),
            view: view.map(str::to_owned),
        }
    }
}
