use thiserror::Error;

/// Top-level error type for the Planform geometry engine.
#[derive(Debug, Error)]
pub enum PlanformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("ring is not simple: {0}")]
    NotSimple(String),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the node/face store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors related to geometry operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`PlanformError`].
pub type Result<T> = std::result::Result<T, PlanformError>;
