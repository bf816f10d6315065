use thiserror::Error;

/// Top-level error type for the topolis engine.
#[derive(Debug, Error)]
pub enum TopolisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Validity(#[from] ValidityError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate segment at ({x}, {y})")]
    DegenerateSegment { x: f64, y: f64 },
}

/// Errors related to the half-edge graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("half-edge cycle does not close after {0} steps")]
    OpenCycle(usize),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors raised by the validity checker itself, as opposed to the
/// reason codes it returns for invalid input.
#[derive(Debug, Error)]
pub enum ValidityError {
    #[error("validity check not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Convenience type alias for results using [`TopolisError`].
pub type Result<T> = std::result::Result<T, TopolisError>;
