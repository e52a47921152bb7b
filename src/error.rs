use thiserror::Error;

/// Top-level error type for the detcsg construction kernel.
#[derive(Debug, Error)]
pub enum DetcsgError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Handle(#[from] HandleError),
}

/// Errors raised while validating or assembling shape parameters.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("dimension vector for {kind} requires {expected} values, got {got}")]
    DimensionArity {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("unsupported parameter combination: {0}")]
    Unsupported(String),

    #[error("geometry constraint violated: {0}")]
    ConstraintViolation(String),
}

/// Errors raised when dereferencing a solid handle.
#[derive(Debug, Error)]
pub enum HandleError {
    #[error("solid handle is not bound to a shape")]
    Unbound,

    #[error("{0} does not support in-place dimension assignment")]
    ImmutableDimensions(&'static str),
}

/// Convenience type alias for results using [`DetcsgError`].
pub type Result<T> = std::result::Result<T, DetcsgError>;
