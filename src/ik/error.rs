use thiserror::Error;

/// Rejected chain parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    #[error("chain must have at least one joint")]
    NoJoints,

    #[error("link size must be positive and finite, got {0}")]
    InvalidLinkSize(f64),

    #[error("angle constraint must lie in (0, 2π], got {0}")]
    InvalidAngleConstraint(f64),

    #[error("FABRIK needs at least one iteration")]
    NoIterations,

    #[error("tolerance must be non-negative, got {0}")]
    InvalidTolerance(f64),
}
