//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::NodeId;

/// Errors raised by `uav-core` helpers and reused by sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `uav-core`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reject a parameter that is not a finite, strictly positive number.
///
/// Used by every constructor that takes physical quantities (speed,
/// voltage, capacity, cell sizes, step length).
pub fn require_positive(name: &str, value: f64) -> CoreResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CoreError::InvalidConfiguration(format!(
            "{name} must be a finite number > 0, got {value}"
        )))
    }
}
