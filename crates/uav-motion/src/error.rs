use thiserror::Error;

use uav_core::CoreError;

/// Construction-time failures.  Nothing that happens once the agent is
/// running is an error: dead ends and depletion end in `Lifecycle::Halted`.
#[derive(Debug, Error, PartialEq)]
pub enum MotionError {
    #[error("invalid motion configuration: {0}")]
    InvalidConfiguration(String),

    #[error("road graph has no nodes")]
    EmptyGraph,
}

pub type MotionResult<T> = Result<T, MotionError>;

impl From<CoreError> for MotionError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidConfiguration(msg) => MotionError::InvalidConfiguration(msg),
            other => MotionError::InvalidConfiguration(other.to_string()),
        }
    }
}
