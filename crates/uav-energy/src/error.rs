use thiserror::Error;

use uav_core::CoreError;

#[derive(Debug, Error, PartialEq)]
pub enum EnergyError {
    #[error("invalid energy configuration: {0}")]
    InvalidConfiguration(String),
}

pub type EnergyResult<T> = Result<T, EnergyError>;

impl From<CoreError> for EnergyError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidConfiguration(msg) => EnergyError::InvalidConfiguration(msg),
            other => EnergyError::InvalidConfiguration(other.to_string()),
        }
    }
}
