use thiserror::Error;

use uav_core::CoreError;
use uav_energy::EnergyError;
use uav_graph::GraphError;
use uav_motion::MotionError;
use uav_schedule::ScheduleError;
use uav_select::SelectError;

/// Everything that can stop a mission before virtual time starts moving.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("graph load error: {0}")]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Energy(#[from] EnergyError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Io(io) => SimError::Io(io),
            CoreError::InvalidConfiguration(msg) => SimError::InvalidConfiguration(msg),
            other => SimError::InvalidConfiguration(other.to_string()),
        }
    }
}
