use thiserror::Error;

use uav_core::NodeId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("node {0} has no outgoing edge")]
    NoOutgoingEdge(NodeId),

    #[error("unknown selection strategy {0:?} (expected \"random\" or \"least-visited\")")]
    UnknownStrategy(String),
}

pub type SelectResult<T> = Result<T, SelectError>;
