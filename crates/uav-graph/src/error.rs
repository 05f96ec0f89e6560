//! Graph-subsystem error type.
//!
//! Every variant here is fatal for loading.  Malformed description lines
//! are not errors: the loader skips them with a warning and lists them in
//! [`LoadReport::skipped_lines`][crate::LoadReport::skipped_lines].

use thiserror::Error;

use uav_core::NodeId;

/// Errors produced by `uav-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("line {line}: edge references unknown node {label:?}")]
    UnknownNode { line: usize, label: String },

    #[error("line {line}: node {label:?} is declared twice")]
    DuplicateNode { line: usize, label: String },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;
