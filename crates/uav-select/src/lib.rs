//! `uav-select` — pluggable next-hop selection.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                  |
//! |-------------------|-----------------------------------------------------------|
//! | [`selector`]      | `NextHopSelector` trait                                   |
//! | [`history`]       | `VisitHistory` — ordered visits plus per-node counts      |
//! | [`random`]        | `RandomSelector` — uniform choice, avoids backtracking    |
//! | [`least_visited`] | `LeastVisitedSelector` — deterministic exploration        |
//! | [`kind`]          | `StrategyKind` — strategy names accepted by the harness   |
//! | [`error`]         | `SelectError`, `SelectResult<T>`                          |
//!
//! # Backtracking rule
//!
//! Every built-in strategy first drops the edges leading straight back to
//! the node the agent just came from.  If that leaves nothing (a dead end
//! reached by a two-way street), the full neighbor set is used instead, so
//! the agent turns around rather than stopping.  Only a node with no
//! outgoing edges at all yields [`SelectError::NoOutgoingEdge`].

pub mod error;
pub mod history;
pub mod kind;
pub mod least_visited;
pub mod random;
pub mod selector;


pub use error::{SelectError, SelectResult};
pub use history::VisitHistory;
pub use kind::StrategyKind;
pub use least_visited::LeastVisitedSelector;
pub use random::RandomSelector;
pub use selector::{forward_candidates, NextHopSelector};
