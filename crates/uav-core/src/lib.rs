//! `uav-core` — foundational types shared by every `uav-*` crate.
//!
//! This crate has no `uav-*` dependencies and minimal external ones (only
//! `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `AgentId`                         |
//! | [`position`]    | `Position` (Cartesian, f64), Euclidean distance       |
//! | [`time`]        | `SimTime` — virtual time in milliseconds              |
//! | [`rng`]         | `AgentRng` — seeded per-agent RNG stream              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod position;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{require_positive, CoreError, CoreResult};
pub use ids::{AgentId, EdgeId, NodeId};
pub use position::Position;
pub use rng::AgentRng;
pub use time::SimTime;
