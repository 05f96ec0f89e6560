//! `uav-motion` — one agent's motion life cycle over a road graph.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                       |
//! |----------------|----------------------------------------------------------------|
//! | [`lifecycle`]  | `Lifecycle` (Idle / Moving / Paused / Halted), `HaltReason`    |
//! | [`state`]      | `AgentState`, `Placement` — where the agent is on the graph    |
//! | [`config`]     | `MotionConfig` — speed, spatial step, tick interval            |
//! | [`trajectory`] | `TrajectorySample`, `TrajectoryRecorder`                       |
//! | [`controller`] | `MotionController`, `MotionTick`                               |
//! | [`error`]      | `MotionError`, `MotionResult<T>`                               |
//!
//! # Tick model
//!
//! The controller never owns a clock.  It asks a [`Scheduler`] for the
//! current time and hands it a [`MotionTick`] token for the next step; the
//! scheduler's owner passes that token back to
//! [`MotionController::on_tick`] when it comes due.  Each token carries the
//! controller's epoch, which is bumped on every pause and halt, so a token
//! issued before such a transition is recognised as stale and ignored.
//!
//! One tick:
//!
//! 1. standing on a node: ask the selector for the next edge
//!    (`NoOutgoingEdge` halts with [`HaltReason::DeadEnd`]);
//! 2. advance along the edge by at most one spatial step, never past its end
//!    and never further than the remaining energy allows;
//! 3. draw energy and record a [`TrajectorySample`];
//! 4. halt with [`HaltReason::Depleted`] if the battery is empty, otherwise
//!    schedule the next tick.
//!
//! [`Scheduler`]: uav_schedule::Scheduler

pub mod config;
pub mod controller;
pub mod error;
pub mod lifecycle;
pub mod state;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use config::MotionConfig;
pub use controller::{MotionController, MotionTick};
pub use error::{MotionError, MotionResult};
pub use lifecycle::{HaltReason, Lifecycle};
pub use state::{AgentState, Placement};
pub use trajectory::{TrajectoryRecorder, TrajectorySample};
