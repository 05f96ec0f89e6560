//! `uav-sim` — harness-facing runner for one UAV mission.
//!
//! # Event loop
//!
//! ```text
//! start controller at t = 0
//! while the earliest queued event is due at or before the horizon:
//!   pop it (virtual time jumps to its timestamp)
//!   Motion(tick)      → MotionController::on_tick
//!   Control(command)  → pause / resume / halt
//!   notify observer of the tick and of any lifecycle change
//! park the clock at the horizon (unless the agent halted first)
//! ```
//!
//! Ticks are the only thing the controller schedules; control commands come
//! from [`Sim::schedule_control`] or a CSV script loaded with
//! [`uav_schedule::load_controls_csv`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use uav_sim::{MissionConfig, NoopObserver, SimBuilder};
//!
//! let config = MissionConfig::from_toml_file(Path::new("mission.toml"))?;
//! let mut sim = SimBuilder::new(config).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("{summary}");
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod event;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::MissionConfig;
pub use error::{SimError, SimResult};
pub use event::SimEvent;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimSummary};
