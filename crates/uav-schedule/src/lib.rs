//! `uav-schedule` — virtual time plumbing.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`scheduler`]   | `Scheduler` trait (`now`, `schedule_at`)                  |
//! | [`event_queue`] | `EventQueue<E>` (`BTreeMap<SimTime, VecDeque<E>>`)        |
//! | [`control`]     | `ControlCommand`, `ScheduledControl`                      |
//! | [`loader`]      | `load_controls_csv`, `load_controls_reader`               |
//! | [`error`]       | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Time model
//!
//! Virtual time only moves when the owner of an `EventQueue` pops an event;
//! there is no wall clock anywhere.  Motion code depends only on the
//! [`Scheduler`] trait, so tests can drive it with any queue they like.

pub mod control;
pub mod error;
pub mod event_queue;
pub mod loader;
pub mod scheduler;


pub use control::{ControlCommand, ScheduledControl};
pub use error::{ScheduleError, ScheduleResult};
pub use event_queue::EventQueue;
pub use loader::{load_controls_csv, load_controls_reader};
pub use scheduler::Scheduler;
