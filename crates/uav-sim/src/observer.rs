//! Simulation observer trait for progress reporting and data collection.

use uav_core::SimTime;
use uav_motion::{Lifecycle, MotionController, TrajectoryRecorder};

use crate::SimSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: halt logger
///
/// ```rust,ignore
/// struct HaltLogger;
///
/// impl SimObserver for HaltLogger {
///     fn on_transition(&mut self, now: SimTime, _from: Lifecycle, to: Lifecycle) {
///         if to.is_halted() {
///             println!("{now}: {to}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after every tick that moved the agent.
    fn on_tick(&mut self, _now: SimTime, _controller: &MotionController) {}

    /// Called whenever the agent's lifecycle changes, including the
    /// `Idle → Moving` transition at start.
    fn on_transition(&mut self, _now: SimTime, _from: Lifecycle, _to: Lifecycle) {}

    /// Called once when the run ends (horizon reached or agent halted).
    fn on_sim_end(&mut self, _summary: &SimSummary, _trajectory: &TrajectoryRecorder) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
