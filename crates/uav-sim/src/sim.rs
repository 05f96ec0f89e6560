//! The `Sim` struct and its event loop.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use uav_core::SimTime;
use uav_graph::RoadGraph;
use uav_motion::{Lifecycle, MotionController, TrajectoryRecorder};
use uav_schedule::{ControlCommand, EventQueue};

use crate::{MissionConfig, SimEvent, SimObserver, SimResult};

// ── SimSummary ────────────────────────────────────────────────────────────────

/// Outcome of one [`Sim::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct SimSummary {
    /// Virtual time when the run stopped: the halt time, or the horizon.
    pub final_time:         SimTime,
    pub lifecycle:          Lifecycle,
    /// Ticks that moved the agent.
    pub ticks:              u64,
    pub samples:            usize,
    pub consumed_energy:    f64,
    pub remaining_fraction: f64,
    /// Polyline length of the recorded trajectory.
    pub distance:           f64,
    pub distinct_nodes:     usize,
}

impl fmt::Display for SimSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "final time        : {}", self.final_time)?;
        writeln!(f, "state             : {}", self.lifecycle)?;
        writeln!(f, "ticks             : {}", self.ticks)?;
        writeln!(f, "samples           : {}", self.samples)?;
        writeln!(f, "distance          : {:.3}", self.distance)?;
        writeln!(f, "distinct nodes    : {}", self.distinct_nodes)?;
        writeln!(f, "energy consumed   : {:.3}", self.consumed_energy)?;
        write!(f, "energy remaining  : {:.1}%", self.remaining_fraction * 100.0)
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// One agent, one graph, one virtual clock.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    config:     MissionConfig,
    graph:      Arc<RoadGraph>,
    controller: MotionController,
    queue:      EventQueue<SimEvent>,
    horizon:    SimTime,
    started:    bool,
}

impl Sim {
    pub(crate) fn new(
        config:     MissionConfig,
        graph:      Arc<RoadGraph>,
        controller: MotionController,
        queue:      EventQueue<SimEvent>,
    ) -> Self {
        let horizon = config.horizon();
        Self { config, graph, controller, queue, horizon, started: false }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Queue an external command.  Commands after the horizon never fire.
    pub fn schedule_control(&mut self, at: SimTime, command: ControlCommand) {
        self.queue.push(at, SimEvent::Control(command));
    }

    /// Run until the horizon or until the agent halts, whichever is first.
    ///
    /// Calling `run` again after it returns is harmless: nothing is left to
    /// process, and the same summary comes back.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimSummary> {
        if !self.started {
            self.started = true;
            let before = self.controller.lifecycle();
            self.controller.start(&mut self.queue);
            self.notify_transition(observer, before);
            info!(
                horizon = %self.horizon,
                strategy = self.controller.selector_name(),
                interval_ms = self.controller.config().tick_interval_ms(),
                "mission started"
            );
        }

        while !self.controller.lifecycle().is_halted() {
            let Some((now, event)) = self.queue.pop_until(self.horizon) else {
                break;
            };
            let before = self.controller.lifecycle();
            match event {
                SimEvent::Motion(tick) => {
                    if self.controller.on_tick(tick, &mut self.queue) {
                        observer.on_tick(now, &self.controller);
                    }
                }
                SimEvent::Control(command) => {
                    let applied = match command {
                        ControlCommand::Pause  => self.controller.pause(),
                        ControlCommand::Resume => self.controller.resume(&mut self.queue),
                        ControlCommand::Halt   => self.controller.halt(),
                    };
                    debug!(%now, %command, applied, "control command");
                }
            }
            self.notify_transition(observer, before);
        }

        if !self.controller.lifecycle().is_halted() {
            self.queue.advance_to(self.horizon);
        }

        let summary = self.summary();
        info!(
            final_time = %summary.final_time,
            state = %summary.lifecycle,
            samples = summary.samples,
            "mission finished"
        );
        observer.on_sim_end(&summary, self.controller.trajectory());
        Ok(summary)
    }

    pub fn summary(&self) -> SimSummary {
        let trajectory = self.controller.trajectory();
        let energy = self.controller.energy();
        SimSummary {
            final_time:         self.queue.now(),
            lifecycle:          self.controller.lifecycle(),
            ticks:              self.controller.ticks(),
            samples:            trajectory.len(),
            consumed_energy:    energy.consumed(),
            remaining_fraction: energy.remaining_fraction(),
            distance:           trajectory.total_distance(),
            distinct_nodes:     self.controller.history().distinct_nodes(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn now(&self) -> SimTime {
        self.queue.now()
    }

    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    pub fn graph(&self) -> &Arc<RoadGraph> {
        &self.graph
    }

    pub fn controller(&self) -> &MotionController {
        &self.controller
    }

    pub fn trajectory(&self) -> &TrajectoryRecorder {
        self.controller.trajectory()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn notify_transition<O: SimObserver>(&self, observer: &mut O, before: Lifecycle) {
        let after = self.controller.lifecycle();
        if after != before {
            debug!(now = %self.queue.now(), from = %before, to = %after, "lifecycle transition");
            observer.on_transition(self.queue.now(), before, after);
        }
    }
}
