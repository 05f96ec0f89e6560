//! `MotionController` — drives one agent through its life cycle.

use std::sync::Arc;

use tracing::{debug, info};

use uav_core::{AgentId, NodeId, Position};
use uav_energy::EnergyModel;
use uav_graph::RoadGraph;
use uav_schedule::Scheduler;
use uav_select::{NextHopSelector, VisitHistory};

use crate::config::{distance_per_tick, tick_interval_ms};
use crate::{
    AgentState, HaltReason, Lifecycle, MotionConfig, MotionError, MotionResult, Placement,
    TrajectoryRecorder,
};

/// Progress within this many edge-lengths of the end counts as arrival.
const ARRIVAL_EPS: f64 = 1e-9;

// ── MotionTick ────────────────────────────────────────────────────────────────

/// Token a controller leaves with the scheduler for its next step.
///
/// Hand it back to [`MotionController::on_tick`] when it comes due.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MotionTick {
    pub agent: AgentId,
    pub epoch: u64,
}

// ── MotionController ──────────────────────────────────────────────────────────

/// Owns the agent's state, battery, visit history and trajectory.
///
/// # Type parameter
///
/// `S` is the next-hop policy.  It defaults to a boxed trait object so a
/// strategy picked at runtime (see [`uav_select::StrategyKind`]) fits; use a
/// concrete selector type to get static dispatch.
pub struct MotionController<S: NextHopSelector = Box<dyn NextHopSelector>> {
    agent:      AgentId,
    graph:      Arc<RoadGraph>,
    selector:   S,
    energy:     EnergyModel,
    state:      AgentState,
    config:     MotionConfig,
    start:      Position,
    history:    VisitHistory,
    trajectory: TrajectoryRecorder,
    /// Bumped on pause and halt; ticks carrying an older epoch are ignored.
    epoch:      u64,
    ticks:      u64,
}

impl<S: NextHopSelector> MotionController<S> {
    /// Build an idle controller.
    ///
    /// `start` is snapped to the nearest graph node when [`start`](Self::start)
    /// is called.  Fails on a non-positive speed or step length, or an empty
    /// graph.
    pub fn new(
        agent:    AgentId,
        graph:    Arc<RoadGraph>,
        selector: S,
        energy:   EnergyModel,
        config:   MotionConfig,
        start:    Position,
    ) -> MotionResult<Self> {
        config.validate()?;
        if graph.is_empty() {
            return Err(MotionError::EmptyGraph);
        }
        Ok(Self {
            agent,
            graph,
            selector,
            energy,
            state: AgentState::new(config.speed),
            config,
            start,
            history: VisitHistory::new(),
            trajectory: TrajectoryRecorder::new(),
            epoch: 0,
            ticks: 0,
        })
    }

    // ── Lifecycle operations ──────────────────────────────────────────────

    /// Idle → Moving.
    ///
    /// Snaps to the nearest node, records the first sample there, picks the
    /// first edge and schedules the first tick.  A start node with no
    /// outgoing edge halts immediately.  Returns `false` (and does nothing)
    /// unless the agent is idle.
    pub fn start<Q>(&mut self, sched: &mut Q) -> bool
    where
        Q: Scheduler,
        Q::Event: From<MotionTick>,
    {
        if self.state.lifecycle != Lifecycle::Idle {
            return false;
        }
        let Some(node) = self.graph.nearest_node(self.start) else {
            self.enter_halted(HaltReason::External);
            return true;
        };

        self.state.placement = Placement::AtNode { node };
        self.history.record(node);
        self.trajectory.record(sched.now(), self.graph.position(node));
        debug!(agent = %self.agent, %node, strategy = self.selector.name(), "starting");

        if self.energy.is_depleted() {
            self.enter_halted(HaltReason::Depleted);
            return true;
        }
        if !self.select_from(node) {
            return true;
        }
        self.state.lifecycle = Lifecycle::Moving;
        self.schedule_next(sched);
        true
    }

    /// Moving → Paused.  Pending ticks become stale; geometry is untouched.
    pub fn pause(&mut self) -> bool {
        if self.state.lifecycle != Lifecycle::Moving {
            return false;
        }
        self.state.lifecycle = Lifecycle::Paused;
        self.epoch += 1;
        debug!(agent = %self.agent, "paused");
        true
    }

    /// Paused → Moving.  The next tick is one interval from now.
    pub fn resume<Q>(&mut self, sched: &mut Q) -> bool
    where
        Q: Scheduler,
        Q::Event: From<MotionTick>,
    {
        if self.state.lifecycle != Lifecycle::Paused {
            return false;
        }
        self.state.lifecycle = Lifecycle::Moving;
        self.schedule_next(sched);
        debug!(agent = %self.agent, "resumed");
        true
    }

    /// Any non-terminal state → Halted(External).
    pub fn halt(&mut self) -> bool {
        if self.state.lifecycle.is_halted() {
            return false;
        }
        self.enter_halted(HaltReason::External);
        true
    }

    /// Change speed.  Takes effect from the next tick scheduled; rejected
    /// when one step would take under a millisecond at the new speed.
    pub fn set_speed(&mut self, speed: f64) -> MotionResult<()> {
        MotionConfig { speed, ..self.config }.validate()?;
        self.state.speed = speed;
        Ok(())
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one step.
    ///
    /// Returns `false` without touching anything if `tick` is stale or the
    /// agent is not moving.
    pub fn on_tick<Q>(&mut self, tick: MotionTick, sched: &mut Q) -> bool
    where
        Q: Scheduler,
        Q::Event: From<MotionTick>,
    {
        if tick.agent != self.agent
            || tick.epoch != self.epoch
            || self.state.lifecycle != Lifecycle::Moving
        {
            return false;
        }
        self.ticks += 1;

        let speed = self.state.speed;
        let budget = distance_per_tick(speed, self.config.step_length)
            .min(self.energy.affordable_distance(speed));
        // Bounds zero-length pass-throughs so a degenerate cycle cannot spin.
        let mut hops_left = self.graph.edge_count() + 1;

        loop {
            match self.state.placement {
                Placement::AtNode { node } => {
                    if hops_left == 0 || !self.select_from(node) {
                        break;
                    }
                    hops_left -= 1;
                }
                Placement::OnEdge { edge, progress } => {
                    let len = self.graph.edge_length(edge);
                    if len <= f64::EPSILON {
                        debug!(agent = %self.agent, %edge, "passing through zero-length edge");
                        self.arrive(self.graph.edge_to(edge));
                        continue;
                    }
                    let remaining = (1.0 - progress) * len;
                    let step = budget.min(remaining);
                    self.energy.consume(step, speed);
                    if step >= remaining - ARRIVAL_EPS * len {
                        self.arrive(self.graph.edge_to(edge));
                    } else {
                        self.state.placement = Placement::OnEdge { edge, progress: progress + step / len };
                    }
                    break;
                }
                Placement::Unplaced => break,
            }
        }

        if self.state.lifecycle.is_halted() {
            return true;
        }
        if let Some(pos) = self.position() {
            self.trajectory.record(sched.now(), pos);
        }
        if self.energy.is_depleted() {
            self.enter_halted(HaltReason::Depleted);
        } else {
            self.schedule_next(sched);
        }
        true
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Ask the selector for an edge out of `node`.  Halts on failure.
    fn select_from(&mut self, node: NodeId) -> bool {
        match self.selector.select_next(node, &self.graph, &self.history) {
            Ok(edge) => {
                self.state.placement = Placement::OnEdge { edge, progress: 0.0 };
                true
            }
            Err(err) => {
                debug!(agent = %self.agent, %node, %err, "no way forward");
                self.enter_halted(HaltReason::DeadEnd(node));
                false
            }
        }
    }

    fn arrive(&mut self, node: NodeId) {
        self.state.placement = Placement::AtNode { node };
        self.history.record(node);
    }

    fn schedule_next<Q>(&mut self, sched: &mut Q)
    where
        Q: Scheduler,
        Q::Event: From<MotionTick>,
    {
        let at = sched.now().offset(tick_interval_ms(self.state.speed, self.config.step_length));
        sched.schedule_at(at, MotionTick { agent: self.agent, epoch: self.epoch }.into());
    }

    fn enter_halted(&mut self, reason: HaltReason) {
        self.state.lifecycle = Lifecycle::Halted(reason);
        self.epoch += 1;
        info!(
            agent = %self.agent,
            %reason,
            remaining = self.energy.remaining_fraction(),
            samples = self.trajectory.len(),
            "agent halted"
        );
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn agent(&self) -> AgentId {
        self.agent
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.state.lifecycle
    }

    pub fn state(&self) -> &AgentState {
        &self.state
    }

    /// Current Cartesian position; `None` before `start`.
    pub fn position(&self) -> Option<Position> {
        self.state.placement.position(&self.graph)
    }

    pub fn energy(&self) -> &EnergyModel {
        &self.energy
    }

    pub fn history(&self) -> &VisitHistory {
        &self.history
    }

    pub fn trajectory(&self) -> &TrajectoryRecorder {
        &self.trajectory
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn graph(&self) -> &Arc<RoadGraph> {
        &self.graph
    }

    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    /// Ticks that actually advanced the agent.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Give up the controller, keeping its trajectory.
    pub fn into_trajectory(self) -> TrajectoryRecorder {
        self.trajectory
    }
}
