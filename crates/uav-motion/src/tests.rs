//! Unit tests for uav-motion.
//!
//! Every test drives the controller with a plain `EventQueue<MotionTick>`.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use uav_core::{AgentId, NodeId, Position, SimTime};
    use uav_energy::EnergyModel;
    use uav_graph::{RoadGraph, RoadGraphBuilder};
    use uav_schedule::EventQueue;
    use uav_select::{NextHopSelector, RandomSelector};

    use crate::{MotionConfig, MotionController, MotionTick};

    pub const AGENT: AgentId = AgentId(0);

    /// Two-way square block, side 10, corners (0,0) (10,0) (10,10) (0,10).
    pub fn square() -> Arc<RoadGraph> {
        let mut b = RoadGraphBuilder::new();
        let n: Vec<NodeId> = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]
            .iter()
            .map(|&(x, y)| b.add_node(Position::planar(x, y)))
            .collect();
        for i in 0..4 {
            b.add_road(n[i], n[(i + 1) % 4]).unwrap();
        }
        Arc::new(b.build())
    }

    /// `a (0,0) → b (10,0)`, one way; `b` is a dead end.
    pub fn one_way() -> Arc<RoadGraph> {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(Position::planar(0.0, 0.0));
        let z = b.add_node(Position::planar(10.0, 0.0));
        b.add_directed_edge(a, z).unwrap();
        Arc::new(b.build())
    }

    pub fn controller<S: NextHopSelector>(
        graph:    Arc<RoadGraph>,
        selector: S,
        speed:    f64,
        step:     f64,
        capacity: f64,
        start:    Position,
    ) -> MotionController<S> {
        MotionController::new(
            AGENT,
            graph,
            selector,
            EnergyModel::new(5.0, capacity).unwrap(),
            MotionConfig::new(speed, step).unwrap(),
            start,
        )
        .unwrap()
    }

    /// Scenario A setup: square, speed 10, one edge per tick, 50 units.
    pub fn scenario_a() -> MotionController<RandomSelector> {
        controller(square(), RandomSelector::new(1, AGENT), 10.0, 10.0, 50.0, Position::ORIGIN)
    }

    pub fn queue() -> EventQueue<MotionTick> {
        EventQueue::new()
    }

    /// Pop and dispatch every tick due at or before `horizon`.
    pub fn run_until<S: NextHopSelector>(
        ctrl:    &mut MotionController<S>,
        q:       &mut EventQueue<MotionTick>,
        horizon: SimTime,
    ) {
        while let Some((_, tick)) = q.pop_until(horizon) {
            ctrl.on_tick(tick, q);
        }
    }
}

// ── MotionConfig ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use crate::{MotionConfig, MotionError};

    #[test]
    fn interval_from_step_and_speed() {
        let c = MotionConfig::new(10.0, 10.0).unwrap();
        assert_eq!(c.tick_interval_ms(), 1_000);
        assert_eq!(c.distance_per_tick(), 10.0);

        let c = MotionConfig::new(3.0, 1.0).unwrap();
        assert_eq!(c.tick_interval_ms(), 333);
        assert!((c.distance_per_tick() - 0.999).abs() < 1e-12);
    }

    #[test]
    fn interval_rounds_down() {
        // 10 / 7 s = 1428.57 ms; rounding up would overshoot the step.
        let c = MotionConfig::new(7.0, 10.0).unwrap();
        assert_eq!(c.tick_interval_ms(), 1_428);
        assert!(c.distance_per_tick() <= 10.0);
        assert!((c.distance_per_tick() - 9.996).abs() < 1e-12);

        // 0.3 / 0.1 lands a hair under 3 in floating point.
        let c = MotionConfig::new(0.1, 0.3).unwrap();
        assert_eq!(c.tick_interval_ms(), 3_000);
        assert!(c.distance_per_tick() <= 0.3);
    }

    #[test]
    fn one_ms_step_is_the_finest() {
        let c = MotionConfig::new(9_999.0, 10.0).unwrap();
        assert_eq!(c.tick_interval_ms(), 1);
        assert!((c.distance_per_tick() - 9.999).abs() < 1e-12);

        let c = MotionConfig::new(10_000.0, 10.0).unwrap();
        assert_eq!(c.tick_interval_ms(), 1);
        assert_eq!(c.distance_per_tick(), 10.0);
    }

    #[test]
    fn rejects_sub_millisecond_step() {
        for (speed, step) in [(15_000.0, 10.0), (1_000.0, 0.0001), (20_000.0, 10.0)] {
            assert!(
                matches!(MotionConfig::new(speed, step), Err(MotionError::InvalidConfiguration(_))),
                "speed={speed} step={step} accepted"
            );
        }
    }

    #[test]
    fn rejects_non_positive() {
        for (speed, step) in [(0.0, 1.0), (-2.0, 1.0), (1.0, 0.0), (f64::NAN, 1.0)] {
            assert!(matches!(
                MotionConfig::new(speed, step),
                Err(MotionError::InvalidConfiguration(_))
            ));
        }
    }
}

// ── TrajectoryRecorder ────────────────────────────────────────────────────────

#[cfg(test)]
mod trajectory {
    use uav_core::{Position, SimTime};

    use crate::TrajectoryRecorder;

    #[test]
    fn append_only_keeps_duplicates() {
        let mut t = TrajectoryRecorder::new();
        assert!(t.record(SimTime(0), Position::ORIGIN));
        assert!(t.record(SimTime(0), Position::ORIGIN));
        assert!(t.record(SimTime(5), Position::planar(3.0, 4.0)));
        assert_eq!(t.len(), 3);
        assert_eq!(t.total_distance(), 5.0);
        assert_eq!(t.export(), t.samples().to_vec());
    }

    #[test]
    fn rejects_out_of_order() {
        let mut t = TrajectoryRecorder::new();
        t.record(SimTime(10), Position::ORIGIN);
        assert!(!t.record(SimTime(9), Position::planar(1.0, 0.0)));
        assert_eq!(t.len(), 1);
        assert_eq!(t.last().unwrap().time, SimTime(10));
    }

    #[test]
    fn keeps_full_precision() {
        let mut t = TrajectoryRecorder::new();
        let p = Position::planar(0.1 + 0.2, 1.0 / 3.0);
        t.record(SimTime(1), p);
        assert_eq!(t.into_samples()[0].position, p);
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use uav_core::{AgentId, SimTime};
    use uav_schedule::Scheduler;

    use super::helpers::{queue, run_until, scenario_a};
    use crate::{HaltReason, Lifecycle, MotionTick, Placement};

    #[test]
    fn starts_once() {
        let mut c = scenario_a();
        let mut q = queue();
        assert_eq!(c.lifecycle(), Lifecycle::Idle);
        assert_eq!(c.position(), None);
        assert!(c.start(&mut q));
        assert_eq!(c.lifecycle(), Lifecycle::Moving);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_time(), Some(SimTime(1_000)));
        assert!(!c.start(&mut q));
        assert_eq!(q.len(), 1);
        assert_eq!(c.trajectory().len(), 1);
    }

    #[test]
    fn pause_makes_pending_tick_stale() {
        let mut c = scenario_a();
        let mut q = queue();
        c.start(&mut q);
        assert!(c.pause());
        assert!(!c.pause());
        assert_eq!(c.lifecycle(), Lifecycle::Paused);

        let before = *c.state();
        let (_, tick) = q.pop().unwrap();
        assert!(!c.on_tick(tick, &mut q));
        assert_eq!(*c.state(), before);
        assert!(q.is_empty());
    }

    #[test]
    fn resume_continues_from_same_place() {
        let mut c = scenario_a();
        let mut q = queue();
        c.start(&mut q);
        let stale = q.pop().unwrap().1;
        c.pause();
        let placement = c.state().placement;
        assert!(c.resume(&mut q));
        assert!(!c.resume(&mut q));
        assert_eq!(c.state().placement, placement);

        // The token issued before the pause stays dead.
        assert!(!c.on_tick(stale, &mut q));
        let (at, fresh) = q.pop().unwrap();
        assert_eq!(at, SimTime(2_000));
        assert!(c.on_tick(fresh, &mut q));
        assert!(matches!(c.state().placement, Placement::AtNode { .. }));
    }

    #[test]
    fn halt_is_terminal_and_idempotent() {
        let mut c = scenario_a();
        let mut q = queue();
        c.start(&mut q);
        run_until(&mut c, &mut q, SimTime(1_500));
        assert!(c.halt());
        assert_eq!(c.lifecycle(), Lifecycle::Halted(HaltReason::External));

        let samples = c.trajectory().len();
        assert!(!c.halt());
        assert!(!c.start(&mut q));
        assert!(!c.pause());
        assert!(!c.resume(&mut q));
        run_until(&mut c, &mut q, SimTime(60_000));
        assert_eq!(c.trajectory().len(), samples);
        assert_eq!(c.ticks(), 1);
    }

    #[test]
    fn halt_from_idle() {
        let mut c = scenario_a();
        let mut q = queue();
        assert!(c.halt());
        assert!(!c.start(&mut q));
        assert!(q.is_empty());
        assert!(c.trajectory().is_empty());
    }

    #[test]
    fn foreign_tick_ignored() {
        let mut c = scenario_a();
        let mut q = queue();
        c.start(&mut q);
        let other = MotionTick { agent: AgentId(9), epoch: 0 };
        assert!(!c.on_tick(other, &mut q));
        assert_eq!(c.ticks(), 0);
    }

    #[test]
    fn set_speed_validates() {
        let mut c = scenario_a();
        assert!(c.set_speed(0.0).is_err());
        assert!(c.set_speed(20_000.0).is_err());
        assert_eq!(c.state().speed, 10.0);
        c.set_speed(20.0).unwrap();
        assert_eq!(c.state().speed, 20.0);

        // Step stays 10, so the interval halves.
        let mut q = queue();
        c.start(&mut q);
        assert_eq!(Scheduler::now(&q), SimTime::ZERO);
        assert_eq!(q.next_time(), Some(SimTime(500)));
    }
}

// ── Motion & energy ───────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use uav_core::{Position, SimTime};
    use uav_select::{LeastVisitedSelector, RandomSelector};

    use super::helpers::{controller, one_way, queue, run_until, scenario_a, square, AGENT};
    use crate::{HaltReason, Lifecycle, Placement};

    #[test]
    fn square_depletes_after_fifty_units() {
        let mut c = scenario_a();
        let mut q = queue();
        c.start(&mut q);
        run_until(&mut c, &mut q, SimTime(3_600_000));

        assert_eq!(c.lifecycle(), Lifecycle::Halted(HaltReason::Depleted));
        assert_eq!(c.energy().consumed(), 50.0);
        assert_eq!(c.energy().remaining_fraction(), 0.0);
        assert_eq!(c.ticks(), 5);
        // Start sample plus one per tick.
        assert_eq!(c.trajectory().len(), 6);
        assert_eq!(c.trajectory().last().unwrap().time, SimTime(5_000));
        assert!((c.trajectory().total_distance() - 50.0).abs() < 1e-9);
        assert!(q.is_empty());
    }

    #[test]
    fn partial_last_step_drains_exactly() {
        let mut c = controller(square(), RandomSelector::new(4, AGENT), 10.0, 10.0, 25.0, Position::ORIGIN);
        let mut q = queue();
        c.start(&mut q);
        run_until(&mut c, &mut q, SimTime(60_000));

        assert_eq!(c.lifecycle(), Lifecycle::Halted(HaltReason::Depleted));
        assert_eq!(c.energy().consumed(), 25.0);
        assert_eq!(c.ticks(), 3);
        match c.state().placement {
            Placement::OnEdge { progress, .. } => assert!((progress - 0.5).abs() < 1e-12),
            other => panic!("expected mid-edge, got {other:?}"),
        }
    }

    #[test]
    fn dead_end_halts_on_next_tick() {
        let mut c = controller(one_way(), RandomSelector::new(0, AGENT), 10.0, 10.0, 1_000.0, Position::ORIGIN);
        let mut q = queue();
        c.start(&mut q);

        run_until(&mut c, &mut q, SimTime(1_000));
        assert_eq!(c.lifecycle(), Lifecycle::Moving);
        assert_eq!(c.position(), Some(Position::planar(10.0, 0.0)));

        run_until(&mut c, &mut q, SimTime(2_000));
        let dead_end = c.graph().nearest_node(Position::planar(10.0, 0.0)).unwrap();
        assert_eq!(c.lifecycle(), Lifecycle::Halted(HaltReason::DeadEnd(dead_end)));
        assert_eq!(c.trajectory().len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn dead_end_start_halts_immediately() {
        let start = Position::planar(11.0, 1.0);
        let mut c = controller(one_way(), RandomSelector::new(0, AGENT), 10.0, 1.0, 100.0, start);
        let mut q = queue();
        assert!(c.start(&mut q));
        assert!(matches!(c.lifecycle(), Lifecycle::Halted(HaltReason::DeadEnd(_))));
        assert!(q.is_empty());
        assert_eq!(c.trajectory().len(), 1);
    }

    #[test]
    fn start_snaps_to_nearest_node() {
        let mut c = controller(square(), RandomSelector::new(0, AGENT), 1.0, 1.0, 100.0, Position::planar(9.0, 1.5));
        let mut q = queue();
        c.start(&mut q);
        let first = c.trajectory().samples()[0];
        assert_eq!(first.time, SimTime::ZERO);
        assert_eq!(first.position, Position::planar(10.0, 0.0));
    }

    #[test]
    fn zero_length_edge_passes_through() {
        use std::sync::Arc;
        use uav_graph::RoadGraphBuilder;

        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(Position::planar(0.0, 0.0));
        let twin = b.add_node(Position::planar(0.0, 0.0));
        let c_ = b.add_node(Position::planar(10.0, 0.0));
        b.add_directed_edge(a, twin).unwrap();
        b.add_directed_edge(twin, c_).unwrap();
        let graph = Arc::new(b.build());

        // Either coincident node may be snapped to; both routes end up five
        // units along `twin → c_` after one tick.
        let mut c = controller(graph, RandomSelector::new(0, AGENT), 10.0, 5.0, 100.0, Position::ORIGIN);
        let mut q = queue();
        c.start(&mut q);
        run_until(&mut c, &mut q, SimTime(500));

        assert_eq!(c.ticks(), 1);
        assert_eq!(c.position(), Some(Position::planar(5.0, 0.0)));
        assert_eq!(c.energy().consumed(), 5.0);
        assert_eq!(c.history().visits(twin), 1);
    }

    #[test]
    fn consecutive_samples_never_further_apart_than_step() {
        for (speed, step) in [(9_999.0, 10.0), (7.0, 10.0), (3.0, 1.0), (6_000.0, 7.0)] {
            let mut c = controller(square(), RandomSelector::new(5, AGENT), speed, step, 1.0e6, Position::ORIGIN);
            let mut q = queue();
            c.start(&mut q);
            run_until(&mut c, &mut q, SimTime(20_000));

            let samples = c.trajectory().samples();
            assert!(samples.len() > 10, "speed={speed}: only {} samples", samples.len());
            let max_gap = samples
                .windows(2)
                .map(|w| w[0].position.distance(w[1].position))
                .fold(0.0_f64, f64::max);
            assert!(max_gap <= step + 1e-9, "speed={speed} step={step}: gap {max_gap}");
        }
    }

    #[test]
    fn samples_follow_graph_and_time() {
        let mut c = controller(square(), RandomSelector::new(11, AGENT), 3.0, 1.0, 500.0, Position::ORIGIN);
        let mut q = queue();
        c.start(&mut q);
        run_until(&mut c, &mut q, SimTime(120_000));

        let samples = c.trajectory().samples();
        assert!(samples.len() > 100);
        for w in samples.windows(2) {
            assert!(w[0].time <= w[1].time);
            // Never further than one step between samples.
            assert!(w[0].position.distance(w[1].position) <= 1.0 + 1e-9);
        }
        for s in samples {
            let p = s.position;
            let on_perimeter = (p.x.abs() < 1e-9 || (p.x - 10.0).abs() < 1e-9)
                || (p.y.abs() < 1e-9 || (p.y - 10.0).abs() < 1e-9);
            assert!(on_perimeter, "{p} is off the street grid");
        }
    }

    #[test]
    fn energy_never_decreases_while_moving() {
        let mut c = controller(square(), RandomSelector::new(2, AGENT), 4.0, 2.0, 37.0, Position::ORIGIN);
        let mut q = queue();
        c.start(&mut q);
        let mut last = c.energy().consumed();
        while let Some((_, tick)) = q.pop() {
            c.on_tick(tick, &mut q);
            assert!(c.energy().consumed() >= last);
            assert!((0.0..=1.0).contains(&c.energy().remaining_fraction()));
            last = c.energy().consumed();
        }
        assert_eq!(c.lifecycle(), Lifecycle::Halted(HaltReason::Depleted));
        assert_eq!(c.energy().consumed(), 37.0);
    }

    #[test]
    fn least_visited_tours_the_block() {
        let mut c = controller(square(), LeastVisitedSelector, 10.0, 10.0, 1_000.0, Position::ORIGIN);
        let mut q = queue();
        c.start(&mut q);
        // Four edges, one tick for arrival and the selection folded into the next.
        run_until(&mut c, &mut q, SimTime(4_000));
        assert_eq!(c.history().distinct_nodes(), 4);
        assert_eq!(c.selector_name(), "least-visited");
    }
}
