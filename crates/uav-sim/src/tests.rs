//! Unit tests for uav-sim.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use uav_core::{Position, SimTime};
    use uav_graph::{RoadGraph, RoadGraphBuilder};
    use uav_motion::{Lifecycle, MotionController, TrajectoryRecorder};

    use crate::{MissionConfig, SimObserver, SimSummary};

    pub fn square() -> Arc<RoadGraph> {
        let mut b = RoadGraphBuilder::new();
        let n0 = b.add_node(Position::planar(0.0, 0.0));
        let n1 = b.add_node(Position::planar(10.0, 0.0));
        let n2 = b.add_node(Position::planar(10.0, 10.0));
        let n3 = b.add_node(Position::planar(0.0, 10.0));
        b.add_road(n0, n1).unwrap();
        b.add_road(n1, n2).unwrap();
        b.add_road(n2, n3).unwrap();
        b.add_road(n3, n0).unwrap();
        Arc::new(b.build())
    }

    /// Speed 10, one tick per 10-unit edge.
    pub fn config(capacity: f64, duration_secs: f64) -> MissionConfig {
        let mut c = MissionConfig::new("unused.graph", 10.0, 5.0, capacity, duration_secs);
        c.step_length = 10.0;
        c
    }

    #[derive(Default)]
    pub struct Recorder {
        pub ticks:       Vec<SimTime>,
        pub transitions: Vec<(SimTime, Lifecycle, Lifecycle)>,
        pub ends:        Vec<(SimSummary, usize)>,
    }

    impl SimObserver for Recorder {
        fn on_tick(&mut self, now: SimTime, _controller: &MotionController) {
            self.ticks.push(now);
        }

        fn on_transition(&mut self, now: SimTime, from: Lifecycle, to: Lifecycle) {
            self.transitions.push((now, from, to));
        }

        fn on_sim_end(&mut self, summary: &SimSummary, trajectory: &TrajectoryRecorder) {
            self.ends.push((summary.clone(), trajectory.len()));
        }
    }
}

// ── MissionConfig ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod config {
    use std::path::PathBuf;

    use uav_core::{Position, SimTime};
    use uav_select::StrategyKind;

    use crate::{MissionConfig, SimError};

    const FULL: &str = r#"
graph_path    = "city.graph"
speed         = 12.5
voltage       = 11.1
capacity      = 1000
duration_secs = 90.5
strategy      = "least-visited"
seed          = 7
step_length   = 2.0
start         = [3.0, 4.0]
cell_width    = 5.0
cell_height   = 8.0
energy_per_unit       = 0.5
energy_per_unit_speed = 0.1
"#;

    #[test]
    fn parses_every_field() {
        let c = MissionConfig::from_toml_str(FULL).unwrap();
        assert_eq!(c.graph_path, PathBuf::from("city.graph"));
        assert_eq!(c.speed, 12.5);
        assert_eq!(c.capacity, 1000.0);
        assert_eq!(c.strategy_kind().unwrap(), StrategyKind::LeastVisited);
        assert_eq!(c.seed, 7);
        assert_eq!(c.start_position().unwrap(), Some(Position::planar(3.0, 4.0)));
        assert_eq!(c.horizon(), SimTime(90_500));
        assert_eq!(c.consumption().unwrap().per_unit_speed(), 0.1);
        c.validate().unwrap();
    }

    #[test]
    fn defaults() {
        let c = MissionConfig::from_toml_str(
            "graph_path = \"g\"\nspeed = 1\nvoltage = 1\ncapacity = 1\nduration_secs = 1\n",
        )
        .unwrap();
        assert_eq!(c.strategy, "random");
        assert_eq!(c.seed, 0);
        assert_eq!(c.step_length, 1.0);
        assert_eq!(c.start, None);
        assert_eq!((c.cell_width, c.cell_height), (10.0, 10.0));
        assert_eq!((c.energy_per_unit, c.energy_per_unit_speed), (1.0, 0.0));
        assert_eq!(c, MissionConfig::new("g", 1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn unknown_field_rejected() {
        let err = MissionConfig::from_toml_str(
            "graph_path = \"g\"\nspeed = 1\nvoltage = 1\ncapacity = 1\nduration_secs = 1\nwarp = 9\n",
        )
        .unwrap_err();
        assert!(matches!(err, SimError::ConfigParse(_)));
    }

    #[test]
    fn missing_required_field() {
        assert!(MissionConfig::from_toml_str("graph_path = \"g\"\nspeed = 1\n").is_err());
    }

    #[test]
    fn validation_failures() {
        let base = MissionConfig::new("g", 10.0, 5.0, 50.0, 60.0);
        let cases: [fn(&mut MissionConfig); 12] = [
            |c| c.speed = 0.0,
            |c| c.voltage = -1.0,
            |c| c.capacity = 0.0,
            |c| c.duration_secs = 0.0,
            |c| c.duration_secs = 0.0001,
            |c| c.step_length = f64::NAN,
            |c| c.cell_width = 0.0,
            |c| c.start = Some(vec![f64::INFINITY, 0.0]),
            |c| c.start = Some(vec![1.0]),
            |c| c.start = Some(vec![1.0, 2.0, 3.0, 4.0]),
            |c| c.start = Some(vec![1.0, 2.0, f64::NAN]),
            |c| c.energy_per_unit = 0.0,
        ];
        for (i, mutate) in cases.iter().enumerate() {
            let mut c = base.clone();
            mutate(&mut c);
            assert!(
                matches!(c.validate(), Err(SimError::InvalidConfiguration(_)) | Err(SimError::Energy(_))),
                "case {i} accepted"
            );
        }
    }

    #[test]
    fn start_accepts_altitude() {
        let mut c = MissionConfig::from_toml_str(&FULL.replace("[3.0, 4.0]", "[3.0, 4.0, 120.0]")).unwrap();
        assert_eq!(c.start_position().unwrap(), Some(Position::new(3.0, 4.0, 120.0)));
        c.validate().unwrap();

        c.start = None;
        assert_eq!(c.start_position().unwrap(), None);
    }

    #[test]
    fn step_finer_than_a_millisecond_rejected() {
        // Cells clamp the step to 10; at 15000 units/s that is 0.67 ms.
        let mut c = MissionConfig::new("g", 15_000.0, 5.0, 50.0, 60.0);
        c.step_length = 10.0;
        assert!(matches!(c.validate(), Err(SimError::Motion(_))));

        c.speed = 9_000.0;
        c.validate().unwrap();
    }

    #[test]
    fn unknown_strategy() {
        let mut c = MissionConfig::new("g", 10.0, 5.0, 50.0, 60.0);
        c.strategy = "teleport".into();
        assert!(matches!(c.validate(), Err(SimError::Select(_))));
    }

    #[test]
    fn step_clamped_to_cell() {
        let mut c = MissionConfig::new("g", 10.0, 5.0, 50.0, 60.0);
        c.step_length = 25.0;
        c.cell_width = 8.0;
        c.cell_height = 12.0;
        assert_eq!(c.effective_step(), 8.0);
        assert_eq!(c.motion_config().unwrap().step_length, 8.0);
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mission.toml");
        std::fs::write(&path, FULL).unwrap();
        let c = MissionConfig::from_toml_file(&path).unwrap();
        assert_eq!(c.seed, 7);
        assert!(matches!(
            MissionConfig::from_toml_file(&dir.path().join("nope.toml")),
            Err(SimError::Io(_))
        ));
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use std::sync::Arc;

    use uav_graph::{GraphError, RoadGraph};

    use crate::{MissionConfig, SimBuilder, SimError};

    #[test]
    fn loads_graph_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.graph");
        std::fs::write(&path, "node a 0 0\nnode b 10 0\nroad a b\n").unwrap();
        let sim = SimBuilder::new(MissionConfig::new(&path, 1.0, 1.0, 10.0, 5.0)).build().unwrap();
        assert_eq!(sim.graph().node_count(), 2);
        assert_eq!(sim.now(), uav_core::SimTime::ZERO);
    }

    #[test]
    fn missing_graph_file() {
        let cfg = MissionConfig::new("/no/such/city.graph", 1.0, 1.0, 10.0, 5.0);
        assert!(matches!(
            SimBuilder::new(cfg).build(),
            Err(SimError::Graph(GraphError::Io(_)))
        ));
    }

    #[test]
    fn dangling_edge_aborts_before_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.graph");
        std::fs::write(&path, "node a 0 0\nroad a ghost\n").unwrap();
        let cfg = MissionConfig::new(&path, 1.0, 1.0, 10.0, 5.0);
        assert!(matches!(
            SimBuilder::new(cfg).build(),
            Err(SimError::Graph(GraphError::UnknownNode { .. }))
        ));
    }

    #[test]
    fn empty_graph_rejected() {
        let cfg = MissionConfig::new("mem", 1.0, 1.0, 10.0, 5.0);
        assert!(matches!(
            SimBuilder::new(cfg).graph(Arc::new(RoadGraph::empty())).build(),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = MissionConfig::new("mem", -1.0, 1.0, 10.0, 5.0);
        assert!(SimBuilder::new(cfg).graph(super::helpers::square()).build().is_err());
    }
}

// ── Running missions ──────────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use std::sync::Arc;

    use uav_core::{Position, SimTime};
    use uav_graph::RoadGraphBuilder;
    use uav_motion::{HaltReason, Lifecycle};
    use uav_schedule::{ControlCommand, ScheduledControl};
    use uav_select::LeastVisitedSelector;

    use super::helpers::{config, square, Recorder};
    use crate::{MissionConfig, NoopObserver, SimBuilder};

    #[test]
    fn square_runs_dry_after_fifty_units() {
        let mut sim = SimBuilder::new(config(50.0, 3_600.0)).graph(square()).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.lifecycle, Lifecycle::Halted(HaltReason::Depleted));
        assert_eq!(summary.consumed_energy, 50.0);
        assert_eq!(summary.remaining_fraction, 0.0);
        assert_eq!(summary.final_time, SimTime(5_000));
        assert_eq!(summary.ticks, 5);
        assert_eq!(summary.samples, 6);
        // Distance is bounded by capacity / consumption rate.
        assert!(summary.distance <= 50.0 + 1e-9);
    }

    #[test]
    fn fast_flight_samples_every_cell() {
        let mut cfg = MissionConfig::new("unused.graph", 4_999.0, 5.0, 1.0e6, 2.0);
        cfg.step_length = 25.0;
        cfg.cell_width = 5.0;
        cfg.cell_height = 7.0;
        let mut sim = SimBuilder::new(cfg).graph(square()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();

        let samples = sim.trajectory().samples();
        assert!(samples.len() > 100);
        for w in samples.windows(2) {
            let gap = w[0].position.distance(w[1].position);
            assert!(gap <= 5.0 + 1e-9, "gap {gap} at {:?}", w[1].time);
        }
    }

    #[test]
    fn dead_end_halts_without_error() {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(Position::planar(0.0, 0.0));
        let z = b.add_node(Position::planar(10.0, 0.0));
        b.add_directed_edge(a, z).unwrap();

        let mut sim = SimBuilder::new(config(1_000.0, 60.0)).graph(Arc::new(b.build())).build().unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(summary.lifecycle, Lifecycle::Halted(HaltReason::DeadEnd(z)));
        assert_eq!(summary.final_time, SimTime(2_000));
        assert_eq!(summary.samples, 2);
        assert_eq!(summary.consumed_energy, 10.0);
    }

    #[test]
    fn horizon_is_inclusive_and_parks_clock() {
        let mut sim = SimBuilder::new(config(1_000.0, 3.5)).graph(square()).build().unwrap();
        let mut obs = Recorder::default();
        let summary = sim.run(&mut obs).unwrap();

        assert_eq!(summary.lifecycle, Lifecycle::Moving);
        assert_eq!(obs.ticks, vec![SimTime(1_000), SimTime(2_000), SimTime(3_000)]);
        assert_eq!(summary.final_time, SimTime(3_500));

        let mut sim = SimBuilder::new(config(1_000.0, 3.0)).graph(square()).build().unwrap();
        assert_eq!(sim.run(&mut NoopObserver).unwrap().ticks, 3);
    }

    #[test]
    fn scripted_pause_and_resume() {
        let controls = vec![
            ScheduledControl { at: SimTime(1_500), command: ControlCommand::Pause },
            ScheduledControl { at: SimTime(4_000), command: ControlCommand::Resume },
        ];
        let mut sim = SimBuilder::new(config(1_000.0, 6.0))
            .graph(square())
            .controls(controls)
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        let summary = sim.run(&mut obs).unwrap();

        assert_eq!(obs.ticks, vec![SimTime(1_000), SimTime(5_000), SimTime(6_000)]);
        assert_eq!(summary.ticks, 3);
        assert_eq!(
            obs.transitions,
            vec![
                (SimTime::ZERO, Lifecycle::Idle, Lifecycle::Moving),
                (SimTime(1_500), Lifecycle::Moving, Lifecycle::Paused),
                (SimTime(4_000), Lifecycle::Paused, Lifecycle::Moving),
            ]
        );
    }

    #[test]
    fn external_halt_stops_the_clock() {
        let mut sim = SimBuilder::new(config(1_000.0, 60.0)).graph(square()).build().unwrap();
        sim.schedule_control(SimTime(2_500), ControlCommand::Halt);
        // Commands after a halt are no-ops.
        sim.schedule_control(SimTime(3_000), ControlCommand::Resume);
        let mut obs = Recorder::default();
        let summary = sim.run(&mut obs).unwrap();

        assert_eq!(summary.lifecycle, Lifecycle::Halted(HaltReason::External));
        assert_eq!(summary.final_time, SimTime(2_500));
        assert_eq!(summary.samples, 3);
        assert_eq!(obs.ends.len(), 1);
        assert_eq!(obs.ends[0].1, summary.samples);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = |seed| {
            let mut cfg = config(200.0, 60.0);
            cfg.seed = seed;
            cfg.step_length = 1.0;
            let mut sim = SimBuilder::new(cfg).graph(square()).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            sim.trajectory().export()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn selector_override() {
        let mut sim = SimBuilder::new(config(1_000.0, 4.0))
            .graph(square())
            .selector(Box::new(LeastVisitedSelector))
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.controller().selector_name(), "least-visited");
        assert_eq!(summary.distinct_nodes, 4);
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut sim = SimBuilder::new(config(50.0, 3_600.0)).graph(square()).build().unwrap();
        let first = sim.run(&mut NoopObserver).unwrap();
        let second = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn start_defaults_to_first_node() {
        let mut cfg = config(1_000.0, 1.0);
        cfg.start = None;
        let mut sim = SimBuilder::new(cfg).graph(square()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.trajectory().samples()[0].position, Position::ORIGIN);

        let mut cfg = config(1_000.0, 1.0);
        cfg.start = Some(vec![9.0, 9.0]);
        let mut sim = SimBuilder::new(cfg).graph(square()).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.trajectory().samples()[0].position, Position::planar(10.0, 10.0));
    }
}
