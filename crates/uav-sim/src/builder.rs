//! Fluent builder for constructing a [`Sim`].

use std::sync::Arc;

use uav_core::{AgentId, NodeId, Position};
use uav_graph::{load_graph, RoadGraph};
use uav_motion::MotionController;
use uav_schedule::{EventQueue, ScheduledControl};
use uav_select::NextHopSelector;

use crate::{MissionConfig, Sim, SimError, SimEvent, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                         |
/// |-------------------|-------------------------------------------------|
/// | `.graph(g)`       | loaded from `config.graph_path`                 |
/// | `.selector(s)`    | built from `config.strategy` and `config.seed`  |
/// | `.controls(v)`    | no scripted pause / resume / halt               |
/// | `.agent(id)`      | `AgentId(0)`                                    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config)
///     .graph(Arc::new(graph))
///     .controls(load_controls_csv(path)?)
///     .build()?;
/// ```
pub struct SimBuilder {
    config:   MissionConfig,
    graph:    Option<Arc<RoadGraph>>,
    selector: Option<Box<dyn NextHopSelector>>,
    controls: Vec<ScheduledControl>,
    agent:    AgentId,
}

impl SimBuilder {
    pub fn new(config: MissionConfig) -> Self {
        Self {
            config,
            graph:    None,
            selector: None,
            controls: Vec::new(),
            agent:    AgentId(0),
        }
    }

    /// Use an already-built graph instead of loading `config.graph_path`.
    pub fn graph(mut self, graph: Arc<RoadGraph>) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Override the strategy named in the config.
    pub fn selector(mut self, selector: Box<dyn NextHopSelector>) -> Self {
        self.selector = Some(selector);
        self
    }

    /// Scripted external commands.
    pub fn controls(mut self, controls: Vec<ScheduledControl>) -> Self {
        self.controls = controls;
        self
    }

    pub fn agent(mut self, agent: AgentId) -> Self {
        self.agent = agent;
        self
    }

    /// Validate the config, load the graph if needed, and return an idle
    /// [`Sim`] at virtual time zero.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let graph = match self.graph {
            Some(g) => g,
            None => Arc::new(load_graph(&self.config.graph_path)?.0),
        };
        if graph.is_empty() {
            return Err(SimError::InvalidConfiguration(format!(
                "graph {} has no nodes",
                self.config.graph_path.display()
            )));
        }

        let selector = match self.selector {
            Some(s) => s,
            None => self.config.strategy_kind()?.build(self.config.seed, self.agent),
        };
        let start = self
            .config
            .start_position()?
            .unwrap_or_else(|| first_node_position(&graph));

        let controller = MotionController::new(
            self.agent,
            Arc::clone(&graph),
            selector,
            self.config.energy_model()?,
            self.config.motion_config()?,
            start,
        )?;

        let mut queue: EventQueue<SimEvent> = EventQueue::new();
        for c in &self.controls {
            queue.push(c.at, SimEvent::Control(c.command));
        }

        Ok(Sim::new(self.config, graph, controller, queue))
    }
}

/// Node 0 is the first node declared in the graph description.
fn first_node_position(graph: &RoadGraph) -> Position {
    graph.position(NodeId(0))
}
