//! Uniform random next-hop choice.

use tracing::debug;

use uav_core::{AgentId, AgentRng, EdgeId, NodeId};
use uav_graph::RoadGraph;

use crate::{forward_candidates, NextHopSelector, SelectError, SelectResult, VisitHistory};

/// Picks uniformly among the forward candidates of the current node.
///
/// Owns its RNG stream, so two selectors built from the same `(seed, agent)`
/// produce identical choices on identical graphs.
pub struct RandomSelector {
    rng: AgentRng,
}

impl RandomSelector {
    pub fn new(seed: u64, agent: AgentId) -> Self {
        Self { rng: AgentRng::new(seed, agent) }
    }
}

impl NextHopSelector for RandomSelector {
    fn select_next(
        &mut self,
        current: NodeId,
        graph:   &RoadGraph,
        history: &VisitHistory,
    ) -> SelectResult<EdgeId> {
        let candidates = forward_candidates(current, graph, history)?;
        let edge = *self
            .rng
            .pick(&candidates)
            .ok_or(SelectError::NoOutgoingEdge(current))?;
        debug!(%current, %edge, choices = candidates.len(), "random next hop");
        Ok(edge)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
