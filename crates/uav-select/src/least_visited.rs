//! Deterministic exploration: head for the least-visited neighbor.

use uav_core::{EdgeId, NodeId};
use uav_graph::RoadGraph;

use crate::{forward_candidates, NextHopSelector, SelectResult, VisitHistory};

/// Chooses the forward candidate whose target has the fewest recorded
/// visits.  Ties go to the lowest `EdgeId`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LeastVisitedSelector;

impl NextHopSelector for LeastVisitedSelector {
    fn select_next(
        &mut self,
        current: NodeId,
        graph:   &RoadGraph,
        history: &VisitHistory,
    ) -> SelectResult<EdgeId> {
        let candidates = forward_candidates(current, graph, history)?;
        // `forward_candidates` is never empty on success.
        let mut best = candidates[0];
        let mut best_key = (history.visits(graph.edge_to(best)), best);
        for &e in &candidates[1..] {
            let key = (history.visits(graph.edge_to(e)), e);
            if key < best_key {
                best = e;
                best_key = key;
            }
        }
        Ok(best)
    }

    fn name(&self) -> &'static str {
        "least-visited"
    }
}
