//! The `NextHopSelector` trait — the extension point for routing policy.

use uav_core::{EdgeId, NodeId};
use uav_graph::RoadGraph;

use crate::{SelectError, SelectResult, VisitHistory};

/// Picks the edge an agent takes when it stands on a graph node.
///
/// Implementations may keep private state (an RNG stream, a goal, a
/// precomputed route), hence `&mut self`.  They must never return an edge
/// that does not start at `current`.
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysFirst;
///
/// impl NextHopSelector for AlwaysFirst {
///     fn select_next(&mut self, current: NodeId, graph: &RoadGraph, _: &VisitHistory)
///         -> SelectResult<EdgeId>
///     {
///         graph.neighbors(current).next().ok_or(SelectError::NoOutgoingEdge(current))
///     }
/// }
/// ```
pub trait NextHopSelector: Send {
    /// Choose an outgoing edge of `current`.
    ///
    /// Fails with [`SelectError::NoOutgoingEdge`] when `current` has out-degree 0.
    fn select_next(
        &mut self,
        current: NodeId,
        graph:   &RoadGraph,
        history: &VisitHistory,
    ) -> SelectResult<EdgeId>;

    /// Short name used in log lines and reports.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<T: NextHopSelector + ?Sized> NextHopSelector for Box<T> {
    fn select_next(
        &mut self,
        current: NodeId,
        graph:   &RoadGraph,
        history: &VisitHistory,
    ) -> SelectResult<EdgeId> {
        (**self).select_next(current, graph, history)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Outgoing edges of `current`, minus immediate backtracks when possible.
///
/// Order follows [`RoadGraph::neighbors`].  Never empty on success.
pub fn forward_candidates(
    current: NodeId,
    graph:   &RoadGraph,
    history: &VisitHistory,
) -> SelectResult<Vec<EdgeId>> {
    let all: Vec<EdgeId> = graph.neighbors(current).collect();
    if all.is_empty() {
        return Err(SelectError::NoOutgoingEdge(current));
    }
    let Some(prev) = history.previous() else {
        return Ok(all);
    };
    let forward: Vec<EdgeId> = all
        .iter()
        .copied()
        .filter(|&e| graph.edge_to(e) != prev)
        .collect();
    Ok(if forward.is_empty() { all } else { forward })
}
