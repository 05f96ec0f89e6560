//! Where the agent is on the graph.

use uav_core::{EdgeId, NodeId, Position};
use uav_graph::RoadGraph;

use crate::Lifecycle;

/// Graph-relative location.
///
/// The Cartesian position is never stored; it is always derived from the
/// placement, so the two cannot drift apart.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// Not yet placed on the graph (before `start`).
    Unplaced,
    /// Standing on an intersection.
    AtNode { node: NodeId },
    /// Travelling along `edge`, `progress` ∈ [0, 1) of the way to its end.
    OnEdge { edge: EdgeId, progress: f64 },
}

impl Placement {
    /// Cartesian position, or `None` when unplaced.
    pub fn position(&self, graph: &RoadGraph) -> Option<Position> {
        match *self {
            Placement::Unplaced                 => None,
            Placement::AtNode { node }          => Some(graph.position(node)),
            Placement::OnEdge { edge, progress } => Some(graph.point_on_edge(edge, progress)),
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        match *self {
            Placement::AtNode { node } => Some(node),
            _ => None,
        }
    }

    pub fn edge(&self) -> Option<EdgeId> {
        match *self {
            Placement::OnEdge { edge, .. } => Some(edge),
            _ => None,
        }
    }
}

/// Mutable per-agent state owned by the `MotionController`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub placement: Placement,
    /// Current speed, units per virtual second.
    pub speed:     f64,
    pub lifecycle: Lifecycle,
}

impl AgentState {
    pub fn new(speed: f64) -> Self {
        Self { placement: Placement::Unplaced, speed, lifecycle: Lifecycle::Idle }
    }
}
