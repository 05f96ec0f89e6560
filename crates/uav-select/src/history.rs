//! Record of the nodes an agent has passed through.

use rustc_hash::FxHashMap;

use uav_core::NodeId;

/// Ordered visit log plus a per-node visit counter.
///
/// The last entry is the node the agent currently stands on (or most
/// recently left); the one before it is the node it came from.
#[derive(Clone, Debug, Default)]
pub struct VisitHistory {
    order:  Vec<NodeId>,
    counts: FxHashMap<NodeId, u32>,
}

impl VisitHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arrival at `node`.
    pub fn record(&mut self, node: NodeId) {
        self.order.push(node);
        *self.counts.entry(node).or_insert(0) += 1;
    }

    /// Most recently visited node.
    #[inline]
    pub fn current(&self) -> Option<NodeId> {
        self.order.last().copied()
    }

    /// The node visited just before [`current`](Self::current).
    #[inline]
    pub fn previous(&self) -> Option<NodeId> {
        let n = self.order.len();
        if n >= 2 { Some(self.order[n - 2]) } else { None }
    }

    /// How many times `node` has been reached.
    #[inline]
    pub fn visits(&self, node: NodeId) -> u32 {
        self.counts.get(&node).copied().unwrap_or(0)
    }

    /// Number of distinct nodes seen so far.
    pub fn distinct_nodes(&self) -> usize {
        self.counts.len()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.order
    }
}
