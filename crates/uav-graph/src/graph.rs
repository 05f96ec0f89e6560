//! Road graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_length`) are sorted by
//! source node and indexed by `EdgeId`.  The sort is stable, so a node's
//! outgoing edges keep the order in which they were added, so `neighbors`
//! is an ordered sequence and selection over it is reproducible.
//!
//! Edge lengths are always derived from endpoint coordinates; callers never
//! supply them.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[x, y, z]` to the nearest `NodeId`.  Used
//! once at start-up to snap the agent's starting coordinate to a node.

use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use uav_core::{EdgeId, NodeId, Position};

use crate::{GraphError, GraphResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 3],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── GraphEdge ─────────────────────────────────────────────────────────────────

/// Read-only view of one directed edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphEdge {
    pub id:     EdgeId,
    pub from:   NodeId,
    pub to:     NodeId,
    /// Euclidean distance between the endpoint coordinates.
    pub length: f64,
}

impl GraphEdge {
    /// `true` when both endpoints share a coordinate.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length <= f64::EPSILON
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Immutable once built; share it behind an `Arc` for the agent's lifetime.
/// Construct with [`RoadGraphBuilder`] or [`load_graph`][crate::load_graph].
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    node_pos:    Vec<Position>,
    node_labels: Vec<String>,
    label_index: FxHashMap<String, NodeId>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.  Length = `node_count + 1`.
    node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    edge_from:   Vec<NodeId>,
    edge_to:     Vec<NodeId>,
    edge_length: Vec<f64>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadGraph")
            .field("nodes", &self.node_count())
            .field("edges", &self.edge_count())
            .finish_non_exhaustive()
    }
}

impl RoadGraph {
    /// A graph with no nodes or edges.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Node queries ──────────────────────────────────────────────────────

    /// Coordinate of `node`.
    ///
    /// # Panics
    /// Panics if `node` is not part of this graph.
    #[inline]
    pub fn position(&self, node: NodeId) -> Position {
        self.node_pos[node.index()]
    }

    /// The label the node was declared with in the graph description.
    #[inline]
    pub fn label(&self, node: NodeId) -> &str {
        &self.node_labels[node.index()]
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// `EdgeId`s of all outgoing edges from `node`, in insertion order.
    ///
    /// A contiguous index range; no heap allocation.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> impl ExactSizeIterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()];
        let end   = self.node_out_start[node.index() + 1];
        (start..end).map(EdgeId)
    }

    /// Out-degree of `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Full record for `edge`.
    #[inline]
    pub fn edge(&self, edge: EdgeId) -> GraphEdge {
        let i = edge.index();
        GraphEdge {
            id:     edge,
            from:   self.edge_from[i],
            to:     self.edge_to[i],
            length: self.edge_length[i],
        }
    }

    #[inline]
    pub fn edge_from(&self, edge: EdgeId) -> NodeId {
        self.edge_from[edge.index()]
    }

    #[inline]
    pub fn edge_to(&self, edge: EdgeId) -> NodeId {
        self.edge_to[edge.index()]
    }

    #[inline]
    pub fn edge_length(&self, edge: EdgeId) -> f64 {
        self.edge_length[edge.index()]
    }

    /// Cartesian position at fraction `progress` ∈ [0, 1] along `edge`.
    pub fn point_on_edge(&self, edge: EdgeId, progress: f64) -> Position {
        let from = self.position(self.edge_from(edge));
        let to   = self.position(self.edge_to(edge));
        from.lerp(to, progress.clamp(0.0, 1.0))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The node closest to `pos`.
    ///
    /// Returns `None` only if the graph has no nodes.
    pub fn nearest_node(&self, pos: Position) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&pos.to_array())
            .map(|e| e.id)
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Edges may only reference nodes that were already added; that is the
/// one structural invariant of the graph and it is checked here, at insert
/// time.
///
/// # Example
///
/// ```
/// use uav_core::Position;
/// use uav_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// let a = b.add_node(Position::planar(0.0, 0.0));
/// let c = b.add_node(Position::planar(0.0, 10.0));
/// b.add_road(a, c).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// ```
pub struct RoadGraphBuilder {
    nodes:       Vec<Position>,
    labels:      Vec<String>,
    label_index: FxHashMap<String, NodeId>,
    raw_edges:   Vec<(NodeId, NodeId)>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:       Vec::new(),
            labels:      Vec::new(),
            label_index: FxHashMap::default(),
            raw_edges:   Vec::new(),
        }
    }

    /// Add a node labelled with its own index and return its `NodeId`.
    pub fn add_node(&mut self, pos: Position) -> NodeId {
        let label = self.nodes.len().to_string();
        self.push_node(label, pos)
    }

    /// Add a node under an explicit label.
    ///
    /// Returns `None` if the label is already taken.
    pub fn add_labeled_node(&mut self, label: &str, pos: Position) -> Option<NodeId> {
        if self.label_index.contains_key(label) {
            return None;
        }
        Some(self.push_node(label.to_owned(), pos))
    }

    fn push_node(&mut self, label: String, pos: Position) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.label_index.insert(label.clone(), id);
        self.labels.push(label);
        self.nodes.push(pos);
        id
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        for node in [from, to] {
            if node.index() >= self.nodes.len() {
                return Err(GraphError::NodeNotFound(node));
            }
        }
        self.raw_edges.push((from, to));
        Ok(())
    }

    /// Convenience: add edges in **both directions** for a two-way street.
    pub fn add_road(&mut self, a: NodeId, b: NodeId) -> GraphResult<()> {
        self.add_directed_edge(a, b)?;
        self.add_directed_edge(b, a)
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> RoadGraph {
        let node_count = self.nodes.len();

        let mut raw = self.raw_edges;
        raw.sort_by_key(|&(from, _)| from.0);

        let edge_from: Vec<NodeId> = raw.iter().map(|&(f, _)| f).collect();
        let edge_to:   Vec<NodeId> = raw.iter().map(|&(_, t)| t).collect();
        let edge_length: Vec<f64> = raw
            .iter()
            .map(|&(f, t)| self.nodes[f.index()].distance(self.nodes[t.index()]))
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _) in &raw {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, pos)| NodeEntry { point: pos.to_array(), id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadGraph {
            node_pos: self.nodes,
            node_labels: self.labels,
            label_index: self.label_index,
            node_out_start,
            edge_from,
            edge_to,
            edge_length,
            spatial_idx,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
