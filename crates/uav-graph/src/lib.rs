//! `uav-graph` — static road graph, spatial index, and loader.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`graph`]  | `RoadGraph` (CSR + R-tree), `RoadGraphBuilder`, `GraphEdge`  |
//! | [`loader`] | `load_graph`, `load_graph_reader`, `LoadReport`              |
//! | [`error`]  | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod graph;
pub mod loader;


pub use error::{GraphError, GraphResult};
pub use graph::{GraphEdge, RoadGraph, RoadGraphBuilder};
pub use loader::{load_graph, load_graph_reader, LoadReport};
