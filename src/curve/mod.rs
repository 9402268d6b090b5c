//! Parallel-edge layout: rank indexing, curvature and shape classification.
//!
//! Run once when the graph is built:
//!
//! ```
//! use parallel_graph::curve::{
//!     CurveConfig, ParallelIndexOptions, classify_edges, index_parallel_edges,
//! };
//! use parallel_graph::graph::{Attributes, MultiGraph};
//!
//! let mut graph = MultiGraph::new();
//! graph.add_node("a", Attributes::new()).unwrap();
//! graph.add_node("b", Attributes::new()).unwrap();
//! graph.add_edge("a", "b", Attributes::new()).unwrap();
//! graph.add_edge("a", "b", Attributes::new()).unwrap();
//!
//! let options = ParallelIndexOptions::default();
//! index_parallel_edges(&mut graph, &options).unwrap();
//! classify_edges(&mut graph, &options, &CurveConfig::default()).unwrap();
//! ```

mod classify;
mod curvature;
mod index;

pub use classify::{
	CURVATURE_ATTRIBUTE, EdgeKind, EdgeShape, TYPE_ATTRIBUTE, classify, classify_edges,
};
pub use curvature::{
	CurveConfig, DEFAULT_AMPLITUDE, DEFAULT_EDGE_CURVATURE, curvature, max_curvature,
};
pub use index::{ParallelGroup, ParallelIndexOptions, index_parallel_edges, parallel_groups};
