//! In-memory multigraph used as the graph collaborator.
//!
//! Nodes are keyed by string and kept in insertion order. Edges are identified
//! by [`EdgeId`], so any number of edges may join the same pair of nodes in
//! either direction. Both carry open attribute maps so callers can choose the
//! attribute names that derived data (parallel ranks, shapes) is written under.

mod multigraph;
mod types;

pub use multigraph::{EdgeId, MultiGraph};
pub use types::{GraphData, GraphEdge, GraphNode};

use serde_json::{Map, Value};

/// Attribute map attached to every node and edge.
pub type Attributes = Map<String, Value>;

/// Build an attribute map from a JSON object literal. Non-object values give
/// an empty map.
pub fn attributes(value: Value) -> Attributes {
	match value {
		Value::Object(map) => map,
		_ => Attributes::new(),
	}
}
