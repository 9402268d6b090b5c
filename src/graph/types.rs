//! Serialized graph documents accepted by [`MultiGraph::from_data`](super::MultiGraph::from_data).

use serde::{Deserialize, Serialize};

use super::Attributes;

/// A node entry in a graph document.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in edges.
	#[serde(alias = "id")]
	pub key: String,
	/// Free-form attributes (`label`, `x`, `y`, `size`, `type`, `image`, `color`).
	#[serde(default)]
	pub attributes: Attributes,
}

/// An edge entry in a graph document. Repeated source/target pairs are kept
/// as distinct edges.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GraphEdge {
	/// Source node key.
	pub source: String,
	/// Target node key.
	pub target: String,
	/// Free-form attributes (`size`, `color`, precomputed indexer output...).
	#[serde(default)]
	pub attributes: Attributes,
}

/// Complete graph document: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GraphData {
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	#[serde(default, alias = "links")]
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// Parse a JSON graph document.
	pub fn from_json(text: &str) -> crate::Result<Self> {
		Ok(serde_json::from_str(text)?)
	}
}
