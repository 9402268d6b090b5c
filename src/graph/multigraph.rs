//! Multigraph storage with attribute access, neighbor lookup and filtering.

use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use super::{Attributes, GraphData};
use crate::error::GraphError;

/// Identity of an edge. Two edges with the same endpoints and attributes are
/// still distinct edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
	/// Position of the edge in insertion order.
	pub fn index(self) -> usize {
		self.0
	}
}

#[derive(Clone, Debug)]
struct NodeEntry {
	key: String,
	attributes: Attributes,
	/// Incident edges, in insertion order. Self-loops appear once.
	incident: Vec<EdgeId>,
}

#[derive(Clone, Debug)]
struct EdgeEntry {
	source: usize,
	target: usize,
	attributes: Attributes,
}

/// A directed multigraph with string node keys.
#[derive(Clone, Debug, Default)]
pub struct MultiGraph {
	nodes: Vec<NodeEntry>,
	node_index: HashMap<String, usize>,
	edges: Vec<EdgeEntry>,
}

impl MultiGraph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a graph from a serialized document.
	///
	/// Edges referencing unknown nodes are skipped with a warning, the same
	/// way the viewer drops dangling links. Duplicate node keys are an error.
	pub fn from_data(data: &GraphData) -> Result<Self, GraphError> {
		let mut graph = Self::new();
		for node in &data.nodes {
			graph.add_node(node.key.clone(), node.attributes.clone())?;
		}
		for edge in &data.edges {
			if let Err(e) = graph.add_edge(&edge.source, &edge.target, edge.attributes.clone()) {
				warn!("skipping edge {} -> {}: {}", edge.source, edge.target, e);
			}
		}
		Ok(graph)
	}

	/// Number of nodes.
	pub fn order(&self) -> usize {
		self.nodes.len()
	}

	/// Number of edges.
	pub fn size(&self) -> usize {
		self.edges.len()
	}

	pub fn add_node(
		&mut self,
		key: impl Into<String>,
		attributes: Attributes,
	) -> Result<(), GraphError> {
		let key = key.into();
		if self.node_index.contains_key(&key) {
			return Err(GraphError::DuplicateNode(key));
		}
		self.node_index.insert(key.clone(), self.nodes.len());
		self.nodes.push(NodeEntry {
			key,
			attributes,
			incident: Vec::new(),
		});
		Ok(())
	}

	pub fn add_edge(
		&mut self,
		source: &str,
		target: &str,
		attributes: Attributes,
	) -> Result<EdgeId, GraphError> {
		let src = self.position(source)?;
		let tgt = self.position(target)?;
		let id = EdgeId(self.edges.len());
		self.edges.push(EdgeEntry {
			source: src,
			target: tgt,
			attributes,
		});
		self.nodes[src].incident.push(id);
		if src != tgt {
			self.nodes[tgt].incident.push(id);
		}
		Ok(id)
	}

	pub fn has_node(&self, key: &str) -> bool {
		self.node_index.contains_key(key)
	}

	/// Node keys in insertion order.
	pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
		self.nodes.iter().map(|n| n.key.as_str())
	}

	/// Edge ids in insertion order.
	pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
		(0..self.edges.len()).map(EdgeId)
	}

	pub fn node_attributes(&self, key: &str) -> Option<&Attributes> {
		self.node_index
			.get(key)
			.map(|&i| &self.nodes[i].attributes)
	}

	pub fn node_attribute(&self, key: &str, name: &str) -> Option<&Value> {
		self.node_attributes(key)?.get(name)
	}

	/// Shallow-merge attributes into a node, overwriting existing names.
	pub fn merge_node_attributes(
		&mut self,
		key: &str,
		attributes: Attributes,
	) -> Result<(), GraphError> {
		let i = self.position(key)?;
		self.nodes[i].attributes.extend(attributes);
		Ok(())
	}

	/// The node's `label` attribute, if it is a string.
	pub fn label(&self, key: &str) -> Option<&str> {
		self.node_attribute(key, "label")?.as_str()
	}

	pub fn edge_attributes(&self, edge: EdgeId) -> Option<&Attributes> {
		self.edges.get(edge.0).map(|e| &e.attributes)
	}

	pub fn edge_attribute(&self, edge: EdgeId, name: &str) -> Option<&Value> {
		self.edge_attributes(edge)?.get(name)
	}

	pub fn set_edge_attribute(
		&mut self,
		edge: EdgeId,
		name: &str,
		value: Value,
	) -> Result<(), GraphError> {
		let entry = self.edge_mut(edge)?;
		entry.attributes.insert(name.to_string(), value);
		Ok(())
	}

	/// Remove an attribute, returning its previous value.
	pub fn remove_edge_attribute(
		&mut self,
		edge: EdgeId,
		name: &str,
	) -> Result<Option<Value>, GraphError> {
		Ok(self.edge_mut(edge)?.attributes.remove(name))
	}

	/// Shallow-merge attributes into an edge, overwriting existing names.
	pub fn merge_edge_attributes(
		&mut self,
		edge: EdgeId,
		attributes: Attributes,
	) -> Result<(), GraphError> {
		self.edge_mut(edge)?.attributes.extend(attributes);
		Ok(())
	}

	/// Source and target keys of an edge.
	pub fn extremities(&self, edge: EdgeId) -> Option<(&str, &str)> {
		let e = self.edges.get(edge.0)?;
		Some((
			self.nodes[e.source].key.as_str(),
			self.nodes[e.target].key.as_str(),
		))
	}

	pub fn source(&self, edge: EdgeId) -> Option<&str> {
		self.extremities(edge).map(|(s, _)| s)
	}

	pub fn target(&self, edge: EdgeId) -> Option<&str> {
		self.extremities(edge).map(|(_, t)| t)
	}

	/// Whether `node` is the source or the target of `edge`.
	pub fn has_extremity(&self, edge: EdgeId, node: &str) -> bool {
		self.extremities(edge)
			.is_some_and(|(s, t)| s == node || t == node)
	}

	/// Distinct nodes adjacent to `node` in either direction, in order of
	/// first connecting edge. The node itself is not its own neighbor, even
	/// with a self-loop. Unknown nodes have no neighbors.
	pub fn neighbors(&self, node: &str) -> Vec<&str> {
		let Some(&i) = self.node_index.get(node) else {
			return Vec::new();
		};
		let mut seen = vec![false; self.nodes.len()];
		seen[i] = true;
		let mut out = Vec::new();
		for &edge in &self.nodes[i].incident {
			let e = &self.edges[edge.0];
			let other = if e.source == i { e.target } else { e.source };
			if !seen[other] {
				seen[other] = true;
				out.push(self.nodes[other].key.as_str());
			}
		}
		out
	}

	/// Edges incident to `node`, in insertion order.
	pub fn incident_edges(&self, node: &str) -> &[EdgeId] {
		self.node_index
			.get(node)
			.map(|&i| self.nodes[i].incident.as_slice())
			.unwrap_or(&[])
	}

	/// Keys of the nodes matching `predicate`, in insertion order.
	pub fn filter_nodes<F>(&self, mut predicate: F) -> Vec<&str>
	where
		F: FnMut(&str, &Attributes) -> bool,
	{
		self.nodes
			.iter()
			.filter(|n| predicate(&n.key, &n.attributes))
			.map(|n| n.key.as_str())
			.collect()
	}

	/// Edges matching `predicate`, which receives the edge, its source and
	/// target keys and its attributes.
	pub fn filter_edges<F>(&self, mut predicate: F) -> Vec<EdgeId>
	where
		F: FnMut(EdgeId, &str, &str, &Attributes) -> bool,
	{
		self.edges
			.iter()
			.enumerate()
			.filter(|(i, e)| {
				predicate(
					EdgeId(*i),
					&self.nodes[e.source].key,
					&self.nodes[e.target].key,
					&e.attributes,
				)
			})
			.map(|(i, _)| EdgeId(i))
			.collect()
	}

	fn position(&self, key: &str) -> Result<usize, GraphError> {
		self.node_index
			.get(key)
			.copied()
			.ok_or_else(|| GraphError::NodeNotFound(key.to_string()))
	}

	fn edge_mut(&mut self, edge: EdgeId) -> Result<&mut EdgeEntry, GraphError> {
		self.edges
			.get_mut(edge.0)
			.ok_or(GraphError::EdgeNotFound(edge.0))
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::graph::attributes;

	fn triangle() -> MultiGraph {
		let mut g = MultiGraph::new();
		for key in ["a", "b", "c"] {
			g.add_node(key, attributes(json!({ "label": key.to_uppercase() })))
				.unwrap();
		}
		g.add_edge("a", "b", Attributes::new()).unwrap();
		g.add_edge("b", "a", Attributes::new()).unwrap();
		g.add_edge("c", "a", Attributes::new()).unwrap();
		g
	}

	#[test]
	fn parallel_edges_keep_their_identity() {
		let g = triangle();
		assert_eq!(g.size(), 3);
		let ids: Vec<_> = g.edges().collect();
		assert_ne!(ids[0], ids[1]);
		assert_eq!(g.extremities(ids[0]), Some(("a", "b")));
		assert_eq!(g.extremities(ids[1]), Some(("b", "a")));
	}

	#[test]
	fn neighbors_are_deduplicated_and_direction_agnostic() {
		let g = triangle();
		assert_eq!(g.neighbors("a"), vec!["b", "c"]);
		assert_eq!(g.neighbors("c"), vec!["a"]);
		assert!(g.neighbors("missing").is_empty());
	}

	#[test]
	fn self_loop_is_not_a_neighbor() {
		let mut g = triangle();
		g.add_edge("c", "c", Attributes::new()).unwrap();
		assert_eq!(g.neighbors("c"), vec!["a"]);
		assert_eq!(g.incident_edges("c").len(), 2);
	}

	#[test]
	fn rejects_unknown_and_duplicate_nodes() {
		let mut g = triangle();
		assert_eq!(
			g.add_node("a", Attributes::new()),
			Err(GraphError::DuplicateNode("a".into()))
		);
		assert_eq!(
			g.add_edge("a", "z", Attributes::new()),
			Err(GraphError::NodeNotFound("z".into()))
		);
	}

	#[test]
	fn edge_attribute_merge_set_and_remove() {
		let mut g = triangle();
		let e = g.edges().next().unwrap();
		g.merge_edge_attributes(e, attributes(json!({ "size": 3, "color": "green" })))
			.unwrap();
		g.set_edge_attribute(e, "size", json!(5)).unwrap();
		assert_eq!(g.edge_attribute(e, "size"), Some(&json!(5)));
		assert_eq!(
			g.remove_edge_attribute(e, "color").unwrap(),
			Some(json!("green"))
		);
		assert!(g.edge_attribute(e, "color").is_none());
	}

	#[test]
	fn filters_preserve_insertion_order() {
		let g = triangle();
		assert_eq!(g.filter_nodes(|k, _| k != "b"), vec!["a", "c"]);
		let touching_c = g.filter_edges(|_, s, t, _| s == "c" || t == "c");
		assert_eq!(touching_c.len(), 1);
		assert!(g.has_extremity(touching_c[0], "a"));
	}
}
