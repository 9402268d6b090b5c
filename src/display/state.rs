//! Interactive display state and the overrides derived from it.
//!
//! Hover and search are tracked as separate sub-states. Each is either
//! cleared or active, so a neighbor set can only exist together with the node
//! it belongs to, and a selection never coexists with a suggestion list.

use std::collections::HashSet;

use super::data::{EdgeDisplayData, NodeDisplayData};

/// Color given to dimmed nodes.
pub const DEFAULT_DIM_COLOR: &str = "#f6f6f6";

/// Appearance of dimmed elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightStyle {
	pub dim_color: String,
}

impl Default for HighlightStyle {
	fn default() -> Self {
		Self {
			dim_color: DEFAULT_DIM_COLOR.to_string(),
		}
	}
}

/// Pointer hover.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HoverState {
	#[default]
	Idle,
	/// `neighbors` is the neighbor set of `node` when the hover began.
	Active {
		node: String,
		neighbors: HashSet<String>,
	},
}

impl HoverState {
	pub fn node(&self) -> Option<&str> {
		match self {
			HoverState::Idle => None,
			HoverState::Active { node, .. } => Some(node.as_str()),
		}
	}

	pub fn neighbors(&self) -> Option<&HashSet<String>> {
		match self {
			HoverState::Idle => None,
			HoverState::Active { neighbors, .. } => Some(neighbors),
		}
	}

	/// Whether `node` is the hovered node or one of its neighbors.
	/// Always false while idle.
	pub fn contains(&self, node: &str) -> bool {
		match self {
			HoverState::Idle => false,
			HoverState::Active { node: hovered, neighbors } => {
				hovered == node || neighbors.contains(node)
			}
		}
	}
}

/// Search query and what it resolved to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchState {
	#[default]
	Cleared,
	/// Nodes whose label matches the query. May be empty.
	Suggesting {
		query: String,
		suggestions: HashSet<String>,
	},
	/// The query named exactly one node.
	Selected { query: String, node: String },
}

impl SearchState {
	pub fn query(&self) -> &str {
		match self {
			SearchState::Cleared => "",
			SearchState::Suggesting { query, .. } | SearchState::Selected { query, .. } => {
				query.as_str()
			}
		}
	}

	pub fn selected(&self) -> Option<&str> {
		match self {
			SearchState::Selected { node, .. } => Some(node.as_str()),
			_ => None,
		}
	}

	pub fn suggestions(&self) -> Option<&HashSet<String>> {
		match self {
			SearchState::Suggesting { suggestions, .. } => Some(suggestions),
			_ => None,
		}
	}
}

/// Complete display state. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
	pub hover: HoverState,
	pub search: SearchState,
}

impl DisplayState {
	pub fn hovered_node(&self) -> Option<&str> {
		self.hover.node()
	}

	pub fn hovered_neighbors(&self) -> Option<&HashSet<String>> {
		self.hover.neighbors()
	}

	pub fn search_query(&self) -> &str {
		self.search.query()
	}

	pub fn selected_node(&self) -> Option<&str> {
		self.search.selected()
	}

	pub fn suggestions(&self) -> Option<&HashSet<String>> {
		self.search.suggestions()
	}

	/// Node override. Hover dimming and search dimming are independent
	/// overlays applied in that order.
	pub fn node_display(
		&self,
		node: &str,
		base: &NodeDisplayData,
		style: &HighlightStyle,
	) -> NodeDisplayData {
		let mut res = base.clone();

		if matches!(self.hover, HoverState::Active { .. }) && !self.hover.contains(node) {
			res.label = None;
			res.color = Some(style.dim_color.clone());
		}

		if self.selected_node() == Some(node) {
			res.highlighted = true;
		} else if let Some(suggestions) = self.suggestions() {
			if suggestions.contains(node) {
				res.force_label = true;
			} else {
				res.label = None;
				res.color = Some(style.dim_color.clone());
			}
		}

		res
	}

	/// Edge override. Hidden when a hovered node exists and the edge does not
	/// touch it, or when a suggestion list exists and does not hold both ends.
	pub fn edge_display(
		&self,
		source: &str,
		target: &str,
		base: &EdgeDisplayData,
	) -> EdgeDisplayData {
		let mut res = base.clone();

		if let Some(hovered) = self.hovered_node() {
			if source != hovered && target != hovered {
				res.hidden = true;
			}
		}

		if let Some(suggestions) = self.suggestions() {
			if !suggestions.contains(source) || !suggestions.contains(target) {
				res.hidden = true;
			}
		}

		res
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn set(keys: &[&str]) -> HashSet<String> {
		keys.iter().map(|k| k.to_string()).collect()
	}

	fn base(label: &str) -> NodeDisplayData {
		NodeDisplayData {
			label: Some(label.into()),
			color: Some("#123456".into()),
			..NodeDisplayData::default()
		}
	}

	fn hovering(node: &str, neighbors: &[&str]) -> DisplayState {
		DisplayState {
			hover: HoverState::Active {
				node: node.into(),
				neighbors: set(neighbors),
			},
			search: SearchState::Cleared,
		}
	}

	#[test]
	fn cleared_state_returns_base() {
		let state = DisplayState::default();
		let data = base("A");
		let style = HighlightStyle::default();
		assert_eq!(state.node_display("a", &data, &style), data);
		let edge = EdgeDisplayData::default();
		assert_eq!(state.edge_display("a", "b", &edge), edge);
		assert_eq!(state.search_query(), "");
	}

	#[test]
	fn hover_dims_non_neighbors_only() {
		let state = hovering("x", &["y"]);
		let style = HighlightStyle::default();
		assert_eq!(state.node_display("x", &base("X"), &style), base("X"));
		assert_eq!(state.node_display("y", &base("Y"), &style), base("Y"));
		let dimmed = state.node_display("z", &base("Z"), &style);
		assert_eq!(dimmed.label, None);
		assert_eq!(dimmed.color.as_deref(), Some(DEFAULT_DIM_COLOR));
	}

	#[test]
	fn hover_hides_edges_not_touching_hovered_node() {
		let state = hovering("x", &["y", "z"]);
		let edge = EdgeDisplayData::default();
		assert!(!state.edge_display("x", "y", &edge).hidden);
		assert!(!state.edge_display("z", "x", &edge).hidden);
		assert!(state.edge_display("y", "z", &edge).hidden);
	}

	#[test]
	fn selection_highlights_and_leaves_others_alone() {
		let state = DisplayState {
			hover: HoverState::Idle,
			search: SearchState::Selected {
				query: "A".into(),
				node: "a".into(),
			},
		};
		let style = HighlightStyle::default();
		assert!(state.node_display("a", &base("A"), &style).highlighted);
		assert_eq!(state.node_display("b", &base("B"), &style), base("B"));
	}

	#[test]
	fn suggestions_force_labels_and_dim_the_rest() {
		let state = DisplayState {
			hover: HoverState::Idle,
			search: SearchState::Suggesting {
				query: "w".into(),
				suggestions: set(&["a", "b"]),
			},
		};
		let style = HighlightStyle::default();
		assert!(state.node_display("a", &base("A"), &style).force_label);
		let c = state.node_display("c", &base("C"), &style);
		assert_eq!(c.label, None);
		assert!(!c.force_label);

		let edge = EdgeDisplayData::default();
		assert!(!state.edge_display("a", "b", &edge).hidden);
		assert!(state.edge_display("a", "c", &edge).hidden);
		assert!(state.edge_display("c", "b", &edge).hidden);
	}

	#[test]
	fn hover_and_suggestions_overlay() {
		let mut state = hovering("a", &["b"]);
		state.search = SearchState::Suggesting {
			query: "q".into(),
			suggestions: set(&["b"]),
		};
		let style = HighlightStyle::default();
		// Neighbor of the hovered node but not a suggestion: dimmed by search.
		let a = state.node_display("a", &base("A"), &style);
		assert_eq!(a.label, None);
		// Suggested neighbor keeps its label and gets it forced.
		let b = state.node_display("b", &base("B"), &style);
		assert_eq!(b.label.as_deref(), Some("B"));
		assert!(b.force_label);
		// Touches the hovered node, but `a` is not suggested.
		let edge = EdgeDisplayData::default();
		assert!(state.edge_display("a", "b", &edge).hidden);
	}
}
