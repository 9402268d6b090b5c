//! Event handling for the display state.
//!
//! Every event is handled to completion before the next one: the state is
//! updated, the refresh set is computed, and the request is handed to the
//! surface. Leaving a node computes its refresh set from the state being left,
//! so the neighborhood that was highlighted gets invalidated.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};

use super::data::{EdgeDisplayData, NodeDisplayData};
use super::refresh::{DisplayEvent, PartialGraph, RefreshRequest, RenderSurface};
use super::state::{DisplayState, HighlightStyle, HoverState, SearchState};
use crate::graph::MultiGraph;

/// Nodes outside the hover neighborhood, and every edge touching one of them.
/// While idle that is the whole graph.
pub fn refresh_set(graph: &MultiGraph, hover: &HoverState) -> PartialGraph {
	let nodes: Vec<String> = graph
		.filter_nodes(|n, _| !hover.contains(n))
		.into_iter()
		.map(str::to_owned)
		.collect();
	let index: HashSet<&str> = nodes.iter().map(String::as_str).collect();
	let edges = graph.filter_edges(|_, s, t, _| index.contains(s) || index.contains(t));
	PartialGraph { nodes, edges }
}

/// Owns the display state and turns events into refresh requests.
///
/// Overrides are produced on demand as closures over an immutable snapshot of
/// the state, so a closure obtained before an event keeps describing the
/// state it was created from.
#[derive(Clone, Debug, Default)]
pub struct DisplayReducer {
	state: Arc<DisplayState>,
	style: Arc<HighlightStyle>,
}

impl DisplayReducer {
	pub fn new(style: HighlightStyle) -> Self {
		Self {
			state: Arc::default(),
			style: Arc::new(style),
		}
	}

	pub fn state(&self) -> &DisplayState {
		&self.state
	}

	/// Shared snapshot of the current state.
	pub fn snapshot(&self) -> Arc<DisplayState> {
		Arc::clone(&self.state)
	}

	/// Start hovering `node`. Unknown nodes are ignored.
	pub fn hover_enter(&mut self, graph: &MultiGraph, node: &str) -> Option<RefreshRequest> {
		if !graph.has_node(node) {
			debug!("ignoring hover on unknown node {node}");
			return None;
		}
		let neighbors = graph
			.neighbors(node)
			.into_iter()
			.map(str::to_owned)
			.collect();
		Arc::make_mut(&mut self.state).hover = HoverState::Active {
			node: node.to_string(),
			neighbors,
		};
		trace!("hover enter {node}");
		let partial = refresh_set(graph, &self.state.hover);
		Some(RefreshRequest::partial(partial))
	}

	/// Stop hovering. The refresh set covers the neighborhood just left.
	pub fn hover_leave(&mut self, graph: &MultiGraph) -> RefreshRequest {
		let partial = refresh_set(graph, &self.state.hover);
		if let Some(node) = self.state.hovered_node() {
			trace!("hover leave {node}");
		}
		Arc::make_mut(&mut self.state).hover = HoverState::Idle;
		RefreshRequest::partial(partial)
	}

	/// Update the search query.
	///
	/// An empty query clears the search. Otherwise every node whose label
	/// contains the query, ignoring case, is suggested; a single suggestion
	/// whose label is exactly the query becomes the selection instead.
	pub fn query_change(&mut self, graph: &MultiGraph, query: &str) -> RefreshRequest {
		let search = if query.is_empty() {
			SearchState::Cleared
		} else {
			let needle = query.to_lowercase();
			let matches: Vec<&str> = graph.filter_nodes(|n, _| {
				graph
					.label(n)
					.is_some_and(|label| label.to_lowercase().contains(&needle))
			});
			match matches.as_slice() {
				[only] if graph.label(only) == Some(query) => SearchState::Selected {
					query: query.to_string(),
					node: only.to_string(),
				},
				_ => SearchState::Suggesting {
					query: query.to_string(),
					suggestions: matches.iter().map(|n| n.to_string()).collect(),
				},
			}
		};
		trace!("query {query:?} -> {search:?}");
		Arc::make_mut(&mut self.state).search = search;
		RefreshRequest::full()
	}

	/// Select `node` directly, or clear the search with `None`. The query
	/// follows the selected node's label. Unknown nodes are ignored.
	pub fn selection_change(
		&mut self,
		graph: &MultiGraph,
		node: Option<&str>,
	) -> Option<RefreshRequest> {
		let search = match node {
			None => SearchState::Cleared,
			Some(node) if graph.has_node(node) => SearchState::Selected {
				query: graph.label(node).unwrap_or(node).to_string(),
				node: node.to_string(),
			},
			Some(node) => {
				debug!("ignoring selection of unknown node {node}");
				return None;
			}
		};
		Arc::make_mut(&mut self.state).search = search;
		Some(RefreshRequest::full())
	}

	/// Apply an event and return the refresh it calls for, if any.
	pub fn apply(&mut self, graph: &MultiGraph, event: DisplayEvent) -> Option<RefreshRequest> {
		match event {
			DisplayEvent::HoverEnter(node) => self.hover_enter(graph, &node),
			DisplayEvent::HoverLeave => Some(self.hover_leave(graph)),
			DisplayEvent::QueryChange(query) => Some(self.query_change(graph, &query)),
			DisplayEvent::SelectionChange(node) => self.selection_change(graph, node.as_deref()),
		}
	}

	/// Apply an event and hand the resulting refresh to `surface`.
	pub fn dispatch<S>(
		&mut self,
		graph: &MultiGraph,
		event: impl Into<DisplayEvent>,
		surface: &mut S,
	) where
		S: RenderSurface + ?Sized,
	{
		if let Some(request) = self.apply(graph, event.into()) {
			surface.refresh(request);
		}
	}

	/// Node override over the current state.
	pub fn node_reducer(
		&self,
	) -> impl Fn(&str, &NodeDisplayData) -> NodeDisplayData + Send + Sync + 'static {
		let state = self.snapshot();
		let style = Arc::clone(&self.style);
		move |node: &str, data: &NodeDisplayData| state.node_display(node, data, &style)
	}

	/// Edge override over the current state. Takes the edge's source and
	/// target keys.
	pub fn edge_reducer(
		&self,
	) -> impl Fn(&str, &str, &EdgeDisplayData) -> EdgeDisplayData + Send + Sync + 'static {
		let state = self.snapshot();
		move |source: &str, target: &str, data: &EdgeDisplayData| {
			state.edge_display(source, target, data)
		}
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::display::InteractionEvent;
	use crate::graph::{Attributes, attributes};

	fn labelled(nodes: &[(&str, &str)], edges: &[(&str, &str)]) -> MultiGraph {
		let mut g = MultiGraph::new();
		for (key, label) in nodes {
			g.add_node(*key, attributes(json!({ "label": label })))
				.unwrap();
		}
		for (s, t) in edges {
			g.add_edge(s, t, Attributes::new()).unwrap();
		}
		g
	}

	fn abc(edges: &[(&str, &str)]) -> MultiGraph {
		labelled(&[("a", "A"), ("b", "B"), ("c", "C")], edges)
	}

	#[derive(Default)]
	struct Recorder(Vec<RefreshRequest>);

	impl RenderSurface for Recorder {
		fn refresh(&mut self, request: RefreshRequest) {
			self.0.push(request);
		}
	}

	#[test]
	fn hover_enter_records_neighbors() {
		let g = abc(&[("a", "b"), ("b", "c")]);
		let mut reducer = DisplayReducer::default();
		let request = reducer.hover_enter(&g, "a").unwrap();
		assert_eq!(reducer.state().hovered_node(), Some("a"));
		let neighbors = reducer.state().hovered_neighbors().unwrap();
		assert_eq!(neighbors.len(), 1);
		assert!(neighbors.contains("b"));
		let partial = request.partial.unwrap();
		assert_eq!(partial.nodes, vec!["c".to_string()]);
		assert_eq!(partial.edges.len(), 1);
		assert!(request.skip_indexation);
	}

	#[test]
	fn hover_on_unknown_node_is_ignored() {
		let g = labelled(&[("a", "A")], &[]);
		let mut reducer = DisplayReducer::default();
		assert!(reducer.hover_enter(&g, "zzz").is_none());
		assert_eq!(reducer.state(), &DisplayState::default());
	}

	#[test]
	fn leave_invalidates_the_old_neighborhood() {
		let g = abc(&[("a", "b"), ("b", "c")]);
		let mut reducer = DisplayReducer::default();
		let entered = reducer.hover_enter(&g, "b").unwrap();
		assert!(entered.partial.as_ref().unwrap().nodes.is_empty());
		let left = reducer.hover_leave(&g);
		assert_eq!(left.partial, entered.partial);
		assert_eq!(reducer.state().hover, HoverState::Idle);
	}

	#[test]
	fn query_suggests_case_insensitively() {
		let g = labelled(&[("a", "WCChw"), ("b", "WS Econ"), ("c", "CT")], &[]);
		let mut reducer = DisplayReducer::default();
		let request = reducer.query_change(&g, "w");
		assert_eq!(request, RefreshRequest::full());
		let suggestions = reducer.state().suggestions().unwrap();
		assert!(suggestions.contains("a") && suggestions.contains("b"));
		assert!(!suggestions.contains("c"));
		assert_eq!(reducer.state().search_query(), "w");
	}

	#[test]
	fn exact_single_match_selects() {
		let g = labelled(&[("a", "WCChw"), ("c", "CT")], &[]);
		let mut reducer = DisplayReducer::default();
		reducer.query_change(&g, "CT");
		assert_eq!(reducer.state().selected_node(), Some("c"));
		assert!(reducer.state().suggestions().is_none());

		// Same node, but not an exact label match: still a suggestion.
		reducer.query_change(&g, "ct");
		assert_eq!(reducer.state().selected_node(), None);
		assert_eq!(reducer.state().suggestions().unwrap().len(), 1);
	}

	#[test]
	fn empty_query_and_no_match() {
		let g = labelled(&[("a", "A")], &[]);
		let mut reducer = DisplayReducer::default();
		reducer.query_change(&g, "nothing");
		assert!(reducer.state().suggestions().unwrap().is_empty());
		reducer.query_change(&g, "");
		assert_eq!(reducer.state().search, SearchState::Cleared);
	}

	#[test]
	fn selection_change_sets_query_from_label() {
		let g = labelled(&[("a", "Alpha")], &[]);
		let mut reducer = DisplayReducer::default();
		reducer.selection_change(&g, Some("a")).unwrap();
		assert_eq!(reducer.state().search_query(), "Alpha");
		assert_eq!(reducer.state().selected_node(), Some("a"));
		assert!(reducer.selection_change(&g, Some("nope")).is_none());
		reducer.selection_change(&g, None).unwrap();
		assert_eq!(reducer.state().search, SearchState::Cleared);
	}

	#[test]
	fn overrides_capture_a_snapshot() {
		let g = abc(&[("a", "b")]);
		let mut reducer = DisplayReducer::default();
		reducer.hover_enter(&g, "a");
		let during = reducer.node_reducer();
		reducer.hover_leave(&g);
		let after = reducer.node_reducer();

		let base = NodeDisplayData {
			label: Some("C".into()),
			..NodeDisplayData::default()
		};
		assert_eq!(during("c", &base).label, None);
		assert_eq!(after("c", &base), base);
	}

	#[test]
	fn dispatch_hands_requests_to_the_surface() {
		let g = labelled(&[("a", "A"), ("b", "B")], &[("a", "b")]);
		let mut reducer = DisplayReducer::default();
		let mut surface = Recorder::default();
		let enter = InteractionEvent::EnterNode("a".into());
		reducer.dispatch(&g, enter, &mut surface);
		let unknown = DisplayEvent::HoverEnter("missing".into());
		reducer.dispatch(&g, unknown, &mut surface);
		let leave = InteractionEvent::LeaveNode("a".into());
		reducer.dispatch(&g, leave, &mut surface);
		assert_eq!(surface.0.len(), 2);
		assert_eq!(reducer.state().hovered_node(), None);
	}
}
