//! Rendering-surface state: cached display data and pointer interaction.
//!
//! The reducer only says which elements changed. [`DisplayCache`] keeps the
//! last computed display data of every element and, on the next repaint,
//! recomputes just the pending ones through the reducer's overrides.

use std::collections::{HashMap, HashSet};

use log::{info, trace};

use super::camera::{Bounds, Camera};
use super::theme::Theme;
use crate::curve::{CurveConfig, ParallelIndexOptions, classify_edges, index_parallel_edges};
use crate::display::{
	DisplayReducer, EdgeDisplayData, HighlightStyle, InteractionEvent, NodeDisplayData,
	PartialGraph, RefreshRequest, RenderSurface,
};
use crate::error::Result;
use crate::graph::{EdgeId, GraphData, MultiGraph};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum Pending {
	#[default]
	Nothing,
	Everything,
	Some {
		nodes: HashSet<String>,
		edges: HashSet<EdgeId>,
	},
}

/// Display data per element, refreshed lazily.
#[derive(Clone, Debug)]
pub struct DisplayCache {
	nodes: HashMap<String, NodeDisplayData>,
	edges: HashMap<EdgeId, EdgeDisplayData>,
	pending: Pending,
	reindex: bool,
}

impl Default for DisplayCache {
	fn default() -> Self {
		Self {
			nodes: HashMap::new(),
			edges: HashMap::new(),
			pending: Pending::Everything,
			reindex: true,
		}
	}
}

impl RenderSurface for DisplayCache {
	fn refresh(&mut self, request: RefreshRequest) {
		if !request.skip_indexation {
			self.reindex = true;
		}
		let empty = matches!(&request.partial, Some(partial) if partial.is_empty());
		if empty && request.skip_indexation {
			return;
		}
		self.pending = match (std::mem::take(&mut self.pending), request.partial) {
			(Pending::Everything, _) | (_, None) => Pending::Everything,
			(Pending::Nothing, Some(partial)) => Pending::Some {
				nodes: partial.nodes.into_iter().collect(),
				edges: partial.edges.into_iter().collect(),
			},
			(Pending::Some { mut nodes, mut edges }, Some(partial)) => {
				nodes.extend(partial.nodes);
				edges.extend(partial.edges);
				Pending::Some { nodes, edges }
			}
		};
	}
}

impl DisplayCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether a repaint has something to recompute.
	pub fn is_dirty(&self) -> bool {
		self.pending != Pending::Nothing
	}

	/// Whether graph data changed since the last update, so spatial data
	/// derived from it must be rebuilt.
	pub fn needs_reindex(&self) -> bool {
		self.reindex
	}

	pub fn node(&self, key: &str) -> Option<&NodeDisplayData> {
		self.nodes.get(key)
	}

	pub fn edge(&self, edge: EdgeId) -> Option<&EdgeDisplayData> {
		self.edges.get(&edge)
	}

	/// Recompute pending elements from the graph's base attributes and the
	/// reducer's current overrides. Returns how many elements were recomputed.
	pub fn update(&mut self, graph: &MultiGraph, reducer: &DisplayReducer) -> usize {
		let node_reducer = reducer.node_reducer();
		let edge_reducer = reducer.edge_reducer();
		let pending = std::mem::take(&mut self.pending);
		self.reindex = false;

		let mut count = 0;
		let mut compute_node = |cache: &mut HashMap<String, NodeDisplayData>, key: &str| {
			if let Some(attributes) = graph.node_attributes(key) {
				let base = NodeDisplayData::from_attributes(attributes);
				cache.insert(key.to_string(), node_reducer(key, &base));
				count += 1;
			}
		};
		match &pending {
			Pending::Nothing => {}
			Pending::Everything => {
				self.nodes.clear();
				for key in graph.nodes() {
					compute_node(&mut self.nodes, key);
				}
			}
			Pending::Some { nodes, .. } => {
				for key in nodes {
					compute_node(&mut self.nodes, key.as_str());
				}
			}
		}

		let mut compute_edge = |cache: &mut HashMap<EdgeId, EdgeDisplayData>, edge: EdgeId| {
			if let (Some(attributes), Some((source, target))) =
				(graph.edge_attributes(edge), graph.extremities(edge))
			{
				let base = EdgeDisplayData::from_attributes(attributes);
				cache.insert(edge, edge_reducer(source, target, &base));
				count += 1;
			}
		};
		match &pending {
			Pending::Nothing => {}
			Pending::Everything => {
				self.edges.clear();
				for edge in graph.edges() {
					compute_edge(&mut self.edges, edge);
				}
			}
			Pending::Some { edges, .. } => {
				for &edge in edges {
					compute_edge(&mut self.edges, edge);
				}
			}
		}

		trace!("recomputed {count} display entries");
		count
	}
}

/// Graph, display state and surface cache for one canvas.
pub struct GraphScene {
	pub graph: MultiGraph,
	pub reducer: DisplayReducer,
	pub cache: DisplayCache,
	pub camera: Camera,
	pub theme: Theme,
	pub width: f64,
	pub height: f64,
	/// Node currently under the pointer, as last reported to the reducer.
	hovered: Option<String>,
}

impl GraphScene {
	/// Build the graph, rank and classify its parallel edges, and fit the
	/// camera to it.
	pub fn from_data(data: &GraphData, width: f64, height: f64, theme: Theme) -> Result<Self> {
		let mut graph = MultiGraph::from_data(data)?;
		let options = ParallelIndexOptions::default();
		index_parallel_edges(&mut graph, &options)?;
		classify_edges(&mut graph, &options, &CurveConfig::default())?;
		info!(
			"scene ready: {} nodes, {} edges",
			graph.order(),
			graph.size()
		);
		Ok(Self::new(graph, width, height, theme))
	}

	/// Wrap an already indexed and classified graph.
	pub fn new(graph: MultiGraph, width: f64, height: f64, theme: Theme) -> Self {
		let style = HighlightStyle {
			dim_color: theme.node.dim_color.to_css(),
		};
		let mut scene = Self {
			graph,
			reducer: DisplayReducer::new(style),
			cache: DisplayCache::new(),
			camera: Camera::default(),
			theme,
			width,
			height,
			hovered: None,
		};
		scene.fit_camera();
		scene
	}

	fn fit_camera(&mut self) {
		let positions = self.graph.nodes().filter_map(|key| {
			let attributes = self.graph.node_attributes(key)?;
			let data = NodeDisplayData::from_attributes(attributes);
			Some((data.x, data.y))
		});
		if let Some(bounds) = Bounds::of(positions) {
			self.camera = Camera::fit(bounds, self.width, self.height, self.theme.padding);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.fit_camera();
		self.cache.refresh(RefreshRequest::full());
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// CSS cursor for the canvas: a pointer while a node is hovered.
	pub fn cursor(&self) -> &'static str {
		if self.hovered.is_some() {
			"pointer"
		} else {
			"default"
		}
	}

	/// Screen radius of a node.
	pub fn node_radius(&self, data: &NodeDisplayData) -> f64 {
		data.size * self.theme.node.size_scale
	}

	/// Topmost visible node under a canvas position. Later nodes are drawn
	/// above earlier ones, so they win ties.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<&str> {
		let mut found = None;
		for key in self.graph.nodes() {
			let Some(data) = self.cache.node(key) else {
				continue;
			};
			if data.hidden {
				continue;
			}
			let (nx, ny) = self.camera.graph_to_screen(data.x, data.y);
			let (dx, dy) = (nx - sx, ny - sy);
			if (dx * dx + dy * dy).sqrt() <= self.node_radius(data) {
				found = Some(key);
			}
		}
		found
	}

	/// Report the pointer position. Emits leave/enter events to the reducer
	/// when the node under the pointer changes.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) {
		let under = self.node_at_position(sx, sy).map(str::to_owned);
		if under == self.hovered {
			return;
		}
		if let Some(previous) = self.hovered.take() {
			self.emit(InteractionEvent::LeaveNode(previous));
		}
		if let Some(node) = under {
			self.hovered = Some(node.clone());
			self.emit(InteractionEvent::EnterNode(node));
		}
	}

	/// The pointer left the canvas.
	pub fn pointer_leave(&mut self) {
		if let Some(previous) = self.hovered.take() {
			self.emit(InteractionEvent::LeaveNode(previous));
		}
	}

	fn emit(&mut self, event: InteractionEvent) {
		self.reducer.dispatch(&self.graph, event, &mut self.cache);
	}

	/// Forward a search query to the reducer.
	pub fn set_query(&mut self, query: &str) {
		let request = self.reducer.query_change(&self.graph, query);
		self.cache.refresh(request);
	}

	/// Bring cached display data up to date. Returns whether anything changed.
	pub fn prepare_frame(&mut self) -> bool {
		if !self.cache.is_dirty() {
			return false;
		}
		if self.cache.needs_reindex() {
			self.fit_camera();
		}
		self.cache.update(&self.graph, &self.reducer) > 0
	}
}
