//! Interfaces between the reducer, the interaction source and the rendering
//! surface.

use crate::graph::EdgeId;

/// Elements whose visuals changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialGraph {
	pub nodes: Vec<String>,
	pub edges: Vec<EdgeId>,
}

impl PartialGraph {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

/// Request for the surface to recompute display data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefreshRequest {
	/// Only these elements changed. `None` means everything.
	pub partial: Option<PartialGraph>,
	/// Graph data is untouched, so spatial indexes can be kept.
	pub skip_indexation: bool,
}

impl RefreshRequest {
	/// Recompute every element without reindexing the graph.
	pub fn full() -> Self {
		Self {
			partial: None,
			skip_indexation: true,
		}
	}

	/// Recompute only `partial` without reindexing the graph.
	pub fn partial(partial: PartialGraph) -> Self {
		Self {
			partial: Some(partial),
			skip_indexation: true,
		}
	}
}

/// Something that draws the graph and can be told what to redraw.
pub trait RenderSurface {
	fn refresh(&mut self, request: RefreshRequest);
}

/// Pointer events reported by the interaction source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
	EnterNode(String),
	LeaveNode(String),
}

/// Every event the reducer reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
	HoverEnter(String),
	HoverLeave,
	QueryChange(String),
	SelectionChange(Option<String>),
}

impl From<InteractionEvent> for DisplayEvent {
	fn from(event: InteractionEvent) -> Self {
		match event {
			InteractionEvent::EnterNode(node) => DisplayEvent::HoverEnter(node),
			InteractionEvent::LeaveNode(_) => DisplayEvent::HoverLeave,
		}
	}
}
