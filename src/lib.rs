//! parallel-graph: multigraph visualization with curved parallel edges.
//!
//! This crate provides a WASM-based canvas component that draws a multigraph
//! at fixed node positions. Edges sharing a node pair are ranked and drawn as
//! arcs of increasing curvature so none of them overlap, and hovering or
//! searching highlights part of the graph.
//!
//! - [`graph`]: the in-memory multigraph and its JSON document format
//! - [`curve`]: parallel-edge ranking, curvature and shape classification
//! - [`display`]: hover/search display state and refresh sets
//! - [`components`]: the Leptos canvas component

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde_json::json;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, UrlSearchParams, Window};

pub mod components;
pub mod curve;
pub mod display;
pub mod error;
pub mod graph;

pub use components::graph_canvas::{GraphCanvas, GraphScene, Theme};
pub use error::{Error, Result};
pub use graph::{GraphData, GraphEdge, GraphNode, MultiGraph};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("parallel-graph: logging initialized");
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], edges: [...] }
fn load_graph_data() -> Option<GraphData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("graph-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match GraphData::from_json(&json_text) {
		Ok(data) => {
			info!(
				"parallel-graph: loaded {} nodes, {} edges",
				data.nodes.len(),
				data.edges.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("parallel-graph: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Value of a parameter in the page URL's query string, e.g. `q` in `?q=CT`.
fn page_param(name: &str) -> Option<String> {
	let search = web_sys::window()?.location().search().ok()?;
	UrlSearchParams::new_with_str(&search).ok()?.get(name)
}

const DEMO_IMAGE: &str = "https://icons.getbootstrap.com/assets/icons/person.svg";

/// Built-in demo: 15 nodes on a 5x3 grid joined by 16 edges, two of which
/// run in parallel from `b_2` to `b_3`.
pub fn demo_graph() -> GraphData {
	const NODE_SIZE: f64 = 20.0;
	const EDGE_SIZE: f64 = 3.0;
	let rows = [
		("a", 0.0, ["WCChw", "WS Econ", "L+t_L HE", "WT_im", "L+t+L"]),
		("b", -2.0, ["ACChW", "WCChW", "CSCV C&M", "DiffWP&PC", "CT"]),
		("c", -4.0, ["AH", "CWL", "VSVV C&M", "WFR", "AHU"]),
	];
	let nodes = rows
		.iter()
		.flat_map(|(row, y, labels)| {
			labels.iter().enumerate().map(move |(i, label)| GraphNode {
				key: format!("{row}_{}", i + 1),
				attributes: graph::attributes(json!({
					"label": label,
					"x": i as f64 * 10.0,
					"y": y,
					"size": NODE_SIZE,
					"type": "image",
					"image": DEMO_IMAGE,
				})),
			})
		})
		.collect();

	let edges = [
		("a_1", "a_2"),
		("a_1", "b_2"),
		("a_1", "c_2"),
		("a_2", "a_3"),
		("a_3", "a_4"),
		("a_3", "a_5"),
		("a_3", "b_4"),
		("a_3", "c_4"),
		("b_2", "b_3"),
		("b_2", "b_3"),
		("c_4", "a_5"),
		("c_4", "b_5"),
		("c_4", "c_5"),
		("c_1", "a_2"),
		("c_1", "b_2"),
		("c_1", "c_2"),
	]
	.into_iter()
	.map(|(source, target)| GraphEdge {
		source: source.into(),
		target: target.into(),
		attributes: graph::attributes(json!({ "size": EDGE_SIZE, "color": "green" })),
	})
	.collect();

	GraphData { nodes, edges }
}

/// Main application component.
/// Loads graph data from the DOM, or falls back to [`demo_graph`]. The `q` URL
/// parameter highlights matching nodes and `theme=dark` selects the dark theme.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_else(|| {
		info!("parallel-graph: no graph data in page, using demo graph");
		demo_graph()
	});
	let graph_signal = Signal::derive(move || graph_data.clone());
	let query = Signal::stored(page_param("q").unwrap_or_default());
	let theme = page_param("theme")
		.and_then(|name| Theme::named(&name))
		.unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Parallel Edges" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<GraphCanvas data=graph_signal query=query theme=theme fullscreen=true />
			<div class="graph-overlay">
				<h1>"Parallel Edges"</h1>
				<p class="subtitle">"Hover a node to focus its neighborhood."</p>
			</div>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn demo_graph_matches_grid() {
		let data = demo_graph();
		assert_eq!(data.nodes.len(), 15);
		assert_eq!(data.edges.len(), 16);
		let b3 = data.nodes.iter().find(|n| n.key == "b_3").unwrap();
		assert_eq!(b3.attributes["label"], "CSCV C&M");
		assert_eq!(b3.attributes["x"], 20.0);
		assert_eq!(b3.attributes["y"], -2.0);
		let doubled = data
			.edges
			.iter()
			.filter(|e| e.source == "b_2" && e.target == "b_3")
			.count();
		assert_eq!(doubled, 2);
	}
}
