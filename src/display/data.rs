//! Per-element display data handed to the rendering surface.

use serde_json::Value;

use crate::curve::{CURVATURE_ATTRIBUTE, EdgeKind, TYPE_ATTRIBUTE};
use crate::graph::Attributes;

/// What the surface draws for a node on the next repaint.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplayData {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub label: Option<String>,
	/// CSS color; `None` lets the theme decide.
	pub color: Option<String>,
	/// Display program name, e.g. `"image"` or `"circle"`.
	pub node_type: Option<String>,
	pub image: Option<String>,
	pub highlighted: bool,
	/// Draw the label even where labels would normally be culled.
	pub force_label: bool,
	pub hidden: bool,
}

impl Default for NodeDisplayData {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			size: 1.0,
			label: None,
			color: None,
			node_type: None,
			image: None,
			highlighted: false,
			force_label: false,
			hidden: false,
		}
	}
}

fn string(attributes: &Attributes, name: &str) -> Option<String> {
	attributes
		.get(name)
		.and_then(Value::as_str)
		.map(str::to_owned)
}

fn number(attributes: &Attributes, name: &str) -> Option<f64> {
	attributes.get(name).and_then(Value::as_f64)
}

impl NodeDisplayData {
	/// Base display data read from stored node attributes.
	pub fn from_attributes(attributes: &Attributes) -> Self {
		let defaults = Self::default();
		Self {
			x: number(attributes, "x").unwrap_or(defaults.x),
			y: number(attributes, "y").unwrap_or(defaults.y),
			size: number(attributes, "size").unwrap_or(defaults.size),
			label: string(attributes, "label"),
			color: string(attributes, "color"),
			node_type: string(attributes, "type"),
			image: string(attributes, "image"),
			highlighted: attributes
				.get("highlighted")
				.and_then(Value::as_bool)
				.unwrap_or(false),
			force_label: attributes
				.get("forceLabel")
				.and_then(Value::as_bool)
				.unwrap_or(false),
			hidden: attributes
				.get("hidden")
				.and_then(Value::as_bool)
				.unwrap_or(false),
		}
	}
}

/// What the surface draws for an edge on the next repaint.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDisplayData {
	pub size: f64,
	pub color: Option<String>,
	pub kind: EdgeKind,
	/// Bend applied when `kind` is curved. Zero otherwise.
	pub curvature: f64,
	pub hidden: bool,
}

impl Default for EdgeDisplayData {
	fn default() -> Self {
		Self {
			size: 1.0,
			color: None,
			kind: EdgeKind::Straight,
			curvature: 0.0,
			hidden: false,
		}
	}
}

impl EdgeDisplayData {
	/// Base display data read from stored edge attributes, after
	/// classification has written `type` and `curvature`.
	pub fn from_attributes(attributes: &Attributes) -> Self {
		let defaults = Self::default();
		Self {
			size: number(attributes, "size").unwrap_or(defaults.size),
			color: string(attributes, "color"),
			kind: EdgeKind::from_attribute(attributes.get(TYPE_ATTRIBUTE)),
			curvature: number(attributes, CURVATURE_ATTRIBUTE).unwrap_or(0.0),
			hidden: attributes
				.get("hidden")
				.and_then(Value::as_bool)
				.unwrap_or(false),
		}
	}
}
