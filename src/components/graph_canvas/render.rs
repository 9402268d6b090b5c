//! Canvas drawing for the graph scene.
//!
//! Draws from the surface's cached display data, in three passes for correct
//! z-ordering:
//! 1. Background
//! 2. Edges (straight segments or quadratic arcs) with arrow heads
//! 3. Nodes, then labels on top

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::surface::GraphScene;
use super::theme::Color;
use crate::curve::EdgeKind;
use crate::display::{EdgeDisplayData, NodeDisplayData};

/// Control point of the quadratic arc from `from` to `to`. The arc bulges to
/// the left of the travel direction by `curvature` times the chord length;
/// negative curvature bulges right.
pub fn control_point(from: (f64, f64), to: (f64, f64), curvature: f64) -> (f64, f64) {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let (mx, my) = ((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0);
	(mx - dy * curvature, my + dx * curvature)
}

/// Unit vector from `a` to `b`, or `None` when they coincide.
fn direction(a: (f64, f64), b: (f64, f64)) -> Option<(f64, f64)> {
	let (dx, dy) = (b.0 - a.0, b.1 - a.1);
	let dist = (dx * dx + dy * dy).sqrt();
	(dist > 0.001).then(|| (dx / dist, dy / dist))
}

/// Renders the complete scene to the canvas.
pub fn render(scene: &GraphScene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&scene.theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, scene.width, scene.height);

	for edge in scene.graph.edges() {
		let Some((source, target)) = scene.graph.extremities(edge) else {
			continue;
		};
		let Some(data) = scene.cache.edge(edge) else {
			continue;
		};
		let (Some(s), Some(t)) = (scene.cache.node(source), scene.cache.node(target)) else {
			continue;
		};
		if data.hidden || s.hidden || t.hidden {
			continue;
		}
		draw_edge(scene, ctx, data, s, t);
	}

	for key in scene.graph.nodes() {
		if let Some(data) = scene.cache.node(key) {
			if !data.hidden {
				draw_node(scene, ctx, data);
			}
		}
	}

	for key in scene.graph.nodes() {
		if let Some(data) = scene.cache.node(key) {
			if !data.hidden {
				draw_label(scene, ctx, data);
			}
		}
	}
}

fn draw_edge(
	scene: &GraphScene,
	ctx: &CanvasRenderingContext2d,
	data: &EdgeDisplayData,
	source: &NodeDisplayData,
	target: &NodeDisplayData,
) {
	let from = scene.camera.graph_to_screen(source.x, source.y);
	let to = scene.camera.graph_to_screen(target.x, target.y);
	let theme = &scene.theme.edge;
	let color = data
		.color
		.as_deref()
		.and_then(Color::parse)
		.unwrap_or(theme.color)
		.to_css();
	let width = data.size * theme.size_scale;
	let arrow = width * theme.arrow_ratio;
	let target_radius = scene.node_radius(target);

	ctx.set_stroke_style_str(&color);
	ctx.set_fill_style_str(&color);
	ctx.set_line_width(width);

	// Self-loops have no chord to bend around.
	if direction(from, to).is_none() {
		return;
	}

	// Arrow heads follow the tangent at the target end.
	let tangent_from = match data.kind {
		EdgeKind::Curved if data.curvature != 0.0 => {
			let cp = control_point(from, to, data.curvature);
			ctx.begin_path();
			ctx.move_to(from.0, from.1);
			let Some((ux, uy)) = direction(cp, to) else {
				return;
			};
			let end = (
				to.0 - ux * (target_radius + arrow),
				to.1 - uy * (target_radius + arrow),
			);
			let _ = ctx.quadratic_curve_to(cp.0, cp.1, end.0, end.1);
			ctx.stroke();
			cp
		}
		_ => {
			let Some((ux, uy)) = direction(from, to) else {
				return;
			};
			let end = (
				to.0 - ux * (target_radius + arrow),
				to.1 - uy * (target_radius + arrow),
			);
			ctx.begin_path();
			ctx.move_to(from.0, from.1);
			ctx.line_to(end.0, end.1);
			ctx.stroke();
			from
		}
	};

	let Some((ux, uy)) = direction(tangent_from, to) else {
		return;
	};
	let tip = (to.0 - ux * target_radius, to.1 - uy * target_radius);
	let back = (tip.0 - ux * arrow, tip.1 - uy * arrow);
	let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);

	ctx.begin_path();
	ctx.move_to(tip.0, tip.1);
	ctx.line_to(back.0 + px, back.1 + py);
	ctx.line_to(back.0 - px, back.1 - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_node(scene: &GraphScene, ctx: &CanvasRenderingContext2d, data: &NodeDisplayData) {
	let (x, y) = scene.camera.graph_to_screen(data.x, data.y);
	let radius = scene.node_radius(data);
	let style = &scene.theme.node;
	let color = data
		.color
		.as_deref()
		.and_then(Color::parse)
		.unwrap_or(style.color);

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color.to_css());
	ctx.fill();

	if style.border_width > 0.0 {
		ctx.set_stroke_style_str(&style.border_color.to_css());
		ctx.set_line_width(style.border_width);
		ctx.stroke();
	}

	// Selected search result: dashed ring.
	if data.highlighted {
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius + style.highlight_width * 2.0, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&style.highlight_color.to_css());
		ctx.set_line_width(style.highlight_width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(style.highlight_width * 2.0),
			&JsValue::from_f64(style.highlight_width * 1.5),
		));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}
}

fn draw_label(scene: &GraphScene, ctx: &CanvasRenderingContext2d, data: &NodeDisplayData) {
	let Some(label) = data.label.as_deref().filter(|l| !l.is_empty()) else {
		return;
	};
	let radius = scene.node_radius(data);
	let style = &scene.theme.label;
	if !data.force_label && !data.highlighted && radius < style.min_radius {
		return;
	}
	let (x, y) = scene.camera.graph_to_screen(data.x, data.y);
	ctx.set_fill_style_str(&style.color.to_css());
	ctx.set_font(&style.font);
	let _ = ctx.fill_text(label, x + radius + 4.0, y + 4.0);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn control_point_bulges_perpendicular_to_chord() {
		let cp = control_point((0.0, 0.0), (100.0, 0.0), 0.25);
		assert_eq!(cp, (50.0, 25.0));
		let flipped = control_point((0.0, 0.0), (100.0, 0.0), -0.25);
		assert_eq!(flipped, (50.0, -25.0));
	}

	#[test]
	fn reversed_edge_with_same_curvature_bends_the_other_way() {
		let forward = control_point((0.0, 0.0), (100.0, 0.0), 0.25);
		let backward = control_point((100.0, 0.0), (0.0, 0.0), 0.25);
		assert_eq!(forward.1, -backward.1);
	}

	#[test]
	fn zero_curvature_is_the_midpoint() {
		assert_eq!(control_point((0.0, 10.0), (20.0, 30.0), 0.0), (10.0, 20.0));
		assert!(direction((1.0, 1.0), (1.0, 1.0)).is_none());
	}
}
