//! Leptos component wrapping the graph canvas.
//!
//! The component creates an HTML canvas element, builds the scene from the
//! `data` signal and wires pointer events to hover transitions and the
//! optional `query` signal to search highlighting. A
//! `requestAnimationFrame` loop repaints only when the display cache has
//! pending work.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::surface::GraphScene;
use super::theme::Theme;
use crate::graph::GraphData;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Renders a multigraph with curved parallel edges and hover highlighting.
///
/// Pass graph data via the reactive `data` signal. The component sizes itself
/// to its parent container by default; set `fullscreen = true` to fill the
/// viewport and resize with the window. Explicit `width`/`height` override
/// automatic sizing. When `query` is given, nodes whose label contains it are
/// highlighted and the rest are greyed out.
#[component]
pub fn GraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional)] theme: Option<Theme>,
	#[prop(optional, into)] query: Option<Signal<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene: Rc<RefCell<Option<GraphScene>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (scene_init, animate_init, resize_cb_init) =
		(scene.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => return,
			},
			_ => {
				warn!("graph canvas: 2d context unavailable");
				return;
			}
		};

		let theme = theme.clone().unwrap_or_default();
		match GraphScene::from_data(&data.get(), w, h, theme) {
			Ok(mut s) => {
				if let Some(query) = query {
					s.set_query(query.get_untracked().trim());
				}
				*scene_init.borrow_mut() = Some(s);
			}
			Err(e) => {
				warn!("graph canvas: cannot build scene: {}", e);
				return;
			}
		}

		if fullscreen {
			let (scene_resize, canvas_resize) = (scene_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(ref mut s) = *scene_resize.borrow_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let listener = cb.as_ref().unchecked_ref();
				let _ = window.add_event_listener_with_callback("resize", listener);
			}
		}

		let (scene_anim, animate_inner) = (scene_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *scene_anim.borrow_mut() {
				if s.cache.is_dirty() {
					s.prepare_frame();
					render::render(s, &ctx);
				}
			}
			let next = animate_inner.borrow();
			if let (Some(window), Some(cb)) = (web_sys::window(), next.as_ref()) {
				let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	if let Some(query) = query {
		let scene_query = scene.clone();
		Effect::new(move |_| {
			let text = query.get();
			if let Some(ref mut s) = *scene_query.borrow_mut() {
				s.set_query(text.trim());
			}
		});
	}

	let scene_mm = scene.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *scene_mm.borrow_mut() {
			s.pointer_move(x, y);
			let style = web_sys::HtmlElement::style(&canvas);
			let _ = style.set_property("cursor", s.cursor());
		}
	};

	let scene_ml = scene.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *scene_ml.borrow_mut() {
			s.pointer_leave();
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}
