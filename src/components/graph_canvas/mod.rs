//! Canvas rendering surface for a multigraph with curved parallel edges.
//!
//! Draws nodes at their fixed `x`/`y` positions on an HTML canvas with:
//! - Straight edges for single connections, quadratic arcs for parallel ones
//! - Hover highlighting of a node and its neighborhood
//! - Search highlighting driven by [`GraphScene::set_query`]
//! - Configurable theming
//!
//! # Example
//!
//! ```ignore
//! use parallel_graph::components::graph_canvas::GraphCanvas;
//! use parallel_graph::demo_graph;
//!
//! view! { <GraphCanvas data=demo_graph().into() fullscreen=true /> }
//! ```

mod camera;
mod component;
mod render;
mod surface;
pub mod theme;

pub use camera::{Bounds, Camera};
pub use component::GraphCanvas;
pub use render::control_point;
pub use surface::{DisplayCache, GraphScene};
pub use theme::{Color, Theme};
