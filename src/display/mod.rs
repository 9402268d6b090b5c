//! Interactive display state: hover and search highlighting.
//!
//! [`DisplayReducer`] reacts to hover, query and selection events, and tells
//! the rendering surface which elements need their display data recomputed.
//! The surface asks it for node and edge override closures whenever it
//! recomputes, and applies them to the base data read from the graph.

mod data;
mod reducer;
mod refresh;
mod state;

pub use data::{EdgeDisplayData, NodeDisplayData};
pub use reducer::{DisplayReducer, refresh_set};
pub use refresh::{DisplayEvent, InteractionEvent, PartialGraph, RefreshRequest, RenderSurface};
pub use state::{DEFAULT_DIM_COLOR, DisplayState, HighlightStyle, HoverState, SearchState};
