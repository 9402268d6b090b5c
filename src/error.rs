//! Error types shared across the crate.

use thiserror::Error;

/// Rejections from the curvature function.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CurvatureError {
	/// A max rank of zero or less means the edge has no parallel siblings,
	/// so no curvature should have been requested for it.
	#[error("invalid max rank {0}: a parallel group needs a max rank above zero")]
	InvalidMaxRank(i64),
	/// The edge carries a rank but no max rank to scale it against.
	#[error("edge has rank {0} but no max rank")]
	MissingMaxRank(i64),
}

/// Failures from graph store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
	#[error("node not found: {0}")]
	NodeNotFound(String),
	#[error("node already exists: {0}")]
	DuplicateNode(String),
	#[error("edge not found: {0}")]
	EdgeNotFound(usize),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Curvature(#[from] CurvatureError),
	#[error(transparent)]
	Graph(#[from] GraphError),
	#[error("invalid graph data: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
