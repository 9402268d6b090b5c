//! Turns parallel ranks into edge shapes and curvatures.

use std::fmt;

use serde_json::Value;

use super::curvature::CurveConfig;
use super::index::ParallelIndexOptions;
use crate::error::{CurvatureError, Result};
use crate::graph::{Attributes, MultiGraph};

/// Edge attribute holding the shape name.
pub const TYPE_ATTRIBUTE: &str = "type";
/// Edge attribute holding the curvature.
pub const CURVATURE_ATTRIBUTE: &str = "curvature";

/// How an edge is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeKind {
	#[default]
	Straight,
	Curved,
}

impl EdgeKind {
	pub fn as_str(self) -> &'static str {
		match self {
			EdgeKind::Straight => "straight",
			EdgeKind::Curved => "curved",
		}
	}

	/// Parse an edge `type` attribute. Unknown names draw straight.
	pub fn from_attribute(value: Option<&Value>) -> Self {
		match value.and_then(Value::as_str) {
			Some("curved") => EdgeKind::Curved,
			_ => EdgeKind::Straight,
		}
	}
}

impl fmt::Display for EdgeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Shape decided for one edge. A straight member of a parallel group still
/// carries its (zero) curvature; an edge that was never indexed carries none.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeShape {
	pub kind: EdgeKind,
	pub curvature: Option<f64>,
}

/// Read an integral rank, accepting `2` and `2.0` alike.
fn rank_value(value: Option<&Value>) -> Option<i64> {
	let value = value?;
	if let Some(rank) = value.as_i64() {
		return Some(rank);
	}
	let float = value.as_f64()?;
	(float.fract() == 0.0).then_some(float as i64)
}

/// Classify one edge from its attributes.
///
/// - min-rank present: member of a resolved parallel bundle, curved unless
///   its rank is zero.
/// - rank present without min-rank: a ranked edge with residual indexing,
///   always curved.
/// - no rank: never indexed, straight with no curvature.
pub fn classify(
	attributes: &Attributes,
	options: &ParallelIndexOptions,
	config: &CurveConfig,
) -> std::result::Result<EdgeShape, CurvatureError> {
	let rank = rank_value(attributes.get(&options.edge_index_attribute));
	let has_min = attributes
		.get(&options.edge_min_index_attribute)
		.is_some_and(Value::is_number);
	let max = rank_value(attributes.get(&options.edge_max_index_attribute));

	let Some(rank) = rank else {
		return Ok(EdgeShape::default());
	};
	let max = max.ok_or(CurvatureError::MissingMaxRank(rank))?;
	let curvature = config.curvature(rank, max)?;

	let kind = if has_min && rank == 0 {
		EdgeKind::Straight
	} else {
		EdgeKind::Curved
	};
	Ok(EdgeShape {
		kind,
		curvature: Some(curvature),
	})
}

/// Classify every edge and write `type` and `curvature` attributes.
///
/// Runs once after [`index_parallel_edges`](super::index_parallel_edges).
/// Edges without a rank lose any stale curvature.
pub fn classify_edges(
	graph: &mut MultiGraph,
	options: &ParallelIndexOptions,
	config: &CurveConfig,
) -> Result<()> {
	let edges: Vec<_> = graph.edges().collect();
	for edge in edges {
		let shape = match graph.edge_attributes(edge) {
			Some(attributes) => classify(attributes, options, config)?,
			None => continue,
		};
		graph.set_edge_attribute(edge, TYPE_ATTRIBUTE, Value::from(shape.kind.as_str()))?;
		match shape.curvature {
			Some(c) => graph.set_edge_attribute(edge, CURVATURE_ATTRIBUTE, Value::from(c))?,
			None => {
				graph.remove_edge_attribute(edge, CURVATURE_ATTRIBUTE)?;
			}
		}
	}
	Ok(())
}
