//! Parallel-edge indexing.
//!
//! Edges joining the same unordered pair of nodes form a parallel group. Each
//! edge of a group with more than one member gets a rank from the contiguous
//! range `lo..=hi`, where `lo = -floor((n - 1) / 2)` and `hi = lo + n - 1`.
//!
//! A curve bends relative to its own direction, so an edge running against
//! the group's first edge with rank `r` is drawn where a forward edge with rank
//! `-r` would be. Ranks are handed out so that both the stored ranks and the
//! drawn positions stay distinct: a symmetric pair `s, -s` always goes to two
//! edges running the same way.

use std::collections::HashMap;

use log::debug;
use serde_json::Value;

use crate::error::GraphError;
use crate::graph::{EdgeId, MultiGraph};

/// Attribute names the indexer writes ranks under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelIndexOptions {
	pub edge_index_attribute: String,
	pub edge_min_index_attribute: String,
	pub edge_max_index_attribute: String,
}

impl Default for ParallelIndexOptions {
	fn default() -> Self {
		Self {
			edge_index_attribute: "parallelIndex".into(),
			edge_min_index_attribute: "parallelMinIndex".into(),
			edge_max_index_attribute: "parallelMaxIndex".into(),
		}
	}
}

impl ParallelIndexOptions {
	/// Rank, min-rank and max-rank names, in that order.
	fn names(&self) -> [&str; 3] {
		[
			self.edge_index_attribute.as_str(),
			self.edge_min_index_attribute.as_str(),
			self.edge_max_index_attribute.as_str(),
		]
	}
}

/// Edges sharing one unordered pair of endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct ParallelGroup {
	/// Endpoints in the direction of the group's first edge.
	pub source: String,
	pub target: String,
	/// Members in insertion order, each with its rank. Ranks are `None` for
	/// singleton groups.
	pub members: Vec<(EdgeId, Option<i64>)>,
}

impl ParallelGroup {
	/// Whether the group holds more than one edge.
	pub fn is_parallel(&self) -> bool {
		self.members.len() > 1
	}

	/// `(min, max)` rank of the group, for parallel groups only.
	pub fn rank_bounds(&self) -> Option<(i64, i64)> {
		self.is_parallel().then(|| rank_bounds(self.members.len()))
	}
}

fn rank_bounds(n: usize) -> (i64, i64) {
	let n = n as i64;
	let lo = -((n - 1) / 2);
	(lo, lo + n - 1)
}

/// Ranks for a group whose members run along (`true`) or against (`false`)
/// the group's first edge. Output is aligned with `forward`.
pub(crate) fn assign_ranks(forward: &[bool]) -> Vec<i64> {
	let n = forward.len();
	if n < 2 {
		return vec![0; n];
	}
	let (lo, hi) = rank_bounds(n);
	let pairs = -lo;
	// Slots without a mirror inside the range: zero, plus `hi` when n is even.
	let mut free = vec![0];
	if hi > pairs {
		free.push(hi);
	}

	let forward_count = forward.iter().filter(|&&f| f).count() as i64;
	let reverse_count = n as i64 - forward_count;
	let reverse_pairs = (reverse_count / 2).min(pairs);
	let forward_pairs = pairs - reverse_pairs;
	let forward_free = (forward_count - 2 * forward_pairs) as usize;

	let mut forward_slots: Vec<i64> = free[..forward_free].to_vec();
	let mut reverse_slots: Vec<i64> = free[forward_free..].to_vec();
	for s in 1..=pairs {
		let slots = if s <= forward_pairs {
			&mut forward_slots
		} else {
			&mut reverse_slots
		};
		slots.push(s);
		slots.push(-s);
	}

	let (mut fwd, mut rev) = (forward_slots.into_iter(), reverse_slots.into_iter());
	forward
		.iter()
		.map(|&f| {
			let slot = if f { fwd.next() } else { rev.next() };
			slot.unwrap_or_default()
		})
		.collect()
}

/// Group the graph's edges by unordered endpoint pair and rank them.
///
/// Groups come out in order of their first edge. The result only depends on
/// edge insertion order, so repeated calls on an unchanged graph agree.
pub fn parallel_groups(graph: &MultiGraph) -> Vec<ParallelGroup> {
	let mut slots: HashMap<(&str, &str), usize> = HashMap::new();
	let mut grouped: Vec<(&str, &str, Vec<(EdgeId, bool)>)> = Vec::new();

	for edge in graph.edges() {
		let Some((source, target)) = graph.extremities(edge) else {
			continue;
		};
		let key = if source <= target {
			(source, target)
		} else {
			(target, source)
		};
		let slot = *slots.entry(key).or_insert_with(|| {
			grouped.push((source, target, Vec::new()));
			grouped.len() - 1
		});
		let (first_source, _, members) = &mut grouped[slot];
		members.push((edge, source == *first_source));
	}

	grouped
		.into_iter()
		.map(|(source, target, members)| {
			let ranks: Vec<Option<i64>> = if members.len() > 1 {
				let forward: Vec<bool> = members.iter().map(|&(_, f)| f).collect();
				assign_ranks(&forward).into_iter().map(Some).collect()
			} else {
				vec![None; members.len()]
			};
			ParallelGroup {
				source: source.to_string(),
				target: target.to_string(),
				members: members
					.into_iter()
					.zip(ranks)
					.map(|((edge, _), rank)| (edge, rank))
					.collect(),
			}
		})
		.collect()
}

/// Write parallel ranks onto every edge of the graph.
///
/// Members of parallel groups get the rank, min-rank and max-rank attributes
/// named in `options`. Edges without parallel siblings have all three removed,
/// which is how later stages tell that no curvature is needed.
pub fn index_parallel_edges(
	graph: &mut MultiGraph,
	options: &ParallelIndexOptions,
) -> Result<(), GraphError> {
	let groups = parallel_groups(graph);
	let mut parallel = 0;

	for group in &groups {
		match group.rank_bounds() {
			Some((min, max)) => {
				parallel += 1;
				for &(edge, rank) in &group.members {
					let values = [rank.unwrap_or_default(), min, max];
					for (name, value) in options.names().into_iter().zip(values) {
						graph.set_edge_attribute(edge, name, Value::from(value))?;
					}
				}
			}
			None => {
				for &(edge, _) in &group.members {
					for name in options.names() {
						graph.remove_edge_attribute(edge, name)?;
					}
				}
			}
		}
	}

	debug!(
		"indexed {} edges into {} groups ({} parallel)",
		graph.size(),
		groups.len(),
		parallel
	);
	Ok(())
}
