//! Parallel-edge ranking and classification over whole graphs.

use std::collections::HashSet;

use parallel_graph::curve::{
	CURVATURE_ATTRIBUTE, CurveConfig, EdgeKind, ParallelIndexOptions, TYPE_ATTRIBUTE,
	classify_edges, index_parallel_edges,
};
use parallel_graph::graph::{Attributes, EdgeId, MultiGraph};
use parallel_graph::{GraphScene, Theme, demo_graph};
use serde_json::Value;

fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> (MultiGraph, Vec<EdgeId>) {
	let mut g = MultiGraph::new();
	for &n in nodes {
		g.add_node(n, Attributes::new()).unwrap();
	}
	let ids = edges
		.iter()
		.map(|&(s, t)| g.add_edge(s, t, Attributes::new()).unwrap())
		.collect();
	(g, ids)
}

fn prepare(g: &mut MultiGraph) {
	let options = ParallelIndexOptions::default();
	index_parallel_edges(g, &options).unwrap();
	classify_edges(g, &options, &CurveConfig::default()).unwrap();
}

fn int(g: &MultiGraph, e: EdgeId, name: &str) -> Option<i64> {
	g.edge_attribute(e, name).and_then(Value::as_i64)
}

fn rank(g: &MultiGraph, e: EdgeId) -> Option<i64> {
	int(g, e, "parallelIndex")
}

fn kind(g: &MultiGraph, e: EdgeId) -> EdgeKind {
	EdgeKind::from_attribute(g.edge_attribute(e, TYPE_ATTRIBUTE))
}

fn of_kind(g: &MultiGraph, ids: &[EdgeId], wanted: EdgeKind) -> Vec<EdgeId> {
	let mut out = ids.to_vec();
	out.retain(|&e| kind(g, e) == wanted);
	out
}

fn curvature(g: &MultiGraph, e: EdgeId) -> Option<f64> {
	g.edge_attribute(e, CURVATURE_ATTRIBUTE)
		.and_then(Value::as_f64)
}

fn attributes_of(g: &MultiGraph, ids: &[EdgeId]) -> Vec<Attributes> {
	ids.iter()
		.filter_map(|&e| g.edge_attributes(e))
		.cloned()
		.collect()
}

#[test]
fn doubled_edge_gets_one_straight_and_one_curve() {
	let (mut g, ids) = graph(&["A", "B"], &[("A", "B"), ("A", "B")]);
	prepare(&mut g);

	let ranks: HashSet<_> = ids.iter().map(|&e| rank(&g, e).unwrap()).collect();
	assert_eq!(ranks.len(), 2);
	for &e in &ids {
		assert_eq!(int(&g, e, "parallelMaxIndex"), Some(1));
		assert_eq!(int(&g, e, "parallelMinIndex"), Some(0));
	}

	let straight = of_kind(&g, &ids, EdgeKind::Straight);
	let curved = of_kind(&g, &ids, EdgeKind::Curved);
	assert_eq!((straight.len(), curved.len()), (1, 1));
	assert_eq!(rank(&g, straight[0]), Some(0));
	assert_eq!(curvature(&g, straight[0]), Some(0.0));
	assert!(curvature(&g, curved[0]).unwrap() != 0.0);
}

#[test]
fn single_edge_stays_straight_without_curvature() {
	let (mut g, ids) = graph(&["C", "D"], &[("C", "D")]);
	prepare(&mut g);
	assert_eq!(kind(&g, ids[0]), EdgeKind::Straight);
	assert_eq!(rank(&g, ids[0]), None);
	assert_eq!(curvature(&g, ids[0]), None);
}

#[test]
fn mixed_directions_never_draw_on_top_of_each_other() {
	let (mut g, ids) = graph(
		&["A", "B"],
		&[("A", "B"), ("B", "A"), ("B", "A"), ("A", "B"), ("B", "A")],
	);
	prepare(&mut g);

	let ranks: Vec<i64> = ids.iter().map(|&e| rank(&g, e).unwrap()).collect();
	let stored: HashSet<_> = ranks.iter().copied().collect();
	assert_eq!(stored, (-2..=2).collect::<HashSet<_>>());

	// An arc from B to A with curvature c bends the opposite way from one
	// from A to B, so compare signed curvatures in A->B terms.
	let drawn: HashSet<i64> = ids
		.iter()
		.map(|&e| {
			let c = curvature(&g, e).unwrap();
			let c = if g.source(e) == Some("A") { c } else { -c };
			(c * 1e6).round() as i64
		})
		.collect();
	assert_eq!(drawn.len(), ids.len());
}

#[test]
fn reindexing_an_unchanged_graph_is_stable() {
	let (mut g, ids) = graph(
		&["A", "B", "C"],
		&[("A", "B"), ("B", "A"), ("A", "B"), ("B", "C")],
	);
	prepare(&mut g);
	let first = attributes_of(&g, &ids);
	prepare(&mut g);
	assert_eq!(attributes_of(&g, &ids), first);
}

#[test]
fn custom_attribute_names_are_honored() {
	let (mut g, ids) = graph(&["A", "B"], &[("A", "B"), ("A", "B"), ("A", "B")]);
	let options = ParallelIndexOptions {
		edge_index_attribute: "rank".into(),
		edge_min_index_attribute: "rankMin".into(),
		edge_max_index_attribute: "rankMax".into(),
	};
	index_parallel_edges(&mut g, &options).unwrap();
	classify_edges(&mut g, &options, &CurveConfig::default()).unwrap();

	assert_eq!(rank(&g, ids[0]), None);
	let ranks: HashSet<_> = ids.iter().map(|&e| int(&g, e, "rank").unwrap()).collect();
	assert_eq!(ranks, HashSet::from([-1, 0, 1]));
	assert_eq!(of_kind(&g, &ids, EdgeKind::Curved).len(), 2);
}

#[test]
fn demo_graph_curves_only_the_doubled_pair() {
	let (data, theme) = (demo_graph(), Theme::default());
	let scene = GraphScene::from_data(&data, 800.0, 600.0, theme).unwrap();
	let g = &scene.graph;
	assert_eq!((g.order(), g.size()), (15, 16));

	let edges: Vec<_> = g.edges().collect();
	let curved = of_kind(g, &edges, EdgeKind::Curved);
	assert_eq!(curved.len(), 1);
	assert_eq!(g.extremities(curved[0]), Some(("b_2", "b_3")));

	let ranked = g.edges().filter(|&e| rank(g, e).is_some()).count();
	assert_eq!(ranked, 2);
}
