use std::collections::{HashMap, HashSet};

use log::warn;

/// Neutral grey used wherever a node or label carries no color of its own.
pub const FALLBACK_COLOR: &str = "rgb(170,170,170)";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub labels: Vec<String>,
	pub color: Option<String>,
	pub size: Option<f64>,
	pub position: Option<(f64, f64)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphEdge {
	pub source: String,
	pub target: String,
	pub color: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

/// An edge with its endpoints resolved to node indices.
#[derive(Clone, Debug)]
pub struct StoreEdge {
	pub source: usize,
	pub target: usize,
	pub color: Option<String>,
}

/// Read-only indexed view over loaded graph data: id lookup, adjacency,
/// and the label/color queries the interaction layer needs.
pub struct GraphStore {
	nodes: Vec<GraphNode>,
	edges: Vec<StoreEdge>,
	adjacency: Vec<HashSet<usize>>,
}

impl GraphStore {
	pub fn new(data: GraphData) -> Self {
		let nodes = data.nodes;
		let ids: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();

		let mut edges = Vec::with_capacity(data.edges.len());
		let mut adjacency = vec![HashSet::new(); nodes.len()];
		for edge in data.edges {
			let (Some(&src), Some(&tgt)) =
				(ids.get(edge.source.as_str()), ids.get(edge.target.as_str()))
			else {
				warn!(
					"Dropping edge with unknown endpoint: {} -> {}",
					edge.source, edge.target
				);
				continue;
			};
			adjacency[src].insert(tgt);
			adjacency[tgt].insert(src);
			edges.push(StoreEdge {
				source: src,
				target: tgt,
				color: edge.color,
			});
		}

		Self {
			nodes,
			edges,
			adjacency,
		}
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn node(&self, idx: usize) -> &GraphNode {
		&self.nodes[idx]
	}

	pub fn nodes(&self) -> impl Iterator<Item = (usize, &GraphNode)> {
		self.nodes.iter().enumerate()
	}

	pub fn edges(&self) -> &[StoreEdge] {
		&self.edges
	}

	pub fn endpoints(&self, edge: usize) -> (usize, usize) {
		(self.edges[edge].source, self.edges[edge].target)
	}

	pub fn neighbors(&self, idx: usize) -> &HashSet<usize> {
		&self.adjacency[idx]
	}

	pub fn are_neighbors(&self, a: usize, b: usize) -> bool {
		self.adjacency[a].contains(&b)
	}

	/// The label a node is shown and searched under, falling back to its id.
	pub fn display_label(&self, idx: usize) -> &str {
		let node = &self.nodes[idx];
		node.label.as_deref().unwrap_or(&node.id)
	}

	/// Distinct category labels across all nodes, in first-seen order.
	pub fn distinct_labels(&self) -> Vec<String> {
		let mut seen = HashSet::new();
		let mut out = Vec::new();
		for node in &self.nodes {
			for label in &node.labels {
				if seen.insert(label.clone()) {
					out.push(label.clone());
				}
			}
		}
		out
	}

	/// Color of the first node carrying the label, used to tint its checkbox.
	pub fn label_color(&self, label: &str) -> String {
		self.nodes
			.iter()
			.find(|n| n.labels.iter().any(|l| l == label))
			.and_then(|n| n.color.clone())
			.unwrap_or_else(|| FALLBACK_COLOR.to_owned())
	}
}
