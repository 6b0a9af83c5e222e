//! GEXF parsing into [`GraphData`].
//!
//! Matches on local tag names only, so the default GEXF namespace and the
//! `viz` extension namespace both work without declaration bookkeeping.

use std::collections::HashMap;

use roxmltree::{Document, Node};
use thiserror::Error;

use super::types::{GraphData, GraphEdge, GraphNode};

/// Title of the GEXF attribute holding a node's category labels
/// (declared as `liststring`, values separated by `|`).
const LABELS_ATTRIBUTE: &str = "labels";

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GexfError {
	#[error("invalid XML: {0}")]
	Xml(String),
	#[error("document has no <graph> element")]
	MissingGraph,
	#[error("node without an id attribute")]
	NodeMissingId,
	#[error("edge without source/target attributes")]
	EdgeMissingEndpoint,
}

impl From<roxmltree::Error> for GexfError {
	fn from(err: roxmltree::Error) -> Self {
		Self::Xml(err.to_string())
	}
}

fn is_tag(node: Node, name: &str) -> bool {
	node.is_element() && node.tag_name().name() == name
}

fn find_child<'a>(parent: Node<'a, 'a>, name: &str) -> Option<Node<'a, 'a>> {
	parent.children().find(|n| is_tag(*n, name))
}

/// Map `<attvalue for="...">` keys to declared attribute titles, so
/// attvalues can reference attributes by numeric id or by title.
fn attribute_titles(graph: Node) -> HashMap<String, String> {
	let mut titles = HashMap::new();
	for decls in graph.children().filter(|n| is_tag(*n, "attributes")) {
		for attr in decls.children().filter(|n| is_tag(*n, "attribute")) {
			if let (Some(id), Some(title)) = (attr.attribute("id"), attr.attribute("title")) {
				titles.insert(id.to_owned(), title.to_owned());
			}
		}
	}
	titles
}

fn parse_labels(node: Node, titles: &HashMap<String, String>) -> Vec<String> {
	let Some(attvalues) = find_child(node, "attvalues") else {
		return Vec::new();
	};
	for attvalue in attvalues.children().filter(|n| is_tag(*n, "attvalue")) {
		let Some(key) = attvalue.attribute("for") else {
			continue;
		};
		let title = titles.get(key).map(String::as_str).unwrap_or(key);
		if title != LABELS_ATTRIBUTE {
			continue;
		}
		if let Some(value) = attvalue.attribute("value") {
			return value
				.split('|')
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(str::to_owned)
				.collect();
		}
	}
	Vec::new()
}

fn parse_viz_color(node: Node) -> Option<String> {
	let color = find_child(node, "color")?;
	let (r, g, b) = (
		color.attribute("r")?,
		color.attribute("g")?,
		color.attribute("b")?,
	);
	Some(format!("rgb({r},{g},{b})"))
}

fn parse_viz_size(node: Node) -> Option<f64> {
	find_child(node, "size")?.attribute("value")?.parse().ok()
}

fn parse_viz_position(node: Node) -> Option<(f64, f64)> {
	let position = find_child(node, "position")?;
	let x = position.attribute("x")?.parse().ok()?;
	let y = position.attribute("y")?.parse().ok()?;
	Some((x, y))
}

/// Parse a GEXF document into graph data. Edge endpoints are kept as the
/// file's string ids; resolution happens when the store is built.
pub fn parse(text: &str) -> Result<GraphData, GexfError> {
	let doc = Document::parse(text)?;
	let graph = doc
		.root_element()
		.descendants()
		.find(|n| is_tag(*n, "graph"))
		.ok_or(GexfError::MissingGraph)?;
	let titles = attribute_titles(graph);

	let mut data = GraphData::default();

	if let Some(nodes) = find_child(graph, "nodes") {
		for node in nodes.children().filter(|n| is_tag(*n, "node")) {
			let id = node.attribute("id").ok_or(GexfError::NodeMissingId)?;
			data.nodes.push(GraphNode {
				id: id.to_owned(),
				label: node.attribute("label").map(str::to_owned),
				labels: parse_labels(node, &titles),
				color: parse_viz_color(node),
				size: parse_viz_size(node),
				position: parse_viz_position(node),
			});
		}
	}

	if let Some(edges) = find_child(graph, "edges") {
		for edge in edges.children().filter(|n| is_tag(*n, "edge")) {
			let (Some(source), Some(target)) =
				(edge.attribute("source"), edge.attribute("target"))
			else {
				return Err(GexfError::EdgeMissingEndpoint);
			};
			data.edges.push(GraphEdge {
				source: source.to_owned(),
				target: target.to_owned(),
				color: parse_viz_color(edge),
			});
		}
	}

	Ok(data)
}
