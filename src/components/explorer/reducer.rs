//! Per-element display reducers.
//!
//! Pure functions mapping (element, base display, interaction state) to the
//! display attributes actually drawn. The renderer evaluates them once per
//! node/edge per frame; rule order matters and is covered by tests.

use super::interaction::InteractionState;
use super::types::{FALLBACK_COLOR, GraphStore};

/// Color applied to nodes dimmed out of the current focus.
pub const MUTED_COLOR: &str = "#f6f6f6";
/// Color forced onto hidden edges.
pub const HIDDEN_EDGE_COLOR: &str = "#000000";
/// Default node radius when the file carries no size.
pub const DEFAULT_NODE_SIZE: f64 = 5.0;

const MAX_NODE_SIZE: f64 = 10.0;
const SMALL_NODE_SIZE: f64 = 2.0;
const SMALL_NODE_SCALE: f64 = 1.5;
const EDGE_ALPHA: &str = "0.8";

#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplay {
	pub label: String,
	pub color: String,
	pub size: f64,
	pub hidden: bool,
	pub highlighted: bool,
	pub force_label: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDisplay {
	pub color: String,
	pub hidden: bool,
}

impl NodeDisplay {
	/// Base display data straight from the node's attributes.
	pub fn base(store: &GraphStore, idx: usize) -> Self {
		let node = store.node(idx);
		Self {
			label: store.display_label(idx).to_owned(),
			color: node.color.clone().unwrap_or_else(|| FALLBACK_COLOR.to_owned()),
			size: node.size.unwrap_or(DEFAULT_NODE_SIZE),
			hidden: false,
			highlighted: false,
			force_label: false,
		}
	}

	fn dim(&mut self) {
		self.label.clear();
		self.color = MUTED_COLOR.to_owned();
		self.hidden = true;
	}
}

impl EdgeDisplay {
	pub fn base(store: &GraphStore, edge: usize) -> Self {
		Self {
			color: store.edges()[edge]
				.color
				.clone()
				.unwrap_or_else(|| FALLBACK_COLOR.to_owned()),
			hidden: false,
		}
	}

	fn hide(&mut self) {
		self.hidden = true;
		self.color = HIDDEN_EDGE_COLOR.to_owned();
	}
}

/// Rewrite an opaque `rgb(...)` triplet into `rgba(...)` with a fixed
/// alpha. The base format has no alpha channel so this is string surgery,
/// same as the upstream renderer expects.
pub fn rgb_to_rgba(color: &str) -> String {
	color
		.replacen("rgb(", "rgba(", 1)
		.replacen(')', &format!(", {EDGE_ALPHA})"), 1)
}

/// Node reducer. Size normalization always applies; the label filter
/// short-circuits; hover dimming deliberately does not, so the selection
/// branch can still mark a hover-hidden node highlighted.
pub fn reduce_node(
	store: &GraphStore,
	state: &InteractionState,
	node: usize,
	mut display: NodeDisplay,
) -> NodeDisplay {
	display.size = display.size.min(MAX_NODE_SIZE);
	if display.size < SMALL_NODE_SIZE {
		display.size *= SMALL_NODE_SCALE;
	}

	if !state.selected_labels.is_empty()
		&& !state.matches_label_filter(&store.node(node).labels)
	{
		display.dim();
		return display;
	}

	if let Some(neighbors) = &state.hovered_neighbors {
		if state.hovered_node != Some(node) && !neighbors.contains(&node) {
			display.dim();
		}
	}

	if state.selected_node == Some(node) {
		display.highlighted = true;
		display.force_label = true;
	} else if let Some(suggestions) = &state.suggestions {
		if suggestions.contains(&node) {
			display.force_label = true;
		} else {
			display.dim();
		}
	}

	display
}

/// Edge reducer. The alpha rewrite always applies; the hover and
/// suggestion rules are independent and either is enough to hide.
pub fn reduce_edge(
	store: &GraphStore,
	state: &InteractionState,
	edge: usize,
	mut display: EdgeDisplay,
) -> EdgeDisplay {
	display.color = rgb_to_rgba(&display.color);

	let (source, target) = store.endpoints(edge);

	if let Some(hovered) = state.hovered_node {
		let connected = |n: usize| n == hovered || store.are_neighbors(n, hovered);
		if !(connected(source) && connected(target)) {
			display.hide();
		}
	}

	if let Some(suggestions) = &state.suggestions {
		if !suggestions.contains(&source) || !suggestions.contains(&target) {
			display.hide();
		}
	}

	display
}
