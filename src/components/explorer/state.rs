use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::interaction::InteractionState;
use super::reducer::{NodeDisplay, reduce_node};
use super::types::{GraphData, GraphStore};

/// Extra world-space slack around a node's drawn radius for hit testing.
pub const HIT_PADDING: f64 = 4.0;
/// Duration of the camera flight onto a selected node.
pub const CAMERA_ANIMATION_SECS: f64 = 0.5;

/// Radius of the seeding circle for nodes the file gives no position.
const SEED_RADIUS: f64 = 200.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub store_idx: usize,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
struct CameraAnimation {
	from: (f64, f64),
	to: (f64, f64),
	elapsed: f64,
}

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Everything the explorer mutates at runtime: the indexed store, the
/// force simulation holding positions, the view transform, and the
/// interaction state. Free of web types so it tests on the host.
pub struct ExplorerState {
	pub store: GraphStore,
	pub graph: ForceGraph<NodeInfo, ()>,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub interaction: InteractionState,
	pub layout_running: bool,
	pub width: f64,
	pub height: f64,
	camera: Option<CameraAnimation>,
}

impl ExplorerState {
	pub fn new(data: GraphData, width: f64, height: f64) -> Self {
		let store = GraphStore::new(data);
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let node_count = store.node_count().max(1);
		let mut handles = Vec::with_capacity(store.node_count());
		for (i, node) in store.nodes() {
			let (x, y) = node.position.unwrap_or_else(|| {
				let angle = (i as f64) * 2.0 * PI / node_count as f64;
				(SEED_RADIUS * angle.cos(), SEED_RADIUS * angle.sin())
			});
			handles.push(graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo { store_idx: i },
			}));
		}
		for edge in store.edges() {
			graph.add_edge(handles[edge.source], handles[edge.target], EdgeData::default());
		}

		Self {
			store,
			graph,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			interaction: InteractionState::default(),
			// File positions are authoritative; the simulation only runs
			// when the user switches it on.
			layout_running: false,
			width,
			height,
			camera: None,
		}
	}

	/// Current world-space node positions, indexed by store index.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut positions = vec![(0.0, 0.0); self.store.node_count()];
		self.graph.visit_nodes(|node| {
			positions[node.data.user_data.store_idx] = (node.x() as f64, node.y() as f64);
		});
		positions
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Hit test against reduced display sizes, skipping hidden nodes.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let (store, interaction) = (&self.store, &self.interaction);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let idx = node.data.user_data.store_idx;
			let display = reduce_node(store, interaction, idx, NodeDisplay::base(store, idx));
			if display.hidden {
				return;
			}
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < display.size + HIT_PADDING {
				found = Some(idx);
			}
		});
		found
	}

	/// Apply a search query; a unique exact match starts the camera flight.
	pub fn search(&mut self, query: &str) {
		if let Some(idx) = self.interaction.set_search_query(&self.store, query) {
			self.center_on(idx);
		}
	}

	/// Toggle a category label filter; re-derivation may select a node.
	pub fn toggle_label(&mut self, label: &str) {
		if let Some(idx) = self.interaction.toggle_label(&self.store, label) {
			self.center_on(idx);
		}
	}

	pub fn hover(&mut self, node: Option<usize>) {
		if self.interaction.hovered_node == node {
			return;
		}
		self.interaction.set_hovered_node(&self.store, node);
	}

	pub fn toggle_layout(&mut self) {
		self.layout_running = !self.layout_running;
	}

	fn center_on(&mut self, idx: usize) {
		let (x, y) = self.positions()[idx];
		self.camera = Some(CameraAnimation {
			from: (self.transform.x, self.transform.y),
			to: (
				self.width / 2.0 - x * self.transform.k,
				self.height / 2.0 - y * self.transform.k,
			),
			elapsed: 0.0,
		});
	}

	pub fn camera_animating(&self) -> bool {
		self.camera.is_some()
	}

	/// Advance the simulation (when running) and the camera animation.
	pub fn tick(&mut self, dt: f32) {
		if self.layout_running {
			self.graph.update(dt);
		}

		if let Some(camera) = &mut self.camera {
			camera.elapsed += dt as f64;
			let t = (camera.elapsed / CAMERA_ANIMATION_SECS).min(1.0);
			let eased = ease_out_cubic(t);
			self.transform.x = camera.from.0 + (camera.to.0 - camera.from.0) * eased;
			self.transform.y = camera.from.1 + (camera.to.1 - camera.from.1) * eased;
			if t >= 1.0 {
				self.camera = None;
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::explorer::types::{GraphEdge, GraphNode};

	fn data() -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode {
					id: "a".into(),
					label: Some("Alice".into()),
					position: Some((100.0, 40.0)),
					..Default::default()
				},
				GraphNode {
					id: "b".into(),
					label: Some("Bob".into()),
					position: Some((-60.0, 0.0)),
					..Default::default()
				},
			],
			edges: vec![GraphEdge {
				source: "a".into(),
				target: "b".into(),
				color: None,
			}],
		}
	}

	#[test]
	fn positions_are_seeded_from_the_file() {
		let state = ExplorerState::new(data(), 800.0, 600.0);
		let positions = state.positions();
		assert_eq!(positions[0], (100.0, 40.0));
		assert_eq!(positions[1], (-60.0, 0.0));
	}

	#[test]
	fn layout_is_off_by_default_and_holds_positions() {
		let mut state = ExplorerState::new(data(), 800.0, 600.0);
		assert!(!state.layout_running);
		state.tick(0.016);
		assert_eq!(state.positions()[0], (100.0, 40.0));

		state.toggle_layout();
		assert!(state.layout_running);
	}

	#[test]
	fn selecting_a_node_flies_the_camera_onto_it() {
		let mut state = ExplorerState::new(data(), 800.0, 600.0);
		state.search("Alice");
		assert!(state.camera_animating());

		// Well past the 500ms flight.
		for _ in 0..60 {
			state.tick(0.016);
		}
		assert!(!state.camera_animating());
		assert!((state.transform.x - (400.0 - 100.0)).abs() < 1e-6);
		assert!((state.transform.y - (300.0 - 40.0)).abs() < 1e-6);
	}

	#[test]
	fn partial_query_does_not_move_the_camera() {
		let mut state = ExplorerState::new(data(), 800.0, 600.0);
		state.search("o");
		assert!(!state.camera_animating());
		assert!(state.interaction.suggestions.is_some());
	}

	#[test]
	fn hit_test_skips_hidden_nodes() {
		let mut state = ExplorerState::new(data(), 800.0, 600.0);
		// World (100, 40) maps to screen (500, 340) with the initial transform.
		assert_eq!(state.node_at_position(500.0, 340.0), Some(0));

		// Dim Alice out via a label filter she does not carry.
		state.interaction.selected_labels.insert("bot".into());
		assert_eq!(state.node_at_position(500.0, 340.0), None);
	}

	#[test]
	fn hover_is_deduplicated() {
		let mut state = ExplorerState::new(data(), 800.0, 600.0);
		state.hover(Some(0));
		assert_eq!(state.interaction.hovered_node, Some(0));
		state.hover(Some(0));
		assert_eq!(
			state.interaction.hovered_neighbors,
			Some([1].into_iter().collect())
		);
		state.hover(None);
		assert_eq!(state.interaction.hovered_neighbors, None);
	}
}
