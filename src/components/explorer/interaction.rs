//! Interaction state and the actions that mutate it.
//!
//! The state record is the only mutable first-party data in the app. The
//! selection/suggestion fields are derived from the query and the label
//! filter; `selected_node` and `suggestions` are never both set, and
//! `hovered_neighbors` is set exactly when `hovered_node` is.

use std::collections::HashSet;

use super::types::GraphStore;

/// Upper bound on autocomplete entries offered for the search input.
pub const AUTOCOMPLETE_LIMIT: usize = 10;

#[derive(Clone, Debug, Default)]
pub struct InteractionState {
	pub hovered_node: Option<usize>,
	pub search_query: String,
	pub selected_labels: HashSet<String>,

	// Derived from the query:
	pub selected_node: Option<usize>,
	pub suggestions: Option<HashSet<usize>>,

	// Derived from the hovered node:
	pub hovered_neighbors: Option<HashSet<usize>>,
}

impl InteractionState {
	/// Whether a node's label set passes the current label filter.
	/// An empty filter passes everything.
	pub fn matches_label_filter(&self, labels: &[String]) -> bool {
		self.selected_labels.is_empty()
			|| labels.iter().any(|l| self.selected_labels.contains(l))
	}

	fn candidates(&self, store: &GraphStore, query: &str) -> Vec<usize> {
		let lc_query = query.to_lowercase();
		store
			.nodes()
			.filter(|(_, node)| self.matches_label_filter(&node.labels))
			.filter(|(idx, _)| store.display_label(*idx).to_lowercase().contains(&lc_query))
			.map(|(idx, _)| idx)
			.collect()
	}

	/// Set the search query and re-derive selection/suggestions.
	///
	/// Returns the newly selected node when the query is a unique exact
	/// label match, so the caller can center the camera on it.
	pub fn set_search_query(&mut self, store: &GraphStore, query: &str) -> Option<usize> {
		self.search_query = query.to_owned();

		if query.is_empty() {
			self.selected_node = None;
			self.suggestions = None;
			return None;
		}

		let candidates = self.candidates(store, query);

		// A single perfect match means the user picked a node through the
		// autocomplete; anything else is an in-progress query.
		if candidates.len() == 1 && store.display_label(candidates[0]) == query {
			self.selected_node = Some(candidates[0]);
			self.suggestions = None;
			self.selected_node
		} else {
			self.selected_node = None;
			self.suggestions = Some(candidates.into_iter().collect());
			None
		}
	}

	pub fn set_hovered_node(&mut self, store: &GraphStore, node: Option<usize>) {
		match node {
			Some(idx) => {
				self.hovered_node = Some(idx);
				self.hovered_neighbors = Some(store.neighbors(idx).clone());
			}
			None => {
				self.hovered_node = None;
				self.hovered_neighbors = None;
			}
		}
	}

	/// Add or remove a category label from the filter, then re-derive the
	/// search state: candidates depend on the filter, so the selection or
	/// suggestion set may change.
	pub fn toggle_label(&mut self, store: &GraphStore, label: &str) -> Option<usize> {
		if !self.selected_labels.remove(label) {
			self.selected_labels.insert(label.to_owned());
		}
		let query = self.search_query.clone();
		self.set_search_query(store, &query)
	}

	/// Data source for the search autocomplete: display labels of nodes
	/// passing the label filter, capped at [`AUTOCOMPLETE_LIMIT`].
	pub fn autocomplete_source(&self, store: &GraphStore) -> Vec<String> {
		store
			.nodes()
			.filter(|(_, node)| self.matches_label_filter(&node.labels))
			.map(|(idx, _)| store.display_label(idx).to_owned())
			.take(AUTOCOMPLETE_LIMIT)
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::explorer::types::{GraphData, GraphEdge, GraphNode};

	fn node(id: &str, label: &str, labels: &[&str]) -> GraphNode {
		GraphNode {
			id: id.into(),
			label: Some(label.into()),
			labels: labels.iter().map(|s| s.to_string()).collect(),
			..Default::default()
		}
	}

	fn edge(source: &str, target: &str) -> GraphEdge {
		GraphEdge {
			source: source.into(),
			target: target.into(),
			color: None,
		}
	}

	/// Alice(0) - Bob(1) - Carol(2); Alice and Carol are not neighbors.
	fn store() -> GraphStore {
		GraphStore::new(GraphData {
			nodes: vec![
				node("a", "Alice", &["person"]),
				node("b", "Bob", &["person", "admin"]),
				node("c", "Carol", &["bot"]),
			],
			edges: vec![edge("a", "b"), edge("b", "c")],
		})
	}

	#[test]
	fn unique_exact_match_selects_the_node() {
		let store = store();
		let mut state = InteractionState::default();
		let centered = state.set_search_query(&store, "Alice");
		assert_eq!(centered, Some(0));
		assert_eq!(state.selected_node, Some(0));
		assert_eq!(state.suggestions, None);
	}

	#[test]
	fn exact_match_is_case_sensitive() {
		let store = store();
		let mut state = InteractionState::default();
		assert_eq!(state.set_search_query(&store, "alice"), None);
		assert_eq!(state.selected_node, None);
		assert_eq!(state.suggestions, Some([0].into_iter().collect()));
	}

	#[test]
	fn partial_match_yields_suggestions() {
		let store = store();
		let mut state = InteractionState::default();
		// "Alice" and "Carol" contain an "a"; "Bob" does not.
		state.set_search_query(&store, "a");
		assert_eq!(state.selected_node, None);
		assert_eq!(state.suggestions, Some([0, 2].into_iter().collect()));
	}

	#[test]
	fn empty_query_clears_derived_state() {
		let store = store();
		let mut state = InteractionState::default();
		state.set_search_query(&store, "Alice");
		state.set_search_query(&store, "");
		assert_eq!(state.selected_node, None);
		assert_eq!(state.suggestions, None);
		assert_eq!(state.search_query, "");
	}

	#[test]
	fn hover_tracks_the_neighbor_set() {
		let store = store();
		let mut state = InteractionState::default();
		state.set_hovered_node(&store, Some(1));
		assert_eq!(state.hovered_node, Some(1));
		assert_eq!(state.hovered_neighbors, Some([0, 2].into_iter().collect()));

		state.set_hovered_node(&store, None);
		assert_eq!(state.hovered_node, None);
		assert_eq!(state.hovered_neighbors, None);
	}

	#[test]
	fn label_filter_restricts_suggestions() {
		let store = store();
		let mut state = InteractionState::default();
		state.toggle_label(&store, "person");
		state.set_search_query(&store, "o");
		// "Bob" and "Carol" contain "o" but Carol is filtered out.
		assert_eq!(state.suggestions, Some([1].into_iter().collect()));
		for &idx in state.suggestions.as_ref().unwrap() {
			assert!(state.matches_label_filter(&store.node(idx).labels));
		}
	}

	#[test]
	fn toggling_a_label_rederives_the_selection() {
		let store = GraphStore::new(GraphData {
			nodes: vec![node("a", "Ann", &["person"]), node("b", "Ann", &["bot"])],
			edges: vec![],
		});
		let mut state = InteractionState::default();

		// Two exact matches: no selection, both suggested.
		state.set_search_query(&store, "Ann");
		assert_eq!(state.selected_node, None);
		assert_eq!(state.suggestions, Some([0, 1].into_iter().collect()));

		// Filtering down to one candidate promotes it to a selection.
		let centered = state.toggle_label(&store, "bot");
		assert_eq!(centered, Some(1));
		assert_eq!(state.selected_node, Some(1));
		assert_eq!(state.suggestions, None);

		// And removing the filter demotes it again.
		state.toggle_label(&store, "bot");
		assert_eq!(state.selected_node, None);
	}

	#[test]
	fn autocomplete_respects_filter_and_cap() {
		let nodes: Vec<GraphNode> = (0..20)
			.map(|i| node(&format!("n{i}"), &format!("Node {i}"), &["even", "odd"][i % 2..=i % 2]))
			.collect();
		let store = GraphStore::new(GraphData { nodes, edges: vec![] });

		let mut state = InteractionState::default();
		assert_eq!(state.autocomplete_source(&store).len(), AUTOCOMPLETE_LIMIT);

		state.toggle_label(&store, "even");
		let source = state.autocomplete_source(&store);
		assert_eq!(source.len(), AUTOCOMPLETE_LIMIT);
		assert!(source.contains(&"Node 0".to_owned()));
		assert!(!source.contains(&"Node 1".to_owned()));
	}
}
