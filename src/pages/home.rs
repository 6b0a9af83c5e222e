use gloo_net::http::Request;
use leptos::prelude::*;
use log::error;
use thiserror::Error;

use crate::components::explorer::gexf::{self, GexfError};
use crate::components::explorer::{GraphData, GraphExplorer};

/// Fixed relative path the graph file is served from.
const GRAPH_URL: &str = "/graph.gexf";

#[derive(Clone, Debug, Error)]
pub enum LoadError {
	#[error("failed to fetch {GRAPH_URL}: {0}")]
	Fetch(String),
	#[error("failed to parse graph file: {0}")]
	Parse(#[from] GexfError),
}

async fn load_graph() -> Result<GraphData, LoadError> {
	let response = Request::get(GRAPH_URL)
		.send()
		.await
		.map_err(|e| LoadError::Fetch(e.to_string()))?;
	if !response.ok() {
		return Err(LoadError::Fetch(format!("HTTP {}", response.status())));
	}
	let text = response
		.text()
		.await
		.map_err(|e| LoadError::Fetch(e.to_string()))?;
	Ok(gexf::parse(&text)?)
}

/// Default Home Page: fetch the graph, then hand it to the explorer.
#[component]
pub fn Home() -> impl IntoView {
	let graph = LocalResource::new(|| async move {
		load_graph()
			.await
			.inspect_err(|err| error!("Graph load failed: {err}"))
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<Suspense fallback=|| {
				view! { <p class="loading">"Loading graph..."</p> }
			}>
				{move || {
					graph
						.get()
						.map(|result| {
							result
								.map(|data| {
									let data = Signal::derive(move || data.clone());
									view! {
										<div class="fullscreen-graph">
											<GraphExplorer data fullscreen=true />
											<div class="graph-overlay">
												<h1>"Graph Explorer"</h1>
												<p class="subtitle">
													"Hover to focus a neighborhood. Search by label. Filter by category."
												</p>
											</div>
										</div>
									}
								})
						})
				}}
			</Suspense>
		</ErrorBoundary>
	}
}
