use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::{info, warn};

use crate::components::force_graph::{FilteredGraph, ForceGraphCanvas, GraphData};
use crate::config::GraphConfig;
use crate::dataset::load_dataset;

/// Reads `?epsilon=` and `?data=` on top of the defaults.
fn config_from_query(epsilon: Option<String>, data: Option<String>) -> GraphConfig {
	let mut config = GraphConfig::default();
	if let Some(url) = data {
		config = config.with_data_url(&url);
	}
	if let Some(raw) = epsilon {
		config = match config.clone().with_epsilon(&raw) {
			Ok(c) => c,
			Err(e) => {
				warn!("{e}, keeping epsilon > {}", config.epsilon_filter);
				config
			}
		};
	}
	config
}

/// One filtering pass per dataset or threshold change, shared by every reader.
fn filtered_pass(graph: Signal<Option<GraphData>>, threshold: Signal<f64>) -> Memo<FilteredGraph> {
	Memo::new(move |_| {
		let threshold = threshold.get();
		graph.with(|graph| match graph {
			Some(graph) => {
				let pass = graph.filter(threshold);
				info!(
					"epsilon > {threshold}: kept {}/{} nodes, {}/{} links",
					pass.nodes.len(),
					graph.nodes.len(),
					pass.links.len(),
					graph.links.len()
				);
				pass
			}
			None => FilteredGraph {
				threshold,
				..FilteredGraph::default()
			},
		})
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = Memo::new(move |_| {
		query.with(|q| config_from_query(q.get("epsilon"), q.get("data")))
	});
	let data_url = Memo::new(move |_| config.with(|c| c.data_url.clone()));
	let dataset = LocalResource::new(move || {
		let url = data_url.get();
		async move { load_dataset(&url).await }
	});

	let filtered = filtered_pass(
		Signal::derive(move || dataset.get().and_then(Result::ok)),
		Signal::derive(move || config.with(|c| c.epsilon_filter)),
	);

	view! {
		<div class="fullscreen-graph">
			{move || match dataset.get() {
				None => view! { <p class="status">"Loading dataset…"</p> }.into_any(),
				Some(Err(e)) => {
					view! {
						<div class="status error">
							<h1>"Could not load the graph"</h1>
							<p>{e.to_string()}</p>
						</div>
					}
						.into_any()
				}
				Some(Ok(_)) => view! { <ForceGraphCanvas data=filtered fullscreen=true /> }.into_any(),
			}}
			<div class="graph-overlay">
				<h1>"Epsilon Graph"</h1>
				<p class="subtitle">
					{move || {
						format!(
							"Links with epsilon > {}. Drag to pin, click to release, right-click to highlight links.",
							config.with(|c| c.epsilon_filter),
						)
					}}
				</p>
			</div>
		</div>
	}
}
