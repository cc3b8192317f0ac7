//! Fetching the graph dataset over HTTP.

use gloo_net::http::Request;
use log::{error, info};

use crate::components::force_graph::GraphData;
use crate::error::LoadError;

/// Fetches and decodes the dataset at `url`. One attempt, no retry.
pub async fn load_dataset(url: &str) -> Result<GraphData, LoadError> {
	let result = fetch(url).await;
	match &result {
		Ok(graph) => info!(
			"loaded {url}: {} nodes, {} links",
			graph.nodes.len(),
			graph.links.len()
		),
		Err(e) => error!("failed to load {url}: {e}"),
	}
	result
}

async fn fetch(url: &str) -> Result<GraphData, LoadError> {
	let response = Request::get(url)
		.send()
		.await
		.map_err(|e| LoadError::Network(e.to_string()))?;
	if !response.ok() {
		return Err(LoadError::Status {
			url: url.to_string(),
			status: response.status(),
		});
	}
	let body = response
		.text()
		.await
		.map_err(|e| LoadError::Network(e.to_string()))?;
	GraphData::from_json(&body)
}
