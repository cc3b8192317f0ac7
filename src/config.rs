//! Runtime configuration for the graph page.

use crate::error::ConfigError;

/// Dataset fetched when no `data` query parameter is given.
pub const DEFAULT_DATA_URL: &str = "data/epsilons_graph_v2.json";

/// Links must be strictly stronger than this to be displayed.
pub const DEFAULT_EPSILON_FILTER: f64 = 2.0;

/// Where the dataset lives and which links survive filtering.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphConfig {
	/// URL of the JSON dataset.
	pub data_url: String,
	/// Filtering threshold applied to link epsilons.
	pub epsilon_filter: f64,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			data_url: DEFAULT_DATA_URL.to_string(),
			epsilon_filter: DEFAULT_EPSILON_FILTER,
		}
	}
}

impl GraphConfig {
	/// Overrides the threshold from its textual form, e.g. a query parameter.
	pub fn with_epsilon(mut self, raw: &str) -> Result<Self, ConfigError> {
		self.epsilon_filter = parse_threshold(raw)?;
		Ok(self)
	}

	/// Overrides the dataset URL. Blank values keep the current one.
	pub fn with_data_url(mut self, url: &str) -> Self {
		let url = url.trim();
		if !url.is_empty() {
			self.data_url = url.to_string();
		}
		self
	}
}

fn parse_threshold(raw: &str) -> Result<f64, ConfigError> {
	raw.trim()
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite())
		.ok_or_else(|| ConfigError::InvalidThreshold(raw.to_string()))
}
