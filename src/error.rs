//! Error types for dataset loading, configuration and graph commands.

use thiserror::Error;

/// Failures while fetching or decoding the graph dataset.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
	/// The request never produced a response, or its body could not be read.
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("request for {url} failed with status {status}")]
	Status {
		/// Requested dataset URL.
		url: String,
		/// HTTP status code.
		status: u16,
	},
	/// The body was not a valid graph document.
	#[error("invalid dataset: {0}")]
	Parse(String),
}

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	/// The threshold was not a finite number.
	#[error("invalid epsilon threshold '{0}'")]
	InvalidThreshold(String),
}

/// Interaction commands that could not be applied.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
	/// No displayed node carries this name.
	#[error("unknown node '{0}'")]
	UnknownNode(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display() {
		let error = LoadError::Status {
			url: "data/graph.json".to_string(),
			status: 404,
		};
		assert_eq!(
			error.to_string(),
			"request for data/graph.json failed with status 404"
		);

		let error = ConfigError::InvalidThreshold("abc".to_string());
		assert_eq!(error.to_string(), "invalid epsilon threshold 'abc'");

		let error = CommandError::UnknownNode("Z".to_string());
		assert_eq!(error.to_string(), "unknown node 'Z'");
	}
}
