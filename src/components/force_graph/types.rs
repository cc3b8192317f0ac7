use serde::Deserialize;

use crate::error::LoadError;

/// A dataset node, keyed by its unique `name`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique key referenced by link endpoints.
	pub name: String,
	/// Display category, drives the colour scale.
	#[serde(rename = "type", default)]
	pub node_type: String,
	/// Tooltip title.
	#[serde(default)]
	pub desc: Option<String>,
	/// Bin shown in the tooltip, any JSON value.
	#[serde(default)]
	pub cg_value: Option<serde_json::Value>,
	/// Lower bound of the bin interval.
	#[serde(default)]
	pub cg_min: Option<f64>,
	/// Upper bound of the bin interval.
	#[serde(default)]
	pub cg_max: Option<f64>,
	/// Pre-pinned x position.
	#[serde(default)]
	pub fx: Option<f64>,
	/// Pre-pinned y position.
	#[serde(default)]
	pub fy: Option<f64>,
}

impl GraphNode {
	/// Creates a node with only a name and type.
	pub fn new(name: impl Into<String>, node_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			node_type: node_type.into(),
			..Self::default()
		}
	}

	/// The pinned position, if the dataset fixes both coordinates.
	pub fn fixed_position(&self) -> Option<(f64, f64)> {
		self.fx.zip(self.fy)
	}
}

/// A weighted link between two node names.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphLink {
	/// Source node name.
	pub source: String,
	/// Target node name.
	pub target: String,
	/// Link strength.
	#[serde(rename = "epsilon")]
	pub weight: f64,
}

impl GraphLink {
	/// Creates a link between two names.
	pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight,
		}
	}
}

/// One immutable snapshot of nodes and links.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphData {
	/// All nodes in dataset order.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// All links in dataset order.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

impl GraphData {
	/// Decodes a dataset document.
	pub fn from_json(body: &str) -> Result<Self, LoadError> {
		serde_json::from_str(body).map_err(|e| LoadError::Parse(e.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_dataset_fields() {
		let body = r#"{
			"nodes": [
				{"name": "A", "type": "Facilities", "desc": "Schools", "cg_value": 3,
				 "cg_min": 0.5, "cg_max": 1.25, "fx": 10, "fy": 20, "extra": true},
				{"name": "B", "type": "Socio-Demographical"}
			],
			"links": [{"source": "A", "target": "B", "epsilon": 2.5}]
		}"#;

		let graph = GraphData::from_json(body).unwrap();
		assert_eq!(graph.nodes.len(), 2);
		let a = &graph.nodes[0];
		assert_eq!(a.node_type, "Facilities");
		assert_eq!(a.desc.as_deref(), Some("Schools"));
		assert_eq!(a.cg_value, Some(serde_json::json!(3)));
		assert_eq!(a.fixed_position(), Some((10.0, 20.0)));
		assert_eq!(graph.nodes[1].fixed_position(), None);
		assert_eq!(graph.links, vec![GraphLink::new("A", "B", 2.5)]);
	}

	#[test]
	fn missing_sections_are_empty() {
		let graph = GraphData::from_json("{}").unwrap();
		assert!(graph.nodes.is_empty());
		assert!(graph.links.is_empty());
	}

	#[test]
	fn malformed_document_is_parse_error() {
		assert!(matches!(
			GraphData::from_json(r#"{"links": [{"source": "A"}]}"#),
			Err(LoadError::Parse(_))
		));
		assert!(matches!(
			GraphData::from_json("not json"),
			Err(LoadError::Parse(_))
		));
	}

	#[test]
	fn half_pinned_node_is_not_fixed() {
		let node = GraphNode {
			fx: Some(1.0),
			..GraphNode::new("A", "Facilities")
		};
		assert_eq!(node.fixed_position(), None);
	}
}
