//! Threshold filtering of a raw graph.
//!
//! A pass keeps the links whose weight is strictly above the threshold and the nodes that
//! touch at least one of them. Each kept node also gets a surviving-degree count that feeds
//! node sizing. The count is zero-based: the first surviving link stores `0`.

use std::collections::HashMap;

use super::types::{GraphData, GraphLink, GraphNode};

/// Node name to zero-based count of surviving incident links.
pub type LinkedNodeCounts = HashMap<String, u32>;

/// Counts surviving incident links per endpoint name.
///
/// A name absent from the result has no surviving link. Names are recorded without checking
/// that a node of that name exists.
pub fn surviving_degrees(graph: &GraphData, threshold: f64) -> LinkedNodeCounts {
	let mut counts = LinkedNodeCounts::new();
	for link in graph.links.iter().filter(|l| l.weight > threshold) {
		for name in [&link.source, &link.target] {
			counts
				.entry(name.clone())
				.and_modify(|c| *c += 1)
				.or_insert(0);
		}
	}
	counts
}

/// Links strictly stronger than `threshold`, in dataset order.
pub fn filter_links(graph: &GraphData, threshold: f64) -> Vec<GraphLink> {
	graph
		.links
		.iter()
		.filter(|l| l.weight > threshold)
		.cloned()
		.collect()
}

/// Nodes with an entry in `degrees`, in dataset order.
pub fn filter_nodes(graph: &GraphData, degrees: &LinkedNodeCounts) -> Vec<GraphNode> {
	graph
		.nodes
		.iter()
		.filter(|n| degrees.contains_key(&n.name))
		.cloned()
		.collect()
}

/// Result of one filtering pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredGraph {
	/// Surviving nodes.
	pub nodes: Vec<GraphNode>,
	/// Surviving links.
	pub links: Vec<GraphLink>,
	/// Zero-based surviving degree per endpoint name.
	pub degrees: LinkedNodeCounts,
	/// Threshold the pass ran with.
	pub threshold: f64,
}

impl FilteredGraph {
	/// Zero-based surviving degree of a node, if it survived.
	pub fn degree(&self, name: &str) -> Option<u32> {
		self.degrees.get(name).copied()
	}
}

impl GraphData {
	/// Runs a full filtering pass: degrees, then links, then nodes.
	pub fn filter(&self, threshold: f64) -> FilteredGraph {
		let degrees = surviving_degrees(self, threshold);
		let links = filter_links(self, threshold);
		let nodes = filter_nodes(self, &degrees);
		FilteredGraph {
			nodes,
			links,
			degrees,
			threshold,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn abc(links: Vec<GraphLink>) -> GraphData {
		GraphData {
			nodes: vec![
				GraphNode::new("A", "Facilities"),
				GraphNode::new("B", "Facilities"),
				GraphNode::new("C", "Socio-Demographical"),
			],
			links,
		}
	}

	fn names(nodes: &[GraphNode]) -> Vec<&str> {
		nodes.iter().map(|n| n.name.as_str()).collect()
	}

	#[test]
	fn threshold_two_drops_weak_link_and_orphan() {
		let graph = abc(vec![GraphLink::new("A", "B", 3.0), GraphLink::new("B", "C", 1.0)]);
		let pass = graph.filter(2.0);

		assert_eq!(pass.links, vec![GraphLink::new("A", "B", 3.0)]);
		assert_eq!(
			pass.degrees,
			LinkedNodeCounts::from([("A".into(), 0), ("B".into(), 0)])
		);
		assert_eq!(names(&pass.nodes), ["A", "B"]);
		assert_eq!(pass.degree("C"), None);
	}

	#[test]
	fn threshold_zero_keeps_everything() {
		let graph = abc(vec![GraphLink::new("A", "B", 3.0), GraphLink::new("B", "C", 1.0)]);
		let pass = graph.filter(0.0);

		assert_eq!(pass.links.len(), 2);
		assert_eq!(
			pass.degrees,
			LinkedNodeCounts::from([("A".into(), 0), ("B".into(), 1), ("C".into(), 0)])
		);
		assert_eq!(names(&pass.nodes), ["A", "B", "C"]);
	}

	#[test]
	fn threshold_is_strict() {
		let graph = abc(vec![GraphLink::new("A", "B", 2.0)]);
		let pass = graph.filter(2.0);
		assert!(pass.links.is_empty());
		assert!(pass.degrees.is_empty());
		assert!(pass.nodes.is_empty());
	}

	#[test]
	fn degree_is_surviving_links_minus_one() {
		let links = (0..5)
			.map(|i| GraphLink::new("hub", format!("leaf{i}"), 10.0))
			.chain([GraphLink::new("hub", "leaf0", 0.5)])
			.collect();
		let graph = GraphData {
			nodes: vec![],
			links,
		};
		let degrees = surviving_degrees(&graph, 1.0);
		assert_eq!(degrees["hub"], 4);
		assert_eq!(degrees["leaf0"], 0);
		assert_eq!(degrees.len(), 6);
	}

	#[test]
	fn self_loop_counts_both_endpoints() {
		let graph = abc(vec![GraphLink::new("A", "A", 5.0)]);
		assert_eq!(surviving_degrees(&graph, 0.0)["A"], 1);
	}

	#[test]
	fn dangling_endpoint_is_recorded_but_never_displayed() {
		let graph = abc(vec![GraphLink::new("A", "ghost", 5.0)]);
		let pass = graph.filter(2.0);
		assert_eq!(pass.degree("ghost"), Some(0));
		assert_eq!(names(&pass.nodes), ["A"]);
		assert_eq!(pass.links.len(), 1);
	}

	#[test]
	fn node_order_follows_dataset_not_links() {
		let graph = abc(vec![GraphLink::new("C", "A", 5.0)]);
		assert_eq!(names(&graph.filter(2.0).nodes), ["A", "C"]);
	}

	#[test]
	fn link_order_is_preserved() {
		let graph = abc(vec![
			GraphLink::new("B", "C", 4.0),
			GraphLink::new("A", "B", 1.0),
			GraphLink::new("A", "C", 3.0),
		]);
		assert_eq!(
			filter_links(&graph, 2.0),
			vec![GraphLink::new("B", "C", 4.0), GraphLink::new("A", "C", 3.0)]
		);
	}

	#[test]
	fn empty_graph_yields_empty_pass() {
		let pass = GraphData::default().filter(2.0);
		assert_eq!(pass, FilteredGraph {
			threshold: 2.0,
			..FilteredGraph::default()
		});
	}

	#[test]
	fn repeated_passes_are_equal() {
		let graph = abc(vec![GraphLink::new("A", "B", 3.0), GraphLink::new("B", "C", 2.5)]);
		assert_eq!(graph.filter(2.0), graph.filter(2.0));
	}

	#[test]
	fn surviving_nodes_are_exactly_the_endpoints() {
		let graph = GraphData {
			nodes: (0..8).map(|i| GraphNode::new(format!("n{i}"), "t")).collect(),
			links: (0..8)
				.map(|i| GraphLink::new(format!("n{i}"), format!("n{}", (i * 3) % 8), i as f64))
				.collect(),
		};
		for threshold in [-1.0, 0.0, 2.5, 4.0, 7.0, 10.0] {
			let pass = graph.filter(threshold);
			assert!(pass.links.iter().all(|l| l.weight > threshold));
			assert_eq!(
				pass.links.len(),
				graph.links.iter().filter(|l| l.weight > threshold).count()
			);
			for node in &graph.nodes {
				let touched = pass
					.links
					.iter()
					.any(|l| l.source == node.name || l.target == node.name);
				assert_eq!(pass.degree(&node.name).is_some(), touched);
				assert_eq!(pass.nodes.contains(node), touched);
			}
		}
	}
}
