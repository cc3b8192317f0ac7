use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::commands::GraphCommands;
use super::filter::FilteredGraph;
use super::scale::{ColorScale, node_radius};
use super::tooltip::Tooltip;
use super::types::GraphNode;
use crate::error::CommandError;

/// Minimum pick distance, for nodes smaller than a comfortable target.
pub const HIT_RADIUS: f64 = 8.0;

const CENTER_STRENGTH: f64 = 0.1;
const ALPHA_MIN: f64 = 0.001;
const ALPHA_TARGET: f64 = 0.0;
const REHEAT_ALPHA: f64 = 0.3;
const COOLING_TICKS: f64 = 300.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub node: GraphNode,
	pub color: String,
	pub radius: f64,
	pub pin: Option<(f64, f64)>,
}

#[derive(Clone, Debug)]
pub struct LinkState {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub highlighted: bool,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<DefaultNodeIdx>,
	pub moved: bool,
}

/// Simulation temperature. Decays geometrically towards zero and stops the layout once it
/// falls under `ALPHA_MIN`, reaching it after roughly 300 ticks from a cold start.
#[derive(Clone, Debug)]
pub struct Cooling {
	alpha: f64,
	decay: f64,
}

impl Default for Cooling {
	fn default() -> Self {
		Self {
			alpha: 1.0,
			decay: 1.0 - ALPHA_MIN.powf(1.0 / COOLING_TICKS),
		}
	}
}

impl Cooling {
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn is_running(&self) -> bool {
		self.alpha >= ALPHA_MIN
	}

	/// Advances one tick, returning false once the layout has settled.
	pub fn step(&mut self) -> bool {
		if !self.is_running() {
			return false;
		}
		self.alpha += (ALPHA_TARGET - self.alpha) * self.decay;
		true
	}

	pub fn reheat(&mut self) {
		self.alpha = REHEAT_ALPHA;
	}
}

pub struct ForceGraphState {
	pub graph: ForceGraph<NodeInfo, usize>,
	pub drag: DragState,
	pub hover: Option<DefaultNodeIdx>,
	pub cooling: Cooling,
	pub legend: Vec<(String, String)>,
	pub width: f64,
	pub height: f64,
	index: HashMap<String, DefaultNodeIdx>,
	links: Vec<LinkState>,
}

impl ForceGraphState {
	pub fn new(data: &FilteredGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 70.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let mut colors = ColorScale::default();
		let mut index = HashMap::new();
		let mut links = Vec::new();

		for (i, node) in data.nodes.iter().enumerate() {
			let pin = node.fixed_position();
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let (x, y) = pin.unwrap_or((
				width / 2.0 + 100.0 * angle.cos(),
				height / 2.0 + 100.0 * angle.sin(),
			));

			let idx = graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: pin.is_some(),
				user_data: NodeInfo {
					color: colors.color(&node.node_type),
					radius: node_radius(data.degree(&node.name).unwrap_or(0)),
					node: node.clone(),
					pin,
				},
			});
			index.insert(node.name.clone(), idx);
		}

		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (index.get(&link.source), index.get(&link.target)) {
				graph.add_edge(src, tgt, EdgeData {
					user_data: links.len(),
				});
				links.push(LinkState {
					source: src,
					target: tgt,
					highlighted: false,
				});
			}
		}

		Self {
			graph,
			drag: DragState::default(),
			hover: None,
			cooling: Cooling::default(),
			legend: colors.entries(),
			width,
			height,
			index,
			links,
		}
	}

	fn lookup(&self, name: &str) -> Result<DefaultNodeIdx, CommandError> {
		self.index.get(name).copied().ok_or_else(|| {
			warn!("no displayed node named '{name}'");
			CommandError::UnknownNode(name.to_string())
		})
	}

	fn info(&self, idx: DefaultNodeIdx) -> Option<NodeInfo> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.clone());
			}
		});
		found
	}

	pub fn node_name(&self, idx: DefaultNodeIdx) -> Option<String> {
		self.info(idx).map(|info| info.node.name)
	}

	#[cfg(test)]
	pub fn position(&self, name: &str) -> Option<(f64, f64)> {
		let idx = *self.index.get(name)?;
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some((node.x() as f64, node.y() as f64));
			}
		});
		found
	}

	#[cfg(test)]
	pub fn is_pinned(&self, name: &str) -> bool {
		self.index
			.get(name)
			.and_then(|&idx| self.info(idx))
			.is_some_and(|info| info.pin.is_some())
	}

	pub fn node_count(&self) -> usize {
		self.index.len()
	}

	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	pub fn is_link_highlighted(&self, link: usize) -> bool {
		self.links.get(link).is_some_and(|l| l.highlighted)
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<DefaultNodeIdx> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - x, node.y() as f64 - y);
			let reach = node.data.user_data.radius.max(HIT_RADIUS);
			if (dx * dx + dy * dy).sqrt() < reach {
				found = Some(node.index());
			}
		});
		found
	}

	/// Moves the hover to `node`, returning whether the pointer entered a different node.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hover == node {
			return false;
		}
		self.hover = node;
		true
	}

	/// Card for the hovered node. Only pinned nodes get one.
	pub fn tooltip(&self) -> Option<Tooltip> {
		let info = self.info(self.hover?)?;
		let pin = info.pin?;
		let node = &info.node;
		Some(Tooltip::new(
			node.desc.as_deref(),
			node.cg_value.as_ref(),
			node.cg_min,
			node.cg_max,
			pin,
		))
	}

	pub fn begin_drag(&mut self, idx: DefaultNodeIdx) {
		self.drag = DragState {
			node: Some(idx),
			moved: false,
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let Some(name) = self.drag.node.and_then(|idx| self.node_name(idx)) else {
			return;
		};
		self.drag.moved = true;
		let _ = self.pin(&name, x, y);
	}

	/// Ends a drag. A press released without movement is a click and unpins the node.
	pub fn end_drag(&mut self) {
		let drag = std::mem::take(&mut self.drag);
		if drag.moved {
			return;
		}
		if let Some(name) = drag.node.and_then(|idx| self.node_name(idx)) {
			let _ = self.unpin(&name);
		}
	}

	pub fn cancel_drag(&mut self) {
		self.drag = DragState::default();
	}

	/// Advances the layout by `dt` seconds, scaled by the current temperature.
	pub fn tick(&mut self, dt: f32) -> bool {
		if !self.cooling.step() {
			return false;
		}
		let alpha = self.cooling.alpha();
		self.graph.update(dt * alpha as f32);

		let (cx, cy) = (self.width / 2.0, self.height / 2.0);
		let pull = CENTER_STRENGTH * alpha;
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			node.data.x += ((cx - node.data.x as f64) * pull) as f32;
			node.data.y += ((cy - node.data.y as f64) * pull) as f32;
		});
		true
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.cooling.reheat();
	}
}

impl GraphCommands for ForceGraphState {
	fn pin(&mut self, name: &str, x: f64, y: f64) -> Result<(), CommandError> {
		let idx = self.lookup(name)?;
		let (x, y) = (x.clamp(0.0, self.width.max(0.0)), y.clamp(0.0, self.height.max(0.0)));
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
				node.data.user_data.pin = Some((x, y));
			}
		});
		self.cooling.reheat();
		debug!("pinned '{name}' at ({x:.1}, {y:.1})");
		Ok(())
	}

	fn unpin(&mut self, name: &str) -> Result<(), CommandError> {
		let idx = self.lookup(name)?;
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = false;
				node.data.user_data.pin = None;
			}
		});
		self.cooling.reheat();
		debug!("unpinned '{name}'");
		Ok(())
	}

	fn highlight_neighbors(&mut self, name: &str) -> Result<usize, CommandError> {
		let idx = self.lookup(name)?;
		let mut toggled = 0;
		for link in self
			.links
			.iter_mut()
			.filter(|l| l.source == idx || l.target == idx)
		{
			link.highlighted = !link.highlighted;
			toggled += 1;
		}
		debug!("toggled {toggled} links around '{name}'");
		Ok(toggled)
	}
}
