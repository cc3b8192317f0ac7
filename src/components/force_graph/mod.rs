//! Force-directed canvas for a threshold-filtered graph, with the filtering pass it displays.

mod commands;
mod component;
mod filter;
mod render;
pub mod scale;
mod state;
mod tooltip;
mod types;

pub use commands::GraphCommands;
pub use component::ForceGraphCanvas;
pub use filter::{FilteredGraph, LinkedNodeCounts, filter_links, filter_nodes, surviving_degrees};
pub use tooltip::Tooltip;
pub use types::{GraphData, GraphLink, GraphNode};
