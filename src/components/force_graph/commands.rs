use crate::error::CommandError;

/// Interaction intents, decoupled from the events that trigger them.
///
/// The canvas component maps mouse input onto these calls; any other front end can drive
/// the same state through them.
pub trait GraphCommands {
	/// Fixes a node at `(x, y)`, clamped to the surface.
	fn pin(&mut self, name: &str, x: f64, y: f64) -> Result<(), CommandError>;

	/// Releases a node back to the simulation.
	fn unpin(&mut self, name: &str) -> Result<(), CommandError>;

	/// Toggles the highlight of every link incident to `name`, returning how many changed.
	fn highlight_neighbors(&mut self, name: &str) -> Result<usize, CommandError>;
}
