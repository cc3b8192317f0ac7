//! Visual encodings: type colours and degree-based radii.

/// Node types known up front, in legend order.
pub const TYPE_DOMAIN: &[&str] = &["Facilities", "Socio-Demographical"];

/// Colours paired with [`TYPE_DOMAIN`], reused cyclically for unseen types.
pub const TYPE_RANGE: &[&str] = &["#86cbff", "#c2e5a0"];

const RADIUS_BASE: f64 = 24.0;

/// Ordinal colour scale over node types.
///
/// Types outside the initial domain are appended on first lookup and take the next colour
/// in the range, wrapping around.
#[derive(Clone, Debug)]
pub struct ColorScale {
	domain: Vec<String>,
	range: Vec<String>,
}

impl Default for ColorScale {
	fn default() -> Self {
		Self::new(TYPE_DOMAIN, TYPE_RANGE)
	}
}

impl ColorScale {
	/// Builds a scale from an initial domain and a non-empty colour range.
	pub fn new(domain: &[&str], range: &[&str]) -> Self {
		Self {
			domain: domain.iter().map(|d| d.to_string()).collect(),
			range: range.iter().map(|r| r.to_string()).collect(),
		}
	}

	/// Colour for `node_type`, growing the domain if needed.
	pub fn color(&mut self, node_type: &str) -> String {
		let i = match self.domain.iter().position(|d| d == node_type) {
			Some(i) => i,
			None => {
				self.domain.push(node_type.to_string());
				self.domain.len() - 1
			}
		};
		self.range
			.get(i % self.range.len().max(1))
			.cloned()
			.unwrap_or_default()
	}

	/// Domain entries with their colours, in legend order.
	pub fn entries(&self) -> Vec<(String, String)> {
		self.domain
			.iter()
			.enumerate()
			.map(|(i, d)| {
				let color = self
					.range
					.get(i % self.range.len().max(1))
					.cloned()
					.unwrap_or_default();
				(d.clone(), color)
			})
			.collect()
	}
}

/// Circle radius for a node with the given zero-based surviving degree.
pub fn node_radius(degree: u32) -> f64 {
	(f64::from(degree) + RADIUS_BASE).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_types_use_fixed_colors() {
		let mut scale = ColorScale::default();
		assert_eq!(scale.color("Socio-Demographical"), "#c2e5a0");
		assert_eq!(scale.color("Facilities"), "#86cbff");
	}

	#[test]
	fn unknown_types_extend_domain_and_cycle() {
		let mut scale = ColorScale::default();
		assert_eq!(scale.color("Other"), "#86cbff");
		assert_eq!(scale.color("More"), "#c2e5a0");
		assert_eq!(scale.color("Other"), "#86cbff");

		let legend: Vec<String> = scale.entries().into_iter().map(|(d, _)| d).collect();
		assert_eq!(legend, ["Facilities", "Socio-Demographical", "Other", "More"]);
	}

	#[test]
	fn empty_range_yields_blank_color() {
		let mut scale = ColorScale::new(&[], &[]);
		assert_eq!(scale.color("x"), "");
	}

	#[test]
	fn radius_uses_zero_based_degree() {
		assert_eq!(node_radius(0), 24f64.sqrt());
		assert_eq!(node_radius(1), 5.0);
		assert!(node_radius(12) > node_radius(11));
	}
}
