use serde_json::Value;

/// Offset of the card from the pinned node position.
const OFFSET: (f64, f64) = (20.0, 15.0);

/// Hover card shown for pinned nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
	/// Heading, taken from the node description.
	pub title: String,
	/// Bin value.
	pub bin: String,
	/// `min - max`, two decimals each. Absent when either bound is missing.
	pub interval: Option<String>,
	/// Left edge in canvas pixels.
	pub left: f64,
	/// Top edge in canvas pixels.
	pub top: f64,
}

impl Tooltip {
	/// Builds the card for a node pinned at `pin`.
	pub fn new(
		desc: Option<&str>,
		cg_value: Option<&Value>,
		cg_min: Option<f64>,
		cg_max: Option<f64>,
		pin: (f64, f64),
	) -> Self {
		let bin = match cg_value {
			Some(Value::String(s)) => s.clone(),
			Some(v) => v.to_string(),
			None => "undefined".to_string(),
		};
		Self {
			title: desc.unwrap_or("undefined").to_string(),
			bin,
			interval: cg_min
				.zip(cg_max)
				.map(|(lo, hi)| format!("{} - {}", to_fixed(lo), to_fixed(hi))),
			left: pin.0 + OFFSET.0,
			top: pin.1 + OFFSET.1,
		}
	}
}

/// Two decimals with ties rounded away from zero.
fn to_fixed(v: f64) -> String {
	format!("{:.2}", (v * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn formats_card_next_to_pin() {
		let value = json!(4);
		let tip = Tooltip::new(Some("Schools"), Some(&value), Some(0.5), Some(1.256), (100.0, 40.0));
		assert_eq!(tip.title, "Schools");
		assert_eq!(tip.bin, "4");
		assert_eq!(tip.interval.as_deref(), Some("0.50 - 1.26"));
		assert_eq!((tip.left, tip.top), (120.0, 55.0));
	}

	#[test]
	fn string_bins_are_unquoted() {
		let value = json!("high");
		let tip = Tooltip::new(None, Some(&value), None, Some(1.0), (0.0, 0.0));
		assert_eq!(tip.bin, "high");
		assert_eq!(tip.title, "undefined");
		assert_eq!(tip.interval, None);
	}

	#[test]
	fn interval_ties_round_up() {
		let tip = Tooltip::new(None, None, Some(0.125), Some(2.5), (0.0, 0.0));
		assert_eq!(tip.interval.as_deref(), Some("0.13 - 2.50"));

		let tip = Tooltip::new(None, None, Some(-0.375), Some(0.005), (0.0, 0.0));
		assert_eq!(tip.interval.as_deref(), Some("-0.38 - 0.01"));
	}
}
