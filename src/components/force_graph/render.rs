use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "rgba(153, 153, 153, 0.6)";
const LINK_HIGHLIGHT: &str = "rgba(214, 39, 40, 0.9)";
const LABEL_COLOR: &str = "#333333";
const LABEL_FONT: &str = "10px sans-serif";
const LEGEND_RADIUS: f64 = 5.0;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_legend(state, ctx);
}

fn draw_links(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	state.graph.visit_edges(|n1, n2, edge| {
		let (color, width) = if state.is_link_highlighted(edge.user_data) {
			(LINK_HIGHLIGHT, 2.5)
		} else {
			(LINK_COLOR, 1.0)
		};
		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(n1.x() as f64, n1.y() as f64);
		ctx.line_to(n2.x() as f64, n2.y() as f64);
		ctx.stroke();
	});
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);

		ctx.begin_path();
		let _ = ctx.arc(x, y, info.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.color);
		ctx.fill();

		// pinned
		if info.pin.is_some() {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(2.0),
				&JsValue::from_f64(1.5),
			));
			ctx.set_stroke_style_str(LABEL_COLOR);
			ctx.set_line_width(1.5);
			ctx.stroke();
			let _ = ctx.set_line_dash(&js_sys::Array::new());
		}

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(&info.node.name, x + 10.0, y);
	});
}

fn draw_legend(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font(LABEL_FONT);
	for (i, (label, color)) in state.legend.iter().enumerate() {
		let (x, y) = (state.width - 200.0, (i as f64 + 2.0) * 20.0);
		ctx.begin_path();
		let _ = ctx.arc(x, y, LEGEND_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();

		ctx.set_fill_style_str(LABEL_COLOR);
		let _ = ctx.fill_text(label, x + 10.0, y + 5.0);
	}
}
