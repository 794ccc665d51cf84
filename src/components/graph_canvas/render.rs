use std::collections::HashSet;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_RADIUS};

const BACKGROUND: &str = "#1a1a2e";
const EDGE_DEFAULT: &str = "rgba(177, 177, 183, 0.8)";
const NODE_DEFAULT: &str = "#f4f4f8";
const PRIMARY: &str = "#ff0072";

/// Canvas cannot read CSS custom properties; map the ones the log can emit.
fn resolve_color(color: &str) -> &str {
	if color.starts_with("var(") { PRIMARY } else { color }
}

/// Black or white, whichever reads better on `fill`.
fn contrast_text(fill: &str) -> &'static str {
	let hex = fill.trim_start_matches('#');
	if hex.len() != 6 || !hex.is_ascii() || !fill.starts_with('#') {
		return "#000000";
	}
	let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0) as f64;
	let luminance = (0.299 * channel(0) + 0.587 * channel(2) + 0.114 * channel(4)) / 255.0;
	if luminance < 0.5 { "#ffffff" } else { "#000000" }
}

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let positions = state.positions();
	let (dash, gap, arrow_size) = (8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let mut drawn_pairs = HashSet::new();

	for edge in &state.edges {
		if !state.directed {
			if let Some(pair) = &edge.pair {
				if !drawn_pairs.insert(pair.as_str()) {
					continue;
				}
			}
		}
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let visual = state.visuals.edge(&edge.id);
		let color = visual.color.as_deref().map(resolve_color).unwrap_or(EDGE_DEFAULT);
		let width = if visual.highlight { 3.0 / k } else { 1.5 / k };
		let head = if state.directed { arrow_size } else { 0.0 };

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		if visual.highlight {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(x2 - ux * (NODE_RADIUS + head), y2 - uy * (NODE_RADIUS + head));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if state.directed {
			ctx.set_fill_style_str(color);
			let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
			let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
			let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}

		if state.weighted {
			let weight = visual.weight.unwrap_or(edge.weight);
			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
			let _ = ctx.fill_text(&weight.to_string(), (x1 + x2) / 2.0 + 4.0, (y1 + y2) / 2.0 - 4.0);
		}
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;

	state.layout.visit_nodes(|node| {
		let id = &node.data.user_data.id;
		let visual = state.visuals.node(id);
		let (x, y) = (node.x() as f64, node.y() as f64);
		let fill = visual.color.as_deref().map(resolve_color).unwrap_or(NODE_DEFAULT);

		if visual.visit {
			let glow = NODE_RADIUS * 2.2;
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, NODE_RADIUS * 0.5, x, y, glow) {
				let _ = gradient.add_color_stop(0.0, "rgba(255, 0, 114, 0.55)");
				let _ = gradient.add_color_stop(1.0, "rgba(255, 0, 114, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();

		let (ring, ring_width) = if visual.highlight {
			(PRIMARY, 3.0)
		} else if visual.visit {
			(PRIMARY, 2.0)
		} else {
			("#b1b1b7", 1.0)
		};
		ctx.set_stroke_style_str(ring);
		ctx.set_line_width(ring_width / k.max(0.5));
		ctx.stroke();

		let label = visual.text.as_deref().unwrap_or(id.as_str());
		ctx.set_fill_style_str(contrast_text(fill));
		ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(label, x, y);
	});
}
