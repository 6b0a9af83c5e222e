use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::reducer::{EdgeDisplay, NodeDisplay, reduce_edge, reduce_node};
use super::state::ExplorerState;

const BACKGROUND_COLOR: &str = "#ffffff";
const LABEL_COLOR: &str = "#333333";
const HIGHLIGHT_RING_COLOR: &str = "#333333";

/// World-space size above which a node's label shows without being forced.
const LABEL_SIZE_THRESHOLD: f64 = 4.0;

pub fn render(state: &ExplorerState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND_COLOR);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	let positions = state.positions();
	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx, &positions);
	ctx.restore();
}

fn draw_edges(state: &ExplorerState, ctx: &CanvasRenderingContext2d, positions: &[(f64, f64)]) {
	let k = state.transform.k;
	ctx.set_line_width(1.0 / k);

	for (i, edge) in state.store.edges().iter().enumerate() {
		let display = reduce_edge(
			&state.store,
			&state.interaction,
			i,
			EdgeDisplay::base(&state.store, i),
		);
		if display.hidden {
			continue;
		}

		let (x1, y1) = positions[edge.source];
		let (x2, y2) = positions[edge.target];
		ctx.set_stroke_style_str(&display.color);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ExplorerState, ctx: &CanvasRenderingContext2d, positions: &[(f64, f64)]) {
	let k = state.transform.k;

	for (idx, _) in state.store.nodes() {
		let display = reduce_node(
			&state.store,
			&state.interaction,
			idx,
			NodeDisplay::base(&state.store, idx),
		);
		if display.hidden && !display.highlighted {
			continue;
		}

		let (x, y) = positions[idx];
		ctx.begin_path();
		let _ = ctx.arc(x, y, display.size, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&display.color);
		ctx.fill();

		if display.highlighted {
			ctx.begin_path();
			let _ = ctx.arc(x, y, display.size + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(HIGHLIGHT_RING_COLOR);
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		let show_label = display.force_label
			|| display.highlighted
			|| display.size >= LABEL_SIZE_THRESHOLD;
		if show_label && !display.label.is_empty() {
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
			let _ = ctx.fill_text(&display.label, x + display.size + 3.0, y + 3.0);
		}
	}
}
