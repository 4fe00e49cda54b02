use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::InfluenceGraphState;

const BACKGROUND: &str = "#111";

pub fn render(state: &InfluenceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let positions = state.positions();
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, &positions, ctx);
	draw_nodes(state, &positions, ctx);
	draw_labels(state, &positions, ctx);
	ctx.restore();

	draw_title(state, ctx);
}

fn draw_edges(state: &InfluenceGraphState, positions: &[(f64, f64)], ctx: &CanvasRenderingContext2d) {
	let now = state.clock_ms;
	for (i, edge) in state.edges.iter().enumerate() {
		let ((x1, y1), (x2, y2)) = (positions[edge.source], positions[edge.target]);
		let gray = state.highlight.edge_gray(i, now).round() as u8;
		ctx.set_stroke_style_str(&format!(
			"rgba({gray}, {gray}, {gray}, {})",
			state.highlight.edge_opacity(i, now)
		));
		ctx.set_line_width(edge.width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &InfluenceGraphState, positions: &[(f64, f64)], ctx: &CanvasRenderingContext2d) {
	let now = state.clock_ms;
	for (i, (node, &(x, y))) in state.nodes.iter().zip(positions).enumerate() {
		ctx.set_global_alpha(state.highlight.node_opacity(i, now));
		ctx.begin_path();
		let _ = ctx.arc(x, y, node.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.color);
		ctx.fill();
		ctx.set_stroke_style_str(state.highlight.node_stroke(i));
		ctx.set_line_width(state.highlight.node_stroke_width(i, now));
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_labels(state: &InfluenceGraphState, positions: &[(f64, f64)], ctx: &CanvasRenderingContext2d) {
	let now = state.clock_ms;
	ctx.set_font(&format!("{}px sans-serif", state.label_font_px));
	ctx.set_text_align("start");
	ctx.set_fill_style_str("white");
	for (i, (node, &(x, y))) in state.nodes.iter().zip(positions).enumerate() {
		ctx.set_global_alpha(state.highlight.label_opacity(i, now));
		let _ = ctx.fill_text(&node.genre, x + node.radius + 4.0, y + 4.0);
	}
	ctx.set_global_alpha(1.0);
}

fn draw_title(state: &InfluenceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("bold 28px sans-serif");
	ctx.set_text_align("center");
	ctx.set_fill_style_str("#fff");
	let _ = ctx.fill_text(&state.title, state.width / 2.0, 40.0);
}
