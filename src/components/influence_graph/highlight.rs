//! Focus state for the influence graph.
//!
//! A single selected node drives the opacity of nodes, labels and edges and
//! the value shown in the genre dropdown. Highlighting is "reverse": the
//! selected node stays lit together with every node that has an edge pointing
//! *into* it, i.e. the genres that influenced it.

use log::debug;

use crate::components::transition::Tween;

pub const HIGHLIGHT_MS: f64 = 300.0;
pub const RESET_MS: f64 = 250.0;

pub const FADED_NODE_OPACITY: f64 = 0.12;
pub const FADED_LABEL_OPACITY: f64 = 0.1;
pub const FADED_EDGE_OPACITY: f64 = 0.05;
pub const DEFAULT_EDGE_OPACITY: f64 = 0.7;

/// Edge strokes are all grays; the level is tweened as a single channel.
pub const DEFAULT_EDGE_GRAY: f64 = 136.0; // #888
pub const LIT_EDGE_GRAY: f64 = 255.0; // #fff
pub const FADED_EDGE_GRAY: f64 = 68.0; // #444

pub const DEFAULT_NODE_STROKE: &str = "#fff";
pub const SELECTED_NODE_STROKE: &str = "lime";
pub const DEFAULT_NODE_STROKE_WIDTH: f64 = 1.5;
pub const SELECTED_NODE_STROKE_WIDTH: f64 = 4.0;

#[derive(Clone, Debug)]
struct NodeStyle {
	opacity: Tween,
	label_opacity: Tween,
	stroke: &'static str,
	stroke_width: Tween,
}

impl Default for NodeStyle {
	fn default() -> Self {
		Self {
			opacity: Tween::fixed(1.0),
			label_opacity: Tween::fixed(1.0),
			stroke: DEFAULT_NODE_STROKE,
			stroke_width: Tween::fixed(DEFAULT_NODE_STROKE_WIDTH),
		}
	}
}

#[derive(Clone, Debug)]
struct EdgeStyle {
	opacity: Tween,
	gray: Tween,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			opacity: Tween::fixed(DEFAULT_EDGE_OPACITY),
			gray: Tween::fixed(DEFAULT_EDGE_GRAY),
		}
	}
}

/// Selection plus the visual state of every node, label and edge.
///
/// Nodes and edges are addressed by their position in the input document.
#[derive(Clone, Debug)]
pub struct Highlighter {
	genres: Vec<String>,
	edges: Vec<(usize, usize)>,
	selected: Option<usize>,
	dropdown: String,
	nodes: Vec<NodeStyle>,
	edge_styles: Vec<EdgeStyle>,
}

impl Highlighter {
	/// `genres[i]` is the genre of node `i`; `edges` are `(source, target)`
	/// node positions.
	pub fn new(genres: Vec<String>, edges: Vec<(usize, usize)>) -> Self {
		Self {
			nodes: vec![NodeStyle::default(); genres.len()],
			edge_styles: vec![EdgeStyle::default(); edges.len()],
			genres,
			edges,
			selected: None,
			dropdown: String::new(),
		}
	}

	pub fn selected(&self) -> Option<usize> {
		self.selected
	}

	/// Current dropdown value; empty means "all genres".
	pub fn dropdown_value(&self) -> &str {
		&self.dropdown
	}

	/// Nodes with an edge pointing into `node`.
	pub fn influencers_of(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
		self.edges
			.iter()
			.filter(move |&&(_, target)| target == node)
			.map(|&(source, _)| source)
	}

	fn is_lit(&self, node: usize, selected: usize) -> bool {
		node == selected || self.influencers_of(selected).any(|s| s == node)
	}

	/// Marks `node` as the selection and mirrors its genre into the dropdown.
	pub fn select_node(&mut self, node: usize) {
		if node >= self.nodes.len() {
			return;
		}
		self.selected = Some(node);
		self.dropdown = self.genres[node].clone();
		for (i, style) in self.nodes.iter_mut().enumerate() {
			if i == node {
				style.stroke = SELECTED_NODE_STROKE;
				style.stroke_width.set(SELECTED_NODE_STROKE_WIDTH);
			} else {
				style.stroke = DEFAULT_NODE_STROKE;
				style.stroke_width.set(DEFAULT_NODE_STROKE_WIDTH);
			}
		}
	}

	/// Lights `node` and its direct influencers, fading everything else.
	pub fn highlight_reverse(&mut self, node: usize, now_ms: f64) {
		if node >= self.nodes.len() {
			return;
		}
		let lit: Vec<bool> = (0..self.nodes.len()).map(|i| self.is_lit(i, node)).collect();
		for (style, lit) in self.nodes.iter_mut().zip(lit) {
			let (opacity, label) = if lit {
				(1.0, 1.0)
			} else {
				(FADED_NODE_OPACITY, FADED_LABEL_OPACITY)
			};
			style.opacity.retarget(opacity, now_ms, HIGHLIGHT_MS);
			style.label_opacity.retarget(label, now_ms, HIGHLIGHT_MS);
		}
		for (style, &(_, target)) in self.edge_styles.iter_mut().zip(&self.edges) {
			let (opacity, gray) = if target == node {
				(1.0, LIT_EDGE_GRAY)
			} else {
				(FADED_EDGE_OPACITY, FADED_EDGE_GRAY)
			};
			style.opacity.retarget(opacity, now_ms, HIGHLIGHT_MS);
			style.gray.retarget(gray, now_ms, HIGHLIGHT_MS);
		}
	}

	/// Clears the selection and fades everything back to its resting style.
	pub fn reset_highlight(&mut self, now_ms: f64) {
		self.selected = None;
		for style in &mut self.nodes {
			style.opacity.retarget(1.0, now_ms, RESET_MS);
			style.label_opacity.retarget(1.0, now_ms, RESET_MS);
			style.stroke = DEFAULT_NODE_STROKE;
			style
				.stroke_width
				.retarget(DEFAULT_NODE_STROKE_WIDTH, now_ms, RESET_MS);
		}
		for style in &mut self.edge_styles {
			style.opacity.retarget(DEFAULT_EDGE_OPACITY, now_ms, RESET_MS);
			style.gray.retarget(DEFAULT_EDGE_GRAY, now_ms, RESET_MS);
		}
	}

	pub fn click_node(&mut self, node: usize, now_ms: f64) {
		debug!("influence graph: node {node} selected");
		self.highlight_reverse(node, now_ms);
		self.select_node(node);
	}

	/// Applies a dropdown choice. The first node carrying `genre` becomes the
	/// selection; returns `false` when nothing changed in the graph.
	pub fn choose_genre(&mut self, genre: &str, now_ms: f64) -> bool {
		self.dropdown = genre.to_owned();
		if genre.is_empty() {
			self.reset_highlight(now_ms);
			return true;
		}
		let Some(node) = self.genres.iter().position(|g| g == genre) else {
			debug!("influence graph: no node for genre {genre:?}");
			return false;
		};
		self.highlight_reverse(node, now_ms);
		self.select_node(node);
		true
	}

	pub fn click_background(&mut self, now_ms: f64) {
		self.reset_highlight(now_ms);
		self.dropdown.clear();
	}

	pub fn node_opacity(&self, node: usize, now_ms: f64) -> f64 {
		self.nodes
			.get(node)
			.map_or(1.0, |s| s.opacity.value_at(now_ms))
	}

	pub fn label_opacity(&self, node: usize, now_ms: f64) -> f64 {
		self.nodes
			.get(node)
			.map_or(1.0, |s| s.label_opacity.value_at(now_ms))
	}

	pub fn node_stroke(&self, node: usize) -> &'static str {
		self.nodes.get(node).map_or(DEFAULT_NODE_STROKE, |s| s.stroke)
	}

	pub fn node_stroke_width(&self, node: usize, now_ms: f64) -> f64 {
		self.nodes
			.get(node)
			.map_or(DEFAULT_NODE_STROKE_WIDTH, |s| s.stroke_width.value_at(now_ms))
	}

	pub fn edge_opacity(&self, edge: usize, now_ms: f64) -> f64 {
		self.edge_styles
			.get(edge)
			.map_or(DEFAULT_EDGE_OPACITY, |s| s.opacity.value_at(now_ms))
	}

	/// Stroke gray level of `edge` in `0..=255`.
	pub fn edge_gray(&self, edge: usize, now_ms: f64) -> f64 {
		self.edge_styles
			.get(edge)
			.map_or(DEFAULT_EDGE_GRAY, |s| s.gray.value_at(now_ms))
	}

	/// True once every transition has finished.
	#[cfg(test)]
	pub fn is_settled(&self, now_ms: f64) -> bool {
		self.nodes.iter().all(|s| {
			s.opacity.is_done(now_ms)
				&& s.label_opacity.is_done(now_ms)
				&& s.stroke_width.is_done(now_ms)
		}) && self
			.edge_styles
			.iter()
			.all(|s| s.opacity.is_done(now_ms) && s.gray.is_done(now_ms))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const LATER: f64 = 10_000.0;

	/// A(Rock) <- B(Jazz), plus C(Jazz) -> B and an isolated D(Pop).
	fn sample() -> Highlighter {
		Highlighter::new(
			vec!["Rock".into(), "Jazz".into(), "Jazz".into(), "Pop".into()],
			vec![(1, 0), (2, 1)],
		)
	}

	fn lit_nodes(h: &Highlighter) -> Vec<usize> {
		(0..4).filter(|&i| h.node_opacity(i, LATER) == 1.0).collect()
	}

	#[test]
	fn selecting_target_lights_its_influencers() {
		let mut h = Highlighter::new(vec!["Rock".into(), "Jazz".into()], vec![(1, 0)]);
		h.click_node(0, 0.0);
		assert_eq!(h.node_opacity(0, LATER), 1.0);
		assert_eq!(h.node_opacity(1, LATER), 1.0);
		assert_eq!(h.edge_opacity(0, LATER), 1.0);
		assert_eq!(h.edge_gray(0, LATER), LIT_EDGE_GRAY);
		assert_eq!(h.dropdown_value(), "Rock");
	}

	#[test]
	fn selecting_source_fades_what_it_influences() {
		let mut h = Highlighter::new(vec!["Rock".into(), "Jazz".into()], vec![(1, 0)]);
		h.click_node(1, 0.0);
		assert_eq!(h.node_opacity(1, LATER), 1.0);
		assert_eq!(h.node_opacity(0, LATER), FADED_NODE_OPACITY);
		assert_eq!(h.label_opacity(0, LATER), FADED_LABEL_OPACITY);
		assert_eq!(h.edge_opacity(0, LATER), FADED_EDGE_OPACITY);
		assert_eq!(h.edge_gray(0, LATER), FADED_EDGE_GRAY);
	}

	#[test]
	fn highlight_is_exactly_node_plus_incoming_sources() {
		let mut h = sample();
		let expected: [(usize, Vec<usize>); 4] =
			[(0, vec![0, 1]), (1, vec![1, 2]), (2, vec![2]), (3, vec![3])];
		for (node, lit) in expected {
			h.highlight_reverse(node, 0.0);
			assert_eq!(lit_nodes(&h), lit, "node {node}");
		}
	}

	#[test]
	fn highlight_runs_as_a_transition() {
		let mut h = sample();
		h.highlight_reverse(0, 1000.0);
		assert_eq!(h.node_opacity(3, 1000.0), 1.0);
		assert!(!h.is_settled(1000.0 + HIGHLIGHT_MS / 2.0));
		assert!(h.is_settled(1000.0 + HIGHLIGHT_MS));
		assert_eq!(h.node_opacity(3, 1000.0 + HIGHLIGHT_MS), FADED_NODE_OPACITY);
	}

	#[test]
	fn select_marks_only_one_node() {
		let mut h = sample();
		h.select_node(2);
		h.select_node(1);
		assert_eq!(h.selected(), Some(1));
		assert_eq!(h.node_stroke(1), SELECTED_NODE_STROKE);
		assert_eq!(h.node_stroke_width(1, 0.0), SELECTED_NODE_STROKE_WIDTH);
		assert_eq!(h.node_stroke(2), DEFAULT_NODE_STROKE);
		assert_eq!(h.node_stroke_width(2, 0.0), DEFAULT_NODE_STROKE_WIDTH);
	}

	#[test]
	fn reset_restores_defaults_from_any_state() {
		let mut h = sample();
		h.click_node(1, 0.0);
		h.click_node(0, 100.0);
		h.reset_highlight(200.0);
		assert_eq!(h.selected(), None);
		for i in 0..4 {
			assert_eq!(h.node_opacity(i, LATER), 1.0);
			assert_eq!(h.label_opacity(i, LATER), 1.0);
			assert_eq!(h.node_stroke(i), DEFAULT_NODE_STROKE);
			assert_eq!(h.node_stroke_width(i, LATER), DEFAULT_NODE_STROKE_WIDTH);
		}
		for e in 0..2 {
			assert_eq!(h.edge_opacity(e, LATER), DEFAULT_EDGE_OPACITY);
			assert_eq!(h.edge_gray(e, LATER), DEFAULT_EDGE_GRAY);
		}
		assert!(h.is_settled(200.0 + RESET_MS));
	}

	#[test]
	fn genre_choice_uses_first_matching_node() {
		let mut h = sample();
		assert!(h.choose_genre("Jazz", 0.0));
		assert_eq!(h.selected(), Some(1));
		assert_eq!(lit_nodes(&h), vec![1, 2]);
		assert_eq!(h.dropdown_value(), "Jazz");
	}

	#[test]
	fn unknown_genre_leaves_graph_unchanged() {
		let mut h = sample();
		h.click_node(0, 0.0);
		assert!(!h.choose_genre("Metal", 50.0));
		assert_eq!(h.selected(), Some(0));
		assert_eq!(lit_nodes(&h), vec![0, 1]);
	}

	#[test]
	fn empty_genre_choice_resets() {
		let mut h = sample();
		h.click_node(0, 0.0);
		assert!(h.choose_genre("", 10.0));
		assert_eq!(h.selected(), None);
		assert_eq!(lit_nodes(&h), vec![0, 1, 2, 3]);
	}

	#[test]
	fn background_click_clears_dropdown() {
		let mut h = sample();
		h.click_node(3, 0.0);
		assert_eq!(h.dropdown_value(), "Pop");
		h.click_background(10.0);
		assert_eq!(h.dropdown_value(), "");
		assert_eq!(h.selected(), None);
	}

	#[test]
	fn out_of_range_node_is_ignored() {
		let mut h = sample();
		h.click_node(99, 0.0);
		assert_eq!(h.selected(), None);
		assert_eq!(lit_nodes(&h), vec![0, 1, 2, 3]);
	}
}
