use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{info, warn};

use super::highlight::Highlighter;
use super::simulation::Temperature;
use super::types::InfluenceGraphData;
use crate::components::scale::{OrdinalScale, SqrtScale, extent};
use crate::components::tooltip::TooltipContent;
use crate::config::GraphConfig;

/// Pointer travel (in screen pixels) below which a press counts as a click.
pub const CLICK_TOLERANCE: f64 = 3.0;
/// Longest physics step, so a backgrounded tab does not explode the layout.
const MAX_STEP_SECS: f64 = 0.05;
/// Clear space kept around every circle by the collision pass.
const COLLISION_PADDING: f64 = 12.0;
const COLLISION_ITERATIONS: usize = 4;

/// Per-node display data, indexed like the input document.
#[derive(Clone, Debug)]
pub struct NodeInfo {
	pub genre: String,
	pub radius: f64,
	pub color: &'static str,
	pub artist_count: u64,
	pub avg_influence: f64,
	pub top_artist: String,
}

impl NodeInfo {
	pub fn tooltip(&self) -> TooltipContent {
		TooltipContent {
			heading: self.genre.clone(),
			lines: vec![
				format!("Artists: {}", self.artist_count),
				format!("Avg Influence: {:.3}", self.avg_influence),
				format!("Top Artist: {}", self.top_artist),
			],
		}
	}
}

/// A resolved link between two node positions.
#[derive(Clone, Copy, Debug)]
pub struct EdgeInfo {
	pub source: usize,
	pub target: usize,
	pub width: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
	pub moved: bool,
}

/// What a released press turned out to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
	NodeClick(usize),
	BackgroundClick,
	DragEnd,
	PanEnd,
	Nothing,
}

pub struct InfluenceGraphState {
	pub graph: ForceGraph<usize, ()>,
	pub nodes: Vec<NodeInfo>,
	pub edges: Vec<EdgeInfo>,
	pub highlight: Highlighter,
	pub temperature: Temperature,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<usize>,
	pub width: f64,
	pub height: f64,
	pub title: String,
	pub label_font_px: f64,
	/// Timestamp of the latest animation frame, in milliseconds.
	pub clock_ms: f64,
	last_frame_ms: Option<f64>,
	handles: Vec<DefaultNodeIdx>,
}

impl InfluenceGraphState {
	pub fn new(data: &InfluenceGraphData, config: &GraphConfig) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 900.0,
			force_spring: 0.05,
			force_max: 280.0,
			node_speed: 7000.0,
			damping_factor: 0.9,
		});
		let (lo, hi) =
			extent(data.nodes.iter().map(|n| n.artist_count as f64)).unwrap_or((0.0, 0.0));
		let size = SqrtScale::new((lo, hi), config.radius_range);
		let mut palette = OrdinalScale::default();

		let mut id_to_idx = HashMap::new();
		let mut handles = Vec::with_capacity(data.nodes.len());
		let mut nodes = Vec::with_capacity(data.nodes.len());

		for (i, node) in data.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / data.nodes.len() as f64;
			let spread = 40.0 * (data.nodes.len() as f64).sqrt();
			let handle = graph.add_node(NodeData {
				x: (spread * angle.cos()) as f32,
				y: (spread * angle.sin()) as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: i,
			});
			handles.push(handle);
			if id_to_idx.insert(node.id.clone(), i).is_some() {
				warn!("influence graph: duplicate node id {:?}", node.id);
			}
			nodes.push(NodeInfo {
				genre: node.genre.clone(),
				radius: size.scale(node.artist_count as f64),
				color: palette.color(&node.genre),
				artist_count: node.artist_count,
				avg_influence: node.avg_influence,
				top_artist: node.top_artist_name.clone(),
			});
		}

		let mut edges = Vec::with_capacity(data.links.len());
		for link in &data.links {
			let (Some(&source), Some(&target)) =
				(id_to_idx.get(&link.source), id_to_idx.get(&link.target))
			else {
				warn!(
					"influence graph: dropping link {:?} -> {:?} with unknown endpoint",
					link.source, link.target
				);
				continue;
			};
			// force_graph cannot step a self-loop; it is still drawn and highlighted.
			if source != target {
				graph.add_edge(handles[source], handles[target], EdgeData::default());
			}
			edges.push(EdgeInfo {
				source,
				target,
				width: link.weight.max(0.0).sqrt(),
			});
		}
		info!(
			"influence graph: {} nodes, {} links",
			nodes.len(),
			edges.len()
		);

		let highlight = Highlighter::new(
			nodes.iter().map(|n| n.genre.clone()).collect(),
			edges.iter().map(|e| (e.source, e.target)).collect(),
		);

		Self {
			graph,
			nodes,
			edges,
			highlight,
			temperature: Temperature::default(),
			transform: ViewTransform {
				x: config.width / 2.0,
				y: config.height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			width: config.width,
			height: config.height,
			title: config.title.clone(),
			label_font_px: config.label_font_px,
			clock_ms: 0.0,
			last_frame_ms: None,
			handles,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Current layout positions, indexed like `nodes`.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut positions = vec![(0.0, 0.0); self.nodes.len()];
		self.graph.visit_nodes(|node| {
			if let Some(p) = positions.get_mut(node.data.user_data) {
				*p = (node.x() as f64, node.y() as f64);
			}
		});
		positions
	}

	/// Topmost node under the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.positions()
			.iter()
			.enumerate()
			.rev()
			.find(|(i, (x, y))| {
				let (dx, dy) = (x - gx, y - gy);
				(dx * dx + dy * dy).sqrt() < self.nodes[*i].radius
			})
			.map(|(i, _)| i)
	}

	fn set_node_position(&mut self, idx: usize, x: f32, y: f32, pinned: bool) {
		let Some(&handle) = self.handles.get(idx) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = pinned;
			}
		});
	}

	fn release_pin(&mut self, idx: usize) {
		let Some(&handle) = self.handles.get(idx) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.is_anchor = false;
			}
		});
	}

	/// Mouse-down: grabs the node under the pointer, or starts panning.
	pub fn press(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			let (nx, ny) = self.positions()[idx];
			self.temperature.begin_drag();
			self.drag = DragState {
				node: Some(idx),
				start_x: x,
				start_y: y,
				node_start_x: nx as f32,
				node_start_y: ny as f32,
				moved: false,
			};
			self.set_node_position(idx, nx as f32, ny as f32, true);
		} else {
			self.pan = PanState {
				active: true,
				start_x: x,
				start_y: y,
				transform_start_x: self.transform.x,
				transform_start_y: self.transform.y,
				moved: false,
			};
		}
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.drag.node {
			let (dx, dy) = (x - self.drag.start_x, y - self.drag.start_y);
			if dx.hypot(dy) > CLICK_TOLERANCE {
				self.drag.moved = true;
			}
			let (nx, ny) = (
				self.drag.node_start_x + (dx / self.transform.k) as f32,
				self.drag.node_start_y + (dy / self.transform.k) as f32,
			);
			self.set_node_position(idx, nx, ny, true);
		} else if self.pan.active {
			let (dx, dy) = (x - self.pan.start_x, y - self.pan.start_y);
			if dx.hypot(dy) > CLICK_TOLERANCE {
				self.pan.moved = true;
			}
			if self.pan.moved {
				self.transform.x = self.pan.transform_start_x + dx;
				self.transform.y = self.pan.transform_start_y + dy;
			}
		} else {
			self.hover = self.node_at_position(x, y);
		}
	}

	/// Mouse-up: ends a drag or pan, turning a still press into a click.
	pub fn release(&mut self) -> Release {
		let outcome = if let Some(idx) = self.drag.node.take() {
			self.temperature.end_drag();
			self.release_pin(idx);
			if self.drag.moved {
				Release::DragEnd
			} else {
				self.highlight.click_node(idx, self.clock_ms);
				Release::NodeClick(idx)
			}
		} else if self.pan.active {
			if self.pan.moved {
				Release::PanEnd
			} else {
				self.highlight.click_background(self.clock_ms);
				Release::BackgroundClick
			}
		} else {
			Release::Nothing
		};
		self.drag = DragState::default();
		self.pan = PanState::default();
		outcome
	}

	/// Pointer left the canvas: abandon any gesture without clicking.
	pub fn leave(&mut self) {
		if let Some(idx) = self.drag.node.take() {
			self.temperature.end_drag();
			self.release_pin(idx);
		}
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.hover = None;
	}

	/// Zooms by one wheel notch, keeping the point under the cursor fixed.
	pub fn zoom(&mut self, x: f64, y: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn choose_genre(&mut self, genre: &str) -> bool {
		self.highlight.choose_genre(genre, self.clock_ms)
	}

	/// Advances the clock to the frame timestamp and steps the layout.
	pub fn tick(&mut self, timestamp_ms: f64) {
		let dt = self
			.last_frame_ms
			.map_or(0.016, |last| ((timestamp_ms - last) / 1000.0).clamp(0.0, MAX_STEP_SECS));
		self.last_frame_ms = Some(timestamp_ms);
		self.clock_ms = timestamp_ms;

		if self.temperature.is_running() {
			let alpha = self.temperature.tick();
			self.graph.update((dt * alpha) as f32);
			self.resolve_collisions();
		}
	}

	/// Pushes apart circles closer than their radii plus padding.
	/// Pinned nodes hold still and the other node of the pair takes the push.
	fn resolve_collisions(&mut self) {
		let n = self.nodes.len();
		let mut positions = self.positions();
		let mut pinned = vec![false; n];
		self.graph.visit_nodes(|node| {
			if let Some(p) = pinned.get_mut(node.data.user_data) {
				*p = node.data.is_anchor;
			}
		});

		for _ in 0..COLLISION_ITERATIONS {
			for i in 0..n {
				for j in (i + 1)..n {
					let (wi, wj) = match (pinned[i], pinned[j]) {
						(true, true) => continue,
						(true, false) => (0.0, 1.0),
						(false, true) => (1.0, 0.0),
						(false, false) => (0.5, 0.5),
					};
					let min_dist =
						self.nodes[i].radius + self.nodes[j].radius + 2.0 * COLLISION_PADDING;
					let (dx, dy) = (
						positions[j].0 - positions[i].0,
						positions[j].1 - positions[i].1,
					);
					let dist = dx.hypot(dy);
					if dist >= min_dist {
						continue;
					}
					// Coincident nodes get a fixed direction per pair.
					let (ux, uy) = if dist > 1e-6 {
						(dx / dist, dy / dist)
					} else {
						let angle = (i * 31 + j) as f64;
						(angle.cos(), angle.sin())
					};
					let overlap = min_dist - dist;
					positions[i].0 -= ux * overlap * wi;
					positions[i].1 -= uy * overlap * wi;
					positions[j].0 += ux * overlap * wj;
					positions[j].1 += uy * overlap * wj;
				}
			}
		}

		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&(x, y)) = positions.get(node.data.user_data) {
				node.data.x = x as f32;
				node.data.y = y as f32;
			}
		});
	}
}
