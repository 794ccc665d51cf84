use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::playback::{Topology, VisualState};

pub const NODE_RADIUS: f64 = 14.0;

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub id: String,
}

/// A directed edge record resolved to layout indices.
#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub id: String,
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub weight: f64,
	pub pair: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct CanvasState {
	pub layout: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeInfo>,
	pub visuals: VisualState,
	pub directed: bool,
	pub weighted: bool,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub flow_time: f64,
}

fn new_layout() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 600.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

impl CanvasState {
	pub fn new(topology: &Topology, width: f64, height: f64) -> Self {
		let mut state = Self {
			layout: new_layout(),
			edges: Vec::new(),
			visuals: VisualState::default(),
			directed: topology.directed,
			weighted: false,
			transform: ViewTransform { x: 0.0, y: 0.0, k: 1.0 },
			pan: PanState::default(),
			width,
			height,
			flow_time: 0.0,
		};
		state.set_topology(topology);
		state
	}

	/// Rebuild the layout for `topology`, keeping the positions of nodes
	/// that survive.
	pub fn set_topology(&mut self, topology: &Topology) {
		let mut previous = HashMap::new();
		self.layout.visit_nodes(|node| {
			previous.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});

		let mut layout = new_layout();
		let mut id_to_idx = HashMap::new();
		let count = topology.nodes.len().max(1) as f64;
		let radius = 40.0 + 12.0 * count;
		for (i, id) in topology.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = previous.get(id).copied().unwrap_or((
				(self.width / 2.0 + radius * angle.cos()) as f32,
				(self.height / 2.0 + radius * angle.sin()) as f32,
			));
			let idx = layout.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo { id: id.clone() },
			});
			id_to_idx.insert(id.as_str(), idx);
		}

		let mut edges = Vec::new();
		let mut springs = Vec::new();
		for edge in &topology.edges {
			let (Some(&src), Some(&tgt)) =
				(id_to_idx.get(edge.source.as_str()), id_to_idx.get(edge.target.as_str()))
			else {
				continue;
			};
			// Mirrors share one spring.
			if !springs.contains(&(tgt, src)) {
				layout.add_edge(src, tgt, EdgeData::default());
				springs.push((src, tgt));
			}
			edges.push(EdgeInfo {
				id: edge.id.clone(),
				source: src,
				target: tgt,
				weight: edge.weight,
				pair: edge.undirected_pair_id.clone(),
			});
		}

		self.layout = layout;
		self.edges = edges;
		self.directed = topology.directed;
	}

	pub fn set_visuals(&mut self, visuals: VisualState) {
		self.visuals = visuals;
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut out = HashMap::new();
		self.layout.visit_nodes(|node| {
			out.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		out
	}

	pub fn tick(&mut self, dt: f32) {
		self.layout.update(dt);
		self.flow_time += dt as f64;
	}
}
