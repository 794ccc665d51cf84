//! Graph topology read by the interpreter.
//!
//! Undirected connections are stored as two directed [`Edge`]s sharing an
//! `undirected_pair_id`; edge-targeted commands resolve both of them.

use std::collections::BTreeSet;

use log::info;

use super::error::GraphInputError;

/// A directed edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Unique id, `edge-<k>`.
	pub id: String,
	/// Tail node id.
	pub source: String,
	/// Head node id.
	pub target: String,
	/// Weight before any `setEdgeWeight` override.
	pub weight: f64,
	/// Shared by the two mirrors of an undirected connection.
	pub undirected_pair_id: Option<String>,
}

/// Nodes, edges and the directed/undirected mode.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Topology {
	/// Node ids.
	pub nodes: Vec<String>,
	/// Directed edge records.
	pub edges: Vec<Edge>,
	/// When false, every connection is a mirrored pair.
	pub directed: bool,
}

fn pair_id(a: &str, b: &str) -> String {
	let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
	format!("{lo}-{hi}")
}

fn parse_pair(line: &str) -> Option<(usize, usize)> {
	let mut tokens = line.split_whitespace();
	let a = tokens.next()?.parse().ok()?;
	let b = tokens.next()?.parse().ok()?;
	Some((a, b))
}

impl Topology {
	/// An empty graph.
	pub fn new(directed: bool) -> Self {
		Self {
			directed,
			..Default::default()
		}
	}

	/// Read the `n m` header followed by `m` lines of `source target`.
	///
	/// Nodes are `0..n`. Every edge starts with weight `0`. In undirected
	/// mode each line yields a mirrored pair.
	pub fn parse(input: &str, directed: bool) -> Result<Self, GraphInputError> {
		let mut lines = input.trim().lines();
		let header = lines
			.next()
			.filter(|l| !l.trim().is_empty())
			.ok_or(GraphInputError::EmptyInput)?;
		let (node_count, edge_count) =
			parse_pair(header).ok_or_else(|| GraphInputError::InvalidHeader {
				line: header.trim().to_string(),
			})?;

		let mut topology = Self::new(directed);
		topology.nodes = (0..node_count).map(|i| i.to_string()).collect();

		for i in 0..edge_count {
			let line_no = i + 2;
			let line = lines.next().ok_or(GraphInputError::MissingEdges {
				expected: edge_count,
				found: i,
			})?;
			let (source, target) =
				parse_pair(line).ok_or_else(|| GraphInputError::InvalidEdge {
					line_no,
					line: line.trim().to_string(),
				})?;
			if let Some(node) = [source, target].into_iter().find(|&n| n >= node_count) {
				return Err(GraphInputError::NodeOutOfRange {
					line_no,
					node,
					count: node_count,
				});
			}
			topology.push_connection(&source.to_string(), &target.to_string());
		}

		info!(
			"graph loaded: {} nodes, {} edge records ({})",
			topology.nodes.len(),
			topology.edges.len(),
			if directed { "directed" } else { "undirected" }
		);
		Ok(topology)
	}

	/// Exact directed lookup.
	pub fn find_edge(&self, source: &str, target: &str) -> Option<&Edge> {
		self.edges
			.iter()
			.find(|e| e.source == source && e.target == target)
	}

	/// The other half of `edge`'s undirected pair, if any.
	pub fn mirror_of(&self, edge: &Edge) -> Option<&Edge> {
		if self.directed {
			return None;
		}
		let pair = edge.undirected_pair_id.as_deref()?;
		self.edges
			.iter()
			.find(|e| e.id != edge.id && e.undirected_pair_id.as_deref() == Some(pair))
	}

	/// Ids of every edge a command on `source → target` must touch: the
	/// edge itself, then its mirror. Empty when there is no such edge.
	pub fn resolve_pair(&self, source: &str, target: &str) -> Vec<String> {
		let Some(edge) = self.find_edge(source, target) else {
			return Vec::new();
		};
		let mut ids = vec![edge.id.clone()];
		if let Some(mirror) = self.mirror_of(edge) {
			ids.push(mirror.id.clone());
		}
		ids
	}

	/// Switch modes. Existing edges keep their pair ids; mirroring is only
	/// resolved while undirected.
	pub fn set_directed(&mut self, directed: bool) {
		self.directed = directed;
	}

	/// Add a node with the smallest unused non-negative integer id.
	pub fn add_node(&mut self) -> String {
		let taken: BTreeSet<usize> = self.nodes.iter().filter_map(|n| n.parse().ok()).collect();
		let id = (0..).find(|i| !taken.contains(i)).unwrap_or_default().to_string();
		self.nodes.push(id.clone());
		id
	}

	/// Remove a node and every edge touching it. Returns false if absent.
	pub fn remove_node(&mut self, id: &str) -> bool {
		let before = self.nodes.len();
		self.nodes.retain(|n| n != id);
		if self.nodes.len() == before {
			return false;
		}
		self.edges.retain(|e| e.source != id && e.target != id);
		true
	}

	/// Connect two existing nodes, returning the ids of the created records.
	///
	/// Self-loops and already present connections create nothing.
	pub fn connect(&mut self, source: &str, target: &str) -> Vec<String> {
		let known = |id: &str| self.nodes.iter().any(|n| n == id);
		if source == target
			|| !known(source)
			|| !known(target)
			|| self.find_edge(source, target).is_some()
		{
			return Vec::new();
		}
		self.push_connection(source, target)
	}

	/// Remove the connection `source → target`, its mirror included while
	/// undirected. Returns the ids of the removed records.
	pub fn disconnect(&mut self, source: &str, target: &str) -> Vec<String> {
		let ids = self.resolve_pair(source, target);
		self.edges.retain(|e| !ids.contains(&e.id));
		ids
	}

	fn push_connection(&mut self, source: &str, target: &str) -> Vec<String> {
		let count = if self.directed { 1 } else { 2 };
		let ids = self.free_edge_ids(count);
		let pair = (!self.directed).then(|| pair_id(source, target));
		let ends = [(source, target), (target, source)];
		for (id, (from, to)) in ids.iter().zip(ends) {
			self.edges.push(Edge {
				id: id.clone(),
				source: from.to_string(),
				target: to.to_string(),
				weight: 0.0,
				undirected_pair_id: pair.clone(),
			});
		}
		ids
	}

	fn free_edge_ids(&self, count: usize) -> Vec<String> {
		let taken: BTreeSet<usize> = self
			.edges
			.iter()
			.filter_map(|e| e.id.strip_prefix("edge-")?.parse().ok())
			.collect();
		(0..)
			.filter(|k| !taken.contains(k))
			.take(count)
			.map(|k| format!("edge-{k}"))
			.collect()
	}
}
