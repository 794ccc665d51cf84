//! Visual state produced by the interpreter and read by the renderer.

use std::collections::BTreeMap;

/// Per-node markers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeState {
	/// The node carries the visit pointer.
	pub visit: bool,
	/// Outlined.
	pub highlight: bool,
	/// Marked visited.
	pub visited: bool,
	/// Marked queued.
	pub in_queue: bool,
	/// Fill color.
	pub color: Option<String>,
	/// Display text replacing the node id.
	pub text: Option<String>,
	/// `color` stashed while the visit pointer sits on the node.
	pub saved_color: Option<String>,
	/// `visited` stashed while the visit pointer sits on the node.
	pub saved_visited: bool,
	/// `in_queue` stashed while the visit pointer sits on the node.
	pub saved_in_queue: bool,
}

impl NodeState {
	/// `(color, visited, in_queue)` as they stand outside the visit pointer.
	///
	/// While the pointer is on the node the live fields are blanked and the
	/// real values live in the `saved_*` fields.
	pub fn persistent(&self) -> (Option<&str>, bool, bool) {
		if self.visit {
			(
				self.saved_color.as_deref(),
				self.saved_visited,
				self.saved_in_queue,
			)
		} else {
			(self.color.as_deref(), self.visited, self.in_queue)
		}
	}

	pub(crate) fn clear_saved(&mut self) {
		self.saved_color = None;
		self.saved_visited = false;
		self.saved_in_queue = false;
	}

	pub(crate) fn clear_markers(&mut self) {
		self.visit = false;
		self.visited = false;
		self.in_queue = false;
		self.color = None;
		self.clear_saved();
	}
}

/// Per-edge markers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeState {
	/// Highlighted.
	pub highlight: bool,
	/// Stroke color.
	pub color: Option<String>,
	/// Weight set by the log; overrides the topology weight when present.
	pub weight: Option<f64>,
}

/// Severity of a [`LogMessage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
	/// Emitted by the `log` command.
	Info,
	/// Emitted when playback aborts.
	Error,
}

impl LogKind {
	/// CSS class used by the message panel.
	pub fn css_class(self) -> &'static str {
		match self {
			Self::Info => "log-info",
			Self::Error => "log-error",
		}
	}
}

/// A line in the message panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogMessage {
	/// Message body.
	pub text: String,
	/// Severity.
	pub kind: LogKind,
}

impl LogMessage {
	/// An info entry.
	pub fn info(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			kind: LogKind::Info,
		}
	}

	/// An error entry.
	pub fn error(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			kind: LogKind::Error,
		}
	}
}

/// Snapshot of every node/edge marker and the message list.
///
/// Nodes and edges absent from the maps are in their default state. The maps
/// are ordered so that two replays of the same prefix compare equal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualState {
	/// Node markers by node id.
	pub nodes: BTreeMap<String, NodeState>,
	/// Edge markers by edge id.
	pub edges: BTreeMap<String, EdgeState>,
	/// Message panel contents, oldest first.
	pub messages: Vec<LogMessage>,
}

impl VisualState {
	/// Markers of `id`, defaulted if the node was never touched.
	pub fn node(&self, id: &str) -> NodeState {
		self.nodes.get(id).cloned().unwrap_or_default()
	}

	/// Markers of `id`, defaulted if the edge was never touched.
	pub fn edge(&self, id: &str) -> EdgeState {
		self.edges.get(id).cloned().unwrap_or_default()
	}

	pub(crate) fn node_mut(&mut self, id: &str) -> &mut NodeState {
		self.nodes.entry(id.to_string()).or_default()
	}

	pub(crate) fn edge_mut(&mut self, id: &str) -> &mut EdgeState {
		self.edges.entry(id.to_string()).or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn persistent_reads_saved_fields_under_pointer() {
		let mut node = NodeState {
			color: Some("red".into()),
			visited: true,
			..Default::default()
		};
		assert_eq!(node.persistent(), (Some("red"), true, false));

		node.visit = true;
		node.color = None;
		node.visited = false;
		node.saved_color = Some("blue".into());
		node.saved_in_queue = true;
		assert_eq!(node.persistent(), (Some("blue"), false, true));
	}

	#[test]
	fn untouched_entries_are_default() {
		let state = VisualState::default();
		assert_eq!(state.node("7"), NodeState::default());
		assert_eq!(state.edge("edge-0"), EdgeState::default());
	}
}
