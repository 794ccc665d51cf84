//! Applies one [`Command`] to a [`VisualState`].
//!
//! [`apply`] never mutates its input: it returns the next snapshot, so a
//! renderer holding the previous one always sees a complete state.

use super::command::{Command, Op};
use super::config::PlaybackConfig;
use super::error::CommandError;
use super::model::{LogMessage, VisualState};
use super::topology::Topology;

/// Result of applying one command.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	/// The command ran; this is the next state.
	Applied(VisualState),
	/// The command cannot run. `state` is the input plus the error message;
	/// the session must stop here.
	Aborted {
		/// Input state with the error entry appended.
		state: VisualState,
		/// Why the command was rejected.
		error: CommandError,
	},
}

impl Outcome {
	/// The resulting snapshot, whichever way the command went.
	pub fn state(&self) -> &VisualState {
		match self {
			Self::Applied(state) | Self::Aborted { state, .. } => state,
		}
	}
}

/// The message surfaced when `command` aborts playback.
pub fn fault_message(config: &PlaybackConfig, command: &Command, error: &CommandError) -> LogMessage {
	let prefix = &config.error_prefix;
	match error {
		CommandError::Unrecognized { raw } => {
			LogMessage::error(format!("{prefix}: unrecognized command \"{raw}\""))
		}
		CommandError::MissingArgument { .. } => {
			LogMessage::error(format!("{prefix}: {error} in \"{}\"", command.raw))
		}
	}
}

/// Apply `command` to `state` against the current `topology`.
pub fn apply(
	state: &VisualState,
	command: &Command,
	topology: &Topology,
	config: &PlaybackConfig,
) -> Outcome {
	let op = match &command.op {
		Ok(op) => op,
		Err(error) => {
			let mut next = state.clone();
			next.messages.push(fault_message(config, command, error));
			return Outcome::Aborted {
				state: next,
				error: error.clone(),
			};
		}
	};

	let accents = &config.accents;
	let mut next = state.clone();
	match op {
		Op::Visit { node } => {
			for prev in next.nodes.values_mut().filter(|n| n.visit) {
				prev.visit = false;
				prev.color = prev.saved_color.take();
				prev.visited = prev.saved_visited;
				prev.in_queue = prev.saved_in_queue;
				prev.clear_saved();
			}
			let n = next.node_mut(node);
			n.saved_color = n.color.take();
			n.saved_visited = std::mem::take(&mut n.visited);
			n.saved_in_queue = std::mem::take(&mut n.in_queue);
			n.visit = true;
		}
		Op::ColorNode { node, color } => {
			let n = next.node_mut(node);
			let (_, visited, in_queue) = n.persistent();
			n.color = Some(color.clone());
			n.visit = false;
			n.visited = visited;
			n.in_queue = in_queue;
			n.saved_color = None;
			n.saved_visited = visited;
			n.saved_in_queue = in_queue;
		}
		Op::MarkVisited { node } => {
			let n = next.node_mut(node);
			let (_, _, in_queue) = n.persistent();
			n.visit = false;
			n.visited = true;
			n.in_queue = in_queue;
			n.color = Some(accents.visited.clone());
			n.saved_color = n.color.clone();
			n.saved_visited = true;
			n.saved_in_queue = in_queue;
		}
		Op::MarkInQueue { node } => {
			let n = next.node_mut(node);
			let (_, visited, _) = n.persistent();
			n.visit = false;
			n.visited = visited;
			n.in_queue = true;
			n.color = Some(accents.queued.clone());
			n.saved_color = n.color.clone();
			n.saved_visited = visited;
			n.saved_in_queue = true;
		}
		Op::HighlightNode { node } => next.node_mut(node).highlight = true,
		Op::UnhighlightNode { node } => {
			let n = next.node_mut(node);
			n.highlight = false;
			n.clear_markers();
		}
		Op::ClearHighlights => {
			for n in next.nodes.values_mut() {
				n.highlight = false;
				n.clear_markers();
			}
			for e in next.edges.values_mut() {
				e.highlight = false;
				e.color = None;
			}
		}
		Op::SetNodeId { node, label } => next.node_mut(node).text = Some(label.clone()),
		Op::ColorEdge {
			source,
			target,
			color,
		} => {
			for id in topology.resolve_pair(source, target) {
				next.edge_mut(&id).color = Some(color.clone());
			}
		}
		Op::HighlightEdge { source, target } => {
			for id in topology.resolve_pair(source, target) {
				let e = next.edge_mut(&id);
				e.highlight = true;
				e.color = Some(accents.highlight.clone());
			}
		}
		Op::UnhighlightEdge { source, target } => {
			for id in topology.resolve_pair(source, target) {
				let e = next.edge_mut(&id);
				e.highlight = false;
				e.color = None;
			}
		}
		Op::SetEdgeWeight {
			source,
			target,
			weight,
		} => {
			for id in topology.resolve_pair(source, target) {
				next.edge_mut(&id).weight = Some(*weight);
			}
		}
		Op::Log { text } => next.messages.push(LogMessage::info(text.clone())),
		Op::ClearLog => next.messages.clear(),
	}
	Outcome::Applied(next)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::playback::command::parse_log;
	use crate::playback::model::{LogKind, NodeState};

	fn run(log: &str, topology: &Topology) -> VisualState {
		let config = PlaybackConfig::default();
		parse_log(log)
			.iter()
			.fold(VisualState::default(), |state, cmd| {
				match apply(&state, cmd, topology, &config) {
					Outcome::Applied(next) => next,
					Outcome::Aborted { .. } => panic!("unexpected abort on {:?}", cmd.raw),
				}
			})
	}

	fn path() -> Topology {
		Topology::parse("3 2\n0 1\n1 2", false).unwrap()
	}

	#[test]
	fn visit_moves_the_pointer_and_restores() {
		let state = run("colorNode 0 blue\nvisit 0\nvisit 1", &path());
		let zero = state.node("0");
		assert_eq!(zero.color.as_deref(), Some("blue"));
		assert!(!zero.visit);
		assert_eq!(zero.saved_color, None);

		let one = state.node("1");
		assert!(one.visit);
		assert_eq!(one.color, None);
		assert_eq!(state.nodes.values().filter(|n| n.visit).count(), 1);
	}

	#[test]
	fn revisiting_the_same_node_keeps_its_baseline() {
		let state = run("markInQueue 2\nvisit 2\nvisit 2\nvisit 0", &path());
		let two = state.node("2");
		assert!(two.in_queue);
		assert_eq!(two.color.as_deref(), Some("#ffd700"));
	}

	#[test]
	fn visit_leaves_other_colored_nodes_alone() {
		let state = run("colorNode 2 red\nvisit 0\nvisit 1", &path());
		assert_eq!(state.node("2").color.as_deref(), Some("red"));
	}

	#[test]
	fn color_node_preserves_markers() {
		let state = run("markVisited 0\nmarkInQueue 0\ncolorNode 0 pink", &path());
		let zero = state.node("0");
		assert!(zero.visited && zero.in_queue);
		assert_eq!(zero.color.as_deref(), Some("pink"));
		assert!(zero.saved_visited && zero.saved_in_queue);
		assert_eq!(zero.saved_color, None);
	}

	#[test]
	fn marks_under_the_pointer_use_saved_markers() {
		let state = run("markInQueue 0\nvisit 0\nmarkVisited 0", &path());
		let zero = state.node("0");
		assert!(!zero.visit);
		assert!(zero.visited && zero.in_queue);
		assert_eq!(zero.color.as_deref(), Some("#00cc00"));
	}

	#[test]
	fn coloring_the_pointer_node_keeps_saved_markers() {
		let state = run("markVisited 0\nvisit 0\ncolorNode 0 red", &path());
		let zero = state.node("0");
		assert!(!zero.visit);
		assert!(zero.visited);
		assert!(!zero.in_queue);
		assert_eq!(zero.color.as_deref(), Some("red"));
	}

	#[test]
	fn queueing_the_pointer_node_keeps_saved_visited() {
		let state = run("markVisited 0\nvisit 0\nmarkInQueue 0", &path());
		let zero = state.node("0");
		assert!(!zero.visit);
		assert!(zero.visited && zero.in_queue);
		assert_eq!(zero.color.as_deref(), Some("#ffd700"));

		let state = run("markVisited 0\nvisit 0\nmarkInQueue 0\nvisit 1", &path());
		let zero = state.node("0");
		assert!(zero.visited && zero.in_queue);
		assert_eq!(zero.color.as_deref(), Some("#ffd700"));
	}

	#[test]
	fn unhighlight_node_resets_transients_but_keeps_text() {
		let state = run(
			"setNodeId 1 start\nhighlightNode 1\nmarkVisited 1\nvisit 1\nunhighlightNode 1",
			&path(),
		);
		assert_eq!(
			state.node("1"),
			NodeState {
				text: Some("start".into()),
				..Default::default()
			}
		);
	}

	#[test]
	fn highlight_node_only_sets_the_flag() {
		let state = run("colorNode 0 red\nhighlightNode 0", &path());
		let zero = state.node("0");
		assert!(zero.highlight);
		assert_eq!(zero.color.as_deref(), Some("red"));
	}

	#[test]
	fn edge_commands_touch_both_mirrors() {
		let topo = path();
		let state = run("colorEdge 1 0 red\nhighlightEdge 1 2", &topo);
		assert_eq!(state.edge("edge-0"), state.edge("edge-1"));
		assert_eq!(state.edge("edge-0").color.as_deref(), Some("red"));
		assert!(state.edge("edge-2").highlight && state.edge("edge-3").highlight);
		assert_eq!(
			state.edge("edge-3").color.as_deref(),
			Some("var(--color-primary)")
		);

		let state = run("highlightEdge 1 2\nunhighlightEdge 2 1", &topo);
		assert_eq!(state.edge("edge-2"), state.edge("edge-3"));
		assert!(!state.edge("edge-2").highlight);
		assert_eq!(state.edge("edge-2").color, None);
	}

	#[test]
	fn directed_edge_commands_do_not_mirror() {
		let topo = Topology::parse("2 1\n0 1", true).unwrap();
		let state = run("colorEdge 0 1 red\ncolorEdge 1 0 blue", &topo);
		assert_eq!(state.edges.len(), 1);
		assert_eq!(state.edge("edge-0").color.as_deref(), Some("red"));
	}

	#[test]
	fn missing_edges_are_silent() {
		let state = run(
			"colorEdge 0 2 red\nhighlightEdge 5 6\nsetEdgeWeight 0 2 4",
			&path(),
		);
		assert_eq!(state, VisualState::default());
	}

	#[test]
	fn edge_weight_is_mirrored_and_lenient() {
		let topo = path();
		let state = run("setEdgeWeight 0 1 3.5", &topo);
		assert_eq!(state.edge("edge-0").weight, Some(3.5));
		assert_eq!(state.edge("edge-1").weight, Some(3.5));

		let state = run("setEdgeWeight 0 1 abc", &topo);
		assert_eq!(state.edge("edge-1").weight, Some(0.0));
		assert!(state.messages.is_empty());
	}

	#[test]
	fn clear_highlights_wipes_markers_and_is_idempotent() {
		let topo = path();
		let once = run(
			"markVisited 0\nvisit 1\nhighlightNode 2\nhighlightEdge 0 1\nsetEdgeWeight 0 1 9\nclearHighlights",
			&topo,
		);
		assert!(once.nodes.values().all(|n| *n == NodeState::default()));
		assert!(once.edges.values().all(|e| !e.highlight && e.color.is_none()));
		assert_eq!(once.edge("edge-0").weight, Some(9.0));

		let config = PlaybackConfig::default();
		let clear = parse_log("clearHighlights").remove(0);
		let twice = apply(&once, &clear, &topo, &config);
		assert_eq!(twice.state(), &once);
	}

	#[test]
	fn log_and_clear_log() {
		let state = run("log dist 0 = 4\nlog done", &path());
		assert_eq!(
			state.messages,
			vec![LogMessage::info("dist 0 = 4"), LogMessage::info("done")]
		);
		let state = run("log a\nclearLog\nlog b", &path());
		assert_eq!(state.messages, vec![LogMessage::info("b")]);
	}

	#[test]
	fn unknown_command_aborts_with_error_message() {
		let config = PlaybackConfig::default();
		let cmd = parse_log("frobnicate 1").remove(0);
		let before = VisualState::default();
		let Outcome::Aborted { state, error } = apply(&before, &cmd, &path(), &config) else {
			panic!("expected abort");
		};
		assert_eq!(
			error,
			CommandError::Unrecognized {
				raw: "frobnicate 1".into()
			}
		);
		assert_eq!(state.messages.len(), 1);
		assert_eq!(state.messages[0].kind, LogKind::Error);
		assert_eq!(
			state.messages[0].text,
			"Error: unrecognized command \"frobnicate 1\""
		);
		assert_eq!(before, VisualState::default());
	}
}
