//! Cursor, pause/resume, speed and timed auto-advance over a parsed log.
//!
//! The controller never owns a timer. It hands out [`Tick`]s carrying a
//! token; the host waits `delay` and calls [`PlaybackController::on_tick`]
//! with that token. Any change to the commands, cursor, speed or pause flag
//! issues a new token, so a wait armed before the change is ignored when it
//! fires.

use std::time::Duration;

use log::{debug, info, warn};

use super::command::{Command, parse_log};
use super::config::{PlaybackConfig, tick_interval};
use super::error::{GraphInputError, PlaybackError};
use super::interpreter::{Outcome, apply};
use super::model::VisualState;
use super::topology::Topology;

/// Coarse playback phase, for the controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// No log loaded.
	Idle,
	/// Log loaded, waiting for input.
	Paused,
	/// Auto-advancing.
	Playing,
	/// Every command has been applied.
	Finished,
}

/// What a single forward step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
	/// One command was applied.
	Advanced,
	/// The cursor was already past the last command.
	AtEnd,
	/// The command was rejected and the session was torn down.
	Aborted,
}

/// A scheduled auto-advance request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
	/// Must be passed back to [`PlaybackController::on_tick`].
	pub token: u64,
	/// How long to wait before firing.
	pub delay: Duration,
}

/// Playback state machine over a log and a topology.
#[derive(Clone, Debug)]
pub struct PlaybackController {
	config: PlaybackConfig,
	topology: Topology,
	commands: Vec<Command>,
	cursor: usize,
	paused: bool,
	speed: f64,
	state: VisualState,
	token: u64,
}

impl Default for PlaybackController {
	fn default() -> Self {
		Self::new(PlaybackConfig::default())
	}
}

impl PlaybackController {
	/// An idle controller with an empty graph.
	pub fn new(config: PlaybackConfig) -> Self {
		Self {
			topology: Topology::new(config.directed),
			commands: Vec::new(),
			cursor: 0,
			paused: true,
			speed: config.default_speed,
			state: VisualState::default(),
			token: 0,
			config,
		}
	}

	/// Active configuration.
	pub fn config(&self) -> &PlaybackConfig {
		&self.config
	}

	/// Graph the edge commands resolve against.
	pub fn topology(&self) -> &Topology {
		&self.topology
	}

	/// Loaded commands.
	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	/// Number of commands applied so far.
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Whether auto-advance is stopped.
	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Steps per second.
	pub fn speed(&self) -> f64 {
		self.speed
	}

	/// Current snapshot.
	pub fn state(&self) -> &VisualState {
		&self.state
	}

	/// Current phase.
	pub fn phase(&self) -> Phase {
		if self.commands.is_empty() {
			Phase::Idle
		} else if !self.paused {
			Phase::Playing
		} else if self.cursor == self.commands.len() {
			Phase::Finished
		} else {
			Phase::Paused
		}
	}

	/// The loaded log, one raw line per command.
	pub fn log_text(&self) -> String {
		self.commands
			.iter()
			.map(|c| c.raw.as_str())
			.collect::<Vec<_>>()
			.join("\n")
	}

	/// Replace the log and start over, paused.
	pub fn load_log(&mut self, text: &str) {
		self.commands = parse_log(text);
		self.rewind();
		self.paused = true;
		self.invalidate();
		info!("log loaded: {} commands", self.commands.len());
	}

	/// Replace the topology. Playback position and state are kept.
	pub fn set_topology(&mut self, topology: Topology) {
		self.topology = topology;
	}

	/// Parse graph input in the current directed mode and install it.
	pub fn load_graph(&mut self, input: &str) -> Result<(), GraphInputError> {
		let topology = Topology::parse(input, self.topology.directed)?;
		self.set_topology(topology);
		Ok(())
	}

	/// Edit the topology in place.
	pub fn topology_mut(&mut self) -> &mut Topology {
		&mut self.topology
	}

	/// Apply the command under the cursor.
	///
	/// A rejected command ends the session: the log is dropped, the cursor
	/// returns to 0 and the snapshot is replaced by the empty model holding
	/// only the error entry. Earlier markers and messages do not survive.
	pub fn step_forward(&mut self) -> StepOutcome {
		let Some(command) = self.commands.get(self.cursor) else {
			return StepOutcome::AtEnd;
		};
		match apply(&self.state, command, &self.topology, &self.config) {
			Outcome::Applied(next) => {
				debug!("step {}: {}", self.cursor, command.raw);
				self.state = next;
				self.cursor += 1;
				if self.cursor == self.commands.len() {
					self.paused = true;
				}
				self.invalidate();
				StepOutcome::Advanced
			}
			Outcome::Aborted { state, error } => {
				warn!("playback aborted at step {}: {error}", self.cursor);
				self.commands.clear();
				self.cursor = 0;
				self.paused = true;
				self.state = VisualState {
					messages: state.messages.last().cloned().into_iter().collect(),
					..Default::default()
				};
				self.invalidate();
				StepOutcome::Aborted
			}
		}
	}

	/// Move back one command by replaying everything before it from scratch.
	///
	/// Returns false at the start of the log.
	pub fn step_backward(&mut self) -> bool {
		if self.cursor == 0 {
			return false;
		}
		let target = self.cursor - 1;
		self.state = self.replay(target);
		self.cursor = target;
		self.invalidate();
		debug!("stepped back to {target} (replayed {target} commands)");
		true
	}

	/// State after the first `count` commands, rebuilt from empty.
	pub fn replay(&self, count: usize) -> VisualState {
		self.commands[..count.min(self.commands.len())]
			.iter()
			.fold(VisualState::default(), |state, command| {
				match apply(&state, command, &self.topology, &self.config) {
					Outcome::Applied(next) => next,
					Outcome::Aborted { state, .. } => state,
				}
			})
	}

	/// Start auto-advancing, rewinding first if the log already ran to the end.
	pub fn play(&mut self) {
		if self.commands.is_empty() {
			return;
		}
		if self.cursor >= self.commands.len() {
			self.rewind();
		}
		self.paused = false;
		self.invalidate();
		info!("playing from step {} at {}x", self.cursor, self.speed);
	}

	/// Stop auto-advancing.
	pub fn pause(&mut self) {
		self.paused = true;
		self.invalidate();
	}

	/// [`play`](Self::play) when paused, [`pause`](Self::pause) otherwise.
	pub fn toggle(&mut self) {
		if self.paused {
			self.play();
		} else {
			self.pause();
		}
	}

	/// Back to step 0 with an empty state, paused.
	pub fn reset(&mut self) {
		self.rewind();
		self.paused = true;
		self.invalidate();
		info!("playback reset");
	}

	/// Drop the log, the graph and every marker.
	pub fn clear_all(&mut self) {
		self.commands.clear();
		self.topology = Topology::new(self.config.directed);
		self.rewind();
		self.paused = true;
		self.invalidate();
		info!("cleared graph and log");
	}

	/// Change the auto-advance rate. The pending wait, if any, is replaced.
	///
	/// Returns the speed actually in effect after clamping to the configured range.
	pub fn set_speed(&mut self, speed: f64) -> Result<f64, PlaybackError> {
		if !speed.is_finite() || speed <= 0.0 {
			return Err(PlaybackError::InvalidSpeed(speed));
		}
		self.speed = self.config.clamp_speed(speed);
		self.invalidate();
		Ok(self.speed)
	}

	/// The wait the host should arm now, if auto-advance is running.
	pub fn next_tick(&self) -> Option<Tick> {
		if self.paused || self.cursor >= self.commands.len() {
			return None;
		}
		Some(Tick {
			token: self.token,
			delay: tick_interval(self.speed),
		})
	}

	/// Fire a wait armed from [`next_tick`](Self::next_tick).
	///
	/// Returns `None` without touching anything if the token is stale or
	/// playback is paused.
	pub fn on_tick(&mut self, token: u64) -> Option<StepOutcome> {
		if token != self.token || self.paused {
			debug!("ignoring stale tick {token} (current {})", self.token);
			return None;
		}
		Some(self.step_forward())
	}

	fn rewind(&mut self) {
		self.cursor = 0;
		self.state = VisualState::default();
	}

	fn invalidate(&mut self) {
		self.token = self.token.wrapping_add(1);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::playback::model::{LogKind, NodeState};

	fn loaded(log: &str) -> PlaybackController {
		let mut ctl = PlaybackController::default();
		ctl.load_graph("3 2\n0 1\n1 2").unwrap();
		ctl.load_log(log);
		ctl
	}

	#[test]
	fn starts_idle() {
		let ctl = PlaybackController::default();
		assert_eq!(ctl.phase(), Phase::Idle);
		assert!(ctl.is_paused());
		assert_eq!(ctl.speed(), 1.0);
		assert_eq!(ctl.next_tick(), None);
	}

	#[test]
	fn load_log_resets_everything() {
		let mut ctl = loaded("log a\nvisit 0");
		ctl.step_forward();
		ctl.play();
		ctl.load_log("visit 1");
		assert_eq!(ctl.cursor(), 0);
		assert!(ctl.is_paused());
		assert_eq!(ctl.state(), &VisualState::default());
		assert_eq!(ctl.log_text(), "visit 1");
		assert_eq!(ctl.phase(), Phase::Paused);
	}

	#[test]
	fn step_forward_stops_at_end() {
		let mut ctl = loaded("visit 0\nvisit 1");
		assert_eq!(ctl.step_forward(), StepOutcome::Advanced);
		assert_eq!(ctl.step_forward(), StepOutcome::Advanced);
		assert_eq!(ctl.step_forward(), StepOutcome::AtEnd);
		assert_eq!(ctl.cursor(), 2);
		assert_eq!(ctl.phase(), Phase::Finished);
	}

	#[test]
	fn step_backward_replays_prefix() {
		let mut ctl = loaded("colorNode 0 red\nlog hi\ncolorNode 0 blue");
		for _ in 0..3 {
			ctl.step_forward();
		}
		assert!(ctl.step_backward());
		assert_eq!(ctl.cursor(), 2);
		assert_eq!(ctl.state().node("0").color.as_deref(), Some("red"));
		assert_eq!(ctl.state().messages.len(), 1);

		assert!(ctl.step_backward());
		assert!(ctl.step_backward());
		assert_eq!(ctl.state(), &VisualState::default());
		assert!(!ctl.step_backward());
	}

	#[test]
	fn backward_replay_undoes_weight_changes() {
		let mut ctl = loaded("setEdgeWeight 0 1 5");
		ctl.step_forward();
		assert_eq!(ctl.state().edge("edge-1").weight, Some(5.0));
		ctl.step_backward();
		assert_eq!(ctl.state().edge("edge-1").weight, None);
	}

	#[test]
	fn play_at_end_rewinds() {
		let mut ctl = loaded("log a");
		ctl.step_forward();
		ctl.play();
		assert_eq!(ctl.cursor(), 0);
		assert!(ctl.state().messages.is_empty());
		assert!(!ctl.is_paused());
	}

	#[test]
	fn reset_rewinds_and_pauses() {
		let mut ctl = loaded("log a\nvisit 0\nvisit 1");
		ctl.step_forward();
		ctl.step_forward();
		ctl.play();
		ctl.reset();
		assert_eq!(ctl.cursor(), 0);
		assert!(ctl.is_paused());
		assert_eq!(ctl.state(), &VisualState::default());
		assert_eq!(ctl.commands().len(), 3);
		assert_eq!(ctl.phase(), Phase::Paused);
	}

	#[test]
	fn play_without_log_does_nothing() {
		let mut ctl = PlaybackController::default();
		ctl.play();
		assert!(ctl.is_paused());
	}

	#[test]
	fn ticks_advance_until_the_end() {
		let mut ctl = loaded("visit 0\nvisit 1");
		ctl.play();
		let tick = ctl.next_tick().unwrap();
		assert_eq!(tick.delay, Duration::from_secs(1));
		assert_eq!(ctl.on_tick(tick.token), Some(StepOutcome::Advanced));

		let tick = ctl.next_tick().unwrap();
		assert_eq!(ctl.on_tick(tick.token), Some(StepOutcome::Advanced));
		assert!(ctl.is_paused());
		assert_eq!(ctl.next_tick(), None);
	}

	#[test]
	fn stale_ticks_are_ignored() {
		let mut ctl = loaded("visit 0\nvisit 1\nvisit 2");
		ctl.play();
		let first = ctl.next_tick().unwrap();

		ctl.set_speed(4.0).unwrap();
		let second = ctl.next_tick().unwrap();
		assert_ne!(first.token, second.token);
		assert_eq!(second.delay, Duration::from_millis(250));
		assert_eq!(ctl.on_tick(first.token), None);
		assert_eq!(ctl.cursor(), 0);

		ctl.step_forward();
		assert_eq!(ctl.on_tick(second.token), None);
		assert_eq!(ctl.cursor(), 1);

		let third = ctl.next_tick().unwrap();
		ctl.pause();
		assert_eq!(ctl.on_tick(third.token), None);

		let fourth = ctl.next_tick();
		assert_eq!(fourth, None);
		ctl.play();
		let fifth = ctl.next_tick().unwrap();
		ctl.load_log("visit 0");
		assert_eq!(ctl.on_tick(fifth.token), None);
	}

	#[test]
	fn invalid_speeds_are_rejected() {
		let mut ctl = PlaybackController::default();
		assert_eq!(ctl.set_speed(0.0), Err(PlaybackError::InvalidSpeed(0.0)));
		assert!(ctl.set_speed(f64::NAN).is_err());
		assert_eq!(ctl.set_speed(20.0), Ok(10.0));
		assert_eq!(ctl.speed(), 10.0);
	}

	#[test]
	fn abort_tears_down_the_session() {
		let mut ctl = loaded("visit 0\nbogus\nvisit 1");
		ctl.play();
		let tick = ctl.next_tick().unwrap();
		ctl.on_tick(tick.token);
		let tick = ctl.next_tick().unwrap();
		assert_eq!(ctl.on_tick(tick.token), Some(StepOutcome::Aborted));

		assert_eq!(ctl.cursor(), 0);
		assert!(ctl.is_paused());
		assert!(ctl.commands().is_empty());
		assert_eq!(ctl.phase(), Phase::Idle);
		assert_eq!(ctl.next_tick(), None);
		assert_eq!(ctl.state().messages.len(), 1);
		assert_eq!(ctl.state().messages[0].kind, LogKind::Error);
		assert!(ctl.state().nodes.is_empty());
		assert_eq!(ctl.step_forward(), StepOutcome::AtEnd);
	}

	#[test]
	fn topology_edits_apply_to_later_commands() {
		let mut ctl = loaded("colorEdge 0 2 red");
		let ids = ctl.topology_mut().connect("0", "2");
		assert_eq!(ids.len(), 2);
		ctl.step_forward();
		for id in ids {
			assert_eq!(ctl.state().edge(&id).color.as_deref(), Some("red"));
		}
	}

	#[test]
	fn abort_discards_earlier_messages_and_markers() {
		let mut ctl = loaded("log hello\ncolorNode 0 red\nbogus");
		for _ in 0..3 {
			ctl.step_forward();
		}
		let messages = &ctl.state().messages;
		assert_eq!(messages.len(), 1);
		assert_eq!(messages[0].text, "Error: unrecognized command \"bogus\"");
		assert_eq!(ctl.state().node("0"), NodeState::default());
	}

	#[test]
	fn disconnected_edges_are_skipped_silently() {
		let mut ctl = loaded("colorEdge 0 1 red\nlog done");
		let ids = ctl.topology_mut().disconnect("0", "1");
		assert_eq!(ids, vec!["edge-0", "edge-1"]);
		assert_eq!(ctl.step_forward(), StepOutcome::Advanced);
		for id in &ids {
			assert_eq!(ctl.state().edge(id).color, None);
		}
		assert!(ctl.state().edges.is_empty());
		assert_eq!(ctl.step_forward(), StepOutcome::Advanced);
		assert_eq!(ctl.phase(), Phase::Finished);
	}

	#[test]
	fn clear_all_returns_to_idle() {
		let mut ctl = loaded("visit 0");
		ctl.step_forward();
		ctl.clear_all();
		assert_eq!(ctl.phase(), Phase::Idle);
		assert!(ctl.topology().nodes.is_empty());
		assert_eq!(ctl.state(), &VisualState::default());
	}

	#[test]
	fn graph_errors_leave_topology_untouched() {
		let mut ctl = loaded("");
		assert!(ctl.load_graph("2 1\n0 5").is_err());
		assert_eq!(ctl.topology().nodes.len(), 3);
	}
}
