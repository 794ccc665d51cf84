use std::time::Duration;

/// Colors the interpreter writes for the built-in node and edge markers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accents {
	/// `markVisited` node color.
	pub visited: String,
	/// `markInQueue` node color.
	pub queued: String,
	/// `highlightEdge` edge color.
	pub highlight: String,
}

impl Default for Accents {
	fn default() -> Self {
		Self {
			visited: "#00cc00".into(),
			queued: "#ffd700".into(),
			highlight: "var(--color-primary)".into(),
		}
	}
}

/// Playback tuning shared by the controller and the UI.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackConfig {
	/// Marker colors.
	pub accents: Accents,
	/// Steps per second when a log is first loaded.
	pub default_speed: f64,
	/// Lower clamp for [`set_speed`](super::PlaybackController::set_speed).
	pub min_speed: f64,
	/// Upper clamp for [`set_speed`](super::PlaybackController::set_speed).
	pub max_speed: f64,
	/// Slider granularity.
	pub speed_step: f64,
	/// Prefix of the fatal error message.
	pub error_prefix: String,
	/// Initial directed-mode toggle.
	pub directed: bool,
	/// Initial weighted-mode toggle.
	pub weighted: bool,
}

impl Default for PlaybackConfig {
	fn default() -> Self {
		Self {
			accents: Accents::default(),
			default_speed: 1.0,
			min_speed: 0.5,
			max_speed: 10.0,
			speed_step: 0.5,
			error_prefix: "Error".into(),
			directed: false,
			weighted: false,
		}
	}
}

impl PlaybackConfig {
	pub(crate) fn clamp_speed(&self, speed: f64) -> f64 {
		speed.clamp(self.min_speed, self.max_speed)
	}
}

/// Wait between two auto-advance steps at `speed` steps per second.
pub fn tick_interval(speed: f64) -> Duration {
	Duration::from_secs_f64(1.0 / speed)
}
