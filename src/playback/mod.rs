//! Command-driven playback of graph algorithm traces.
//!
//! A log is parsed into [`Command`]s; [`apply`] folds them one at a time into
//! a [`VisualState`]; [`PlaybackController`] owns the cursor and decides when
//! to fold. The state after `k` steps depends only on the first `k` commands
//! and the topology, which is what lets stepping backward be a plain replay.

mod command;
mod config;
mod controller;
mod error;
mod interpreter;
mod model;
mod topology;

pub use command::{Command, Op, parse_log};
pub use config::{Accents, PlaybackConfig, tick_interval};
pub use controller::{Phase, PlaybackController, StepOutcome, Tick};
pub use error::{CommandError, GraphInputError, PlaybackError};
pub use interpreter::{Outcome, apply, fault_message};
pub use model::{EdgeState, LogKind, LogMessage, NodeState, VisualState};
pub use topology::{Edge, Topology};
