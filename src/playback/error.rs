use thiserror::Error;

/// Why a log line cannot be executed.
///
/// Detected when the log is parsed, reported only when playback reaches the
/// offending line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
	/// The command name is not part of the command table (or the line was blank).
	#[error("unrecognized command \"{raw}\"")]
	Unrecognized {
		/// The trimmed source line.
		raw: String,
	},
	/// A required argument is absent.
	#[error("`{command}` is missing argument #{position}")]
	MissingArgument {
		/// Command name.
		command: String,
		/// One-based index of the first missing argument.
		position: usize,
	},
}

/// Failure to read the `n m` + edge-lines graph format.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphInputError {
	/// Nothing but whitespace.
	#[error("graph input is empty")]
	EmptyInput,
	/// First line is not two non-negative integers.
	#[error("expected `<nodes> <edges>` header, found \"{line}\"")]
	InvalidHeader {
		/// The offending header line.
		line: String,
	},
	/// An edge line is not two non-negative integers.
	#[error("line {line_no}: expected `<source> <target>`, found \"{line}\"")]
	InvalidEdge {
		/// One-based line number in the input.
		line_no: usize,
		/// The offending line.
		line: String,
	},
	/// An endpoint is not below the declared node count.
	#[error("line {line_no}: node {node} is out of range for {count} nodes")]
	NodeOutOfRange {
		/// One-based line number in the input.
		line_no: usize,
		/// The endpoint that was read.
		node: usize,
		/// Declared node count.
		count: usize,
	},
	/// Fewer edge lines than the header announced.
	#[error("header announces {expected} edges but only {found} were given")]
	MissingEdges {
		/// Edge count from the header.
		expected: usize,
		/// Edge lines actually present.
		found: usize,
	},
}

/// Rejected playback controller input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum PlaybackError {
	/// Speeds must be finite and strictly positive.
	#[error("playback speed must be a positive number, got {0}")]
	InvalidSpeed(f64),
}
