//! Log text → ordered command sequence.
//!
//! One [`Command`] is produced per input line, blank lines included. Each
//! command is decoded into a typed [`Op`] up front; lines that cannot be
//! decoded keep their [`CommandError`] and fail only when playback reaches
//! them.

use super::error::CommandError;

/// A decoded log instruction.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
	/// Move the visit pointer onto `node`.
	Visit { node: String },
	/// Paint a node.
	ColorNode { node: String, color: String },
	/// Paint the edge `source → target` (and its mirror).
	ColorEdge {
		source: String,
		target: String,
		color: String,
	},
	/// Outline a node.
	HighlightNode { node: String },
	/// Remove the outline and every transient marker from a node.
	UnhighlightNode { node: String },
	/// Highlight the edge `source → target` (and its mirror).
	HighlightEdge { source: String, target: String },
	/// Undo [`Op::HighlightEdge`].
	UnhighlightEdge { source: String, target: String },
	/// Wipe every node and edge marker.
	ClearHighlights,
	/// Mark a node as visited.
	MarkVisited { node: String },
	/// Mark a node as queued.
	MarkInQueue { node: String },
	/// Replace the node's display text.
	SetNodeId { node: String, label: String },
	/// Override the weight of `source → target` (and its mirror).
	SetEdgeWeight {
		source: String,
		target: String,
		weight: f64,
	},
	/// Append an info message.
	Log { text: String },
	/// Empty the message list.
	ClearLog,
}

/// One line of a playback log.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
	/// First token of the line, empty for blank lines.
	pub name: String,
	/// Remaining whitespace-separated tokens.
	pub args: Vec<String>,
	/// The trimmed line, used in error reports.
	pub raw: String,
	/// Decoded instruction, or the reason the line cannot run.
	pub op: Result<Op, CommandError>,
}

impl Command {
	/// Tokenize and decode a single log line.
	pub fn parse(line: &str) -> Self {
		let raw = line.trim().to_string();
		let mut tokens = raw.split_whitespace().map(str::to_string);
		let name = tokens.next().unwrap_or_default();
		let args: Vec<String> = tokens.collect();
		let op = decode(&name, &args, &raw);
		Self {
			name,
			args,
			raw,
			op,
		}
	}
}

/// Split `text` into lines and parse every one of them, in order.
pub fn parse_log(text: &str) -> Vec<Command> {
	text.split('\n').map(Command::parse).collect()
}

fn decode(name: &str, args: &[String], raw: &str) -> Result<Op, CommandError> {
	let arg = |position: usize| {
		args.get(position - 1)
			.cloned()
			.ok_or_else(|| CommandError::MissingArgument {
				command: name.to_string(),
				position,
			})
	};

	let op = match name {
		"visit" => Op::Visit { node: arg(1)? },
		"colorNode" => Op::ColorNode {
			node: arg(1)?,
			color: arg(2)?,
		},
		"colorEdge" => Op::ColorEdge {
			source: arg(1)?,
			target: arg(2)?,
			color: arg(3)?,
		},
		"highlightNode" => Op::HighlightNode { node: arg(1)? },
		"unhighlightNode" => Op::UnhighlightNode { node: arg(1)? },
		"highlightEdge" => Op::HighlightEdge {
			source: arg(1)?,
			target: arg(2)?,
		},
		"unhighlightEdge" => Op::UnhighlightEdge {
			source: arg(1)?,
			target: arg(2)?,
		},
		"clearHighlights" => Op::ClearHighlights,
		"markVisited" => Op::MarkVisited { node: arg(1)? },
		"markInQueue" => Op::MarkInQueue { node: arg(1)? },
		"setNodeId" => {
			let node = arg(1)?;
			arg(2)?;
			Op::SetNodeId {
				node,
				label: args[1..].join(" "),
			}
		}
		"setEdgeWeight" => Op::SetEdgeWeight {
			source: arg(1)?,
			target: arg(2)?,
			weight: lenient_number(&arg(3)?),
		},
		"log" => Op::Log {
			text: args.join(" "),
		},
		"clearLog" => Op::ClearLog,
		_ => {
			return Err(CommandError::Unrecognized {
				raw: raw.to_string(),
			});
		}
	};
	Ok(op)
}

/// Longest numeric prefix of `token`, or `0` when there is none.
fn lenient_number(token: &str) -> f64 {
	let value = (1..=token.len())
		.rev()
		.filter(|&end| token.is_char_boundary(end))
		.find_map(|end| token[..end].parse::<f64>().ok())
		.unwrap_or(0.0);
	if value.is_finite() { value } else { 0.0 }
}
