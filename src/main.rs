//! Browser entry point: mounts the player.
#![allow(unused_crate_dependencies)]

use graph_trace_player::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
