use leptos::prelude::*;

use crate::components::graph_canvas::GraphCanvas;
use crate::components::input_panel::InputPanel;
use crate::components::log_panel::LogPanel;
use crate::components::playback_controls::{PlaybackControls, use_auto_advance};
use crate::playback::{Phase, PlaybackConfig, PlaybackController};

/// Player page: canvas, inputs, transport and message panel.
#[component]
pub fn Home() -> impl IntoView {
	let controller = RwSignal::new(PlaybackController::new(PlaybackConfig::default()));
	let weighted = RwSignal::new(controller.with_untracked(|c| c.config().weighted));
	use_auto_advance(controller);

	// Rendering only sees snapshots; it never writes back.
	let topology = Memo::new(move |_| controller.with(|c| c.topology().clone()));
	let visuals = Memo::new(move |_| controller.with(|c| c.state().clone()));
	let messages = Memo::new(move |_| visuals.with(|v| v.messages.clone()));
	let has_log = Memo::new(move |_| controller.with(|c| c.phase() != Phase::Idle));

	view! {
		<div class="fullscreen-graph">
			<GraphCanvas topology=topology visuals=visuals weighted=weighted />
			<div class="graph-overlay">
				<h1>"Graph Trace Player"</h1>
				<p class="subtitle">"Load a graph and a log, then step or run. Scroll to zoom. Drag to pan."</p>
			</div>
			<InputPanel controller=controller weighted=weighted />
			<Show when=move || has_log.get()>
				<PlaybackControls controller=controller />
			</Show>
			<LogPanel messages=messages />
		</div>
	}
}
