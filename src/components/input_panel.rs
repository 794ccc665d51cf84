use leptos::prelude::*;

use crate::playback::PlaybackController;

/// Graph and log text entry, mode toggles and "clear all".
#[component]
pub fn InputPanel(
	controller: RwSignal<PlaybackController>,
	weighted: RwSignal<bool>,
) -> impl IntoView {
	let graph_text = RwSignal::new(String::new());
	let log_text = RwSignal::new(controller.with_untracked(|c| c.log_text()));
	let graph_error = RwSignal::new(None::<String>);
	let directed = Memo::new(move |_| controller.with(|c| c.topology().directed));

	let load_graph = move |_| {
		let input = graph_text.get_untracked();
		let result = controller.try_update(|c| c.load_graph(&input));
		graph_error.set(match result {
			Some(Err(err)) => Some(err.to_string()),
			_ => None,
		});
	};

	let load_log = move |_| {
		let text = log_text.get_untracked();
		controller.update(|c| c.load_log(&text));
	};

	let clear_all = move |_| {
		controller.update(|c| c.clear_all());
		graph_text.set(String::new());
		log_text.set(String::new());
		graph_error.set(None);
	};

	view! {
		<div class="input-panel">
			<label>
				<input
					type="checkbox"
					prop:checked=move || directed.get()
					on:change=move |ev| {
						let checked = event_target_checked(&ev);
						controller.update(|c| c.topology_mut().set_directed(checked));
					}
				/>
				"Directed"
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || weighted.get()
					on:change=move |ev| weighted.set(event_target_checked(&ev))
				/>
				"Weighted"
			</label>

			<textarea
				class="graph-input"
				placeholder="3 2\n0 1\n1 2"
				prop:value=move || graph_text.get()
				on:input=move |ev| graph_text.set(event_target_value(&ev))
			/>
			<button class="xy-theme__button" on:click=load_graph>
				"Load graph"
			</button>
			{move || graph_error.get().map(|err| view! { <p class="log-error">{err}</p> })}

			<textarea
				class="log-input"
				placeholder="markInQueue 0\nvisit 0\nmarkVisited 0"
				prop:value=move || log_text.get()
				on:input=move |ev| log_text.set(event_target_value(&ev))
			/>
			<button class="xy-theme__button" on:click=load_log>
				"Load log"
			</button>

			<button class="xy-theme__button" on:click=clear_all>
				"Clear all"
			</button>
		</div>
	}
}
