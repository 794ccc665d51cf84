use leptos::prelude::*;

use crate::playback::LogMessage;

/// Message list fed by `log` commands and playback errors.
#[component]
pub fn LogPanel(#[prop(into)] messages: Signal<Vec<LogMessage>>) -> impl IntoView {
	view! {
		<div class="log-panel">
			{move || {
				messages
					.get()
					.into_iter()
					.map(|msg| view! { <div class=msg.kind.css_class()>{msg.text}</div> })
					.collect_view()
			}}
		</div>
	}
}
