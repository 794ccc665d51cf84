use leptos::prelude::*;

use crate::playback::{Phase, PlaybackController};

/// Drive auto-advance for `controller` from browser timeouts.
///
/// One timeout is pending at most. It is cleared whenever the controller
/// issues a different [`Tick`](crate::playback::Tick) and when the owner is
/// disposed.
pub fn use_auto_advance(controller: RwSignal<PlaybackController>) {
	let pending = StoredValue::new(None::<TimeoutHandle>);
	let next_tick = Memo::new(move |_| controller.with(|c| c.next_tick()));

	Effect::new(move |_| {
		if let Some(handle) = pending.get_value() {
			handle.clear();
		}
		pending.set_value(None);

		let Some(tick) = next_tick.get() else {
			return;
		};
		let fire = move || {
			controller.update(|c| {
				c.on_tick(tick.token);
			})
		};
		match set_timeout_with_handle(fire, tick.delay) {
			Ok(handle) => pending.set_value(Some(handle)),
			Err(err) => log::error!("failed to schedule playback step: {err:?}"),
		}
	});

	on_cleanup(move || {
		if let Some(handle) = pending.get_value() {
			handle.clear();
		}
	});
}

fn phase_label(phase: Phase) -> &'static str {
	match phase {
		Phase::Idle => "idle",
		Phase::Paused => "paused",
		Phase::Playing => "playing",
		Phase::Finished => "finished",
	}
}

/// Restart / step back / run-stop / step forward / speed.
#[component]
pub fn PlaybackControls(controller: RwSignal<PlaybackController>) -> impl IntoView {
	let paused = Memo::new(move |_| controller.with(|c| c.is_paused()));
	let speed = Memo::new(move |_| controller.with(|c| c.speed()));
	let status = move || {
		controller.with(|c| {
			format!(
				"{} / {} ({})",
				c.cursor(),
				c.commands().len(),
				phase_label(c.phase())
			)
		})
	};
	let (min, max, step) = controller.with_untracked(|c| {
		let config = c.config();
		(config.min_speed, config.max_speed, config.speed_step)
	});

	let on_speed = move |ev: leptos::ev::Event| {
		let Ok(value) = event_target_value(&ev).parse::<f64>() else {
			return;
		};
		controller.update(|c| {
			if let Err(err) = c.set_speed(value) {
				log::warn!("{err}");
			}
		});
	};

	view! {
		<div class="playback-controls">
			<button class="xy-theme__button" on:click=move |_| controller.update(|c| c.reset())>
				"Restart"
			</button>
			<button
				class="xy-theme__button step"
				on:click=move |_| {
					controller.update(|c| {
						c.step_backward();
					})
				}
			>
				"<"
			</button>
			<button
				class=move || if paused.get() { "xy-theme__button" } else { "xy-theme__button active" }
				on:click=move |_| controller.update(|c| c.toggle())
			>
				{move || if paused.get() { "Run" } else { "Stop" }}
			</button>
			<button
				class="xy-theme__button step"
				on:click=move |_| {
					controller.update(|c| {
						c.step_forward();
					})
				}
			>
				">"
			</button>
			<label class="speed">
				<input
					type="range"
					min=min.to_string()
					max=max.to_string()
					step=step.to_string()
					prop:value=move || speed.get().to_string()
					on:input=on_speed
				/>
				<span>{move || format!("Speed: {}x", speed.get())}</span>
			</label>
			<span class="status">{status}</span>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn phase_labels() {
		assert_eq!(phase_label(Phase::Idle), "idle");
		assert_eq!(phase_label(Phase::Finished), "finished");
	}
}
