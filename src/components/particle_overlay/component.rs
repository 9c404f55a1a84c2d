//! Leptos component hosting one overlay canvas.
//!
//! The canvas is created by the view and sized to the host box by a resize
//! observer. Each run of the effect bumps an epoch counter and starts a new
//! loop tagged with it; older loops see a stale epoch on their next tick and
//! halt, as does any loop whose canvas has been unmounted.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::config::AnimConfig;
use crate::dom::{self, CANVAS_CLASS, WRAPPER_CLASS};

/// Lays an animated particle effect over its children.
///
/// `seed` fixes the random stream; without it every start draws a fresh one.
#[component]
pub fn ParticleOverlay(
	#[prop(into)] config: Signal<AnimConfig>,
	#[prop(default = None)] seed: Option<u64>,
	#[prop(optional)] children: Option<Children>,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let epoch = Rc::new(Cell::new(0u64));
	let observing = Rc::new(Cell::new(false));

	Effect::new(move |_| {
		let config = config.get();
		let (Some(host), Some(canvas)) = (host_ref.get(), canvas_ref.get()) else {
			return;
		};
		let host: HtmlElement = host.into();
		let canvas: HtmlCanvasElement = canvas.into();

		if !observing.replace(true) {
			if let Err(e) = dom::observe_resize(&host, &canvas) {
				warn!("ambient-fx: overlay resize observer failed: {}", e);
			}
		}
		dom::fit_canvas(&canvas, &host);

		let current = epoch.get() + 1;
		epoch.set(current);
		let (epoch_live, canvas_live) = (epoch.clone(), canvas.clone());
		let liveness = move || epoch_live.get() == current && canvas_live.is_connected();

		let seed = seed.unwrap_or_else(dom::entropy_seed);
		if let Err(e) = dom::start_on_canvas(canvas, &config, seed, liveness) {
			warn!("ambient-fx: overlay failed to start: {}", e);
		}
	});

	view! {
		<div
			node_ref=host_ref
			class=WRAPPER_CLASS
			style="position: relative; display: inline-block; line-height: 0;"
		>
			<canvas node_ref=canvas_ref class=CANVAS_CLASS style=dom::canvas_css() />
			{children.map(|children| children())}
		</div>
	}
}
