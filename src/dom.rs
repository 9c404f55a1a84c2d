//! Page attachment: find `[data-anim-config]` elements, lay an overlay canvas
//! over each, and start a loop on it.
//!
//! Every element is set up independently; a bad config or DOM failure on one
//! is logged and the scan moves on. Re-running [`attach`] on an element
//! removes its previous canvas first; the old loop halts on its next tick and
//! disconnects the old canvas's resize observer as it goes.

use std::cell::RefCell;
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Node,
	ResizeObserver,
};

use crate::config::AnimConfig;
use crate::engine::scheduler::{self, AnimationLoop, Liveness, OnDetach, TickSource};
use crate::engine::{Bounds, Engine};
use crate::error::{AttachError, Result};
use crate::surface::CanvasSurface;

/// Attribute holding an element's JSON configuration.
pub const CONFIG_ATTRIBUTE: &str = "data-anim-config";
/// Class given to every overlay canvas.
pub const CANVAS_CLASS: &str = "anim-canvas-layer";
/// Class of the box wrapped around `<img>` hosts.
pub const WRAPPER_CLASS: &str = "anim-wrapper";

const CANVAS_STYLE: &[(&str, &str)] = &[
	("position", "absolute"),
	("top", "0"),
	("left", "0"),
	("width", "100%"),
	("height", "100%"),
	("pointer-events", "none"),
	("z-index", "1"),
];

/// A running loop on a canvas.
pub type CanvasLoop<L> = Rc<RefCell<AnimationLoop<CanvasSurface, L>>>;

/// [`TickSource`] backed by `requestAnimationFrame`.
pub struct AnimationFrames;

impl TickSource for AnimationFrames {
	fn request_tick(&self, tick: Box<dyn FnOnce()>) {
		let Some(window) = web_sys::window() else {
			return;
		};
		let callback = Closure::once_into_js(move || tick());
		if let Err(e) = window.request_animation_frame(callback.unchecked_ref()) {
			warn!("ambient-fx: requestAnimationFrame failed: {:?}", e);
		}
	}
}

/// Run [`attach_all`] now, or once the document has finished parsing.
pub fn attach_when_ready() {
	let Some(document) = document() else {
		warn!("ambient-fx: no document, nothing to attach");
		return;
	};
	if document.ready_state() != "loading" {
		attach_all();
		return;
	}
	let callback = Closure::once_into_js(|| {
		attach_all();
	});
	if let Err(e) =
		document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
	{
		warn!("ambient-fx: could not wait for DOMContentLoaded: {:?}", e);
	}
}

/// Attach an overlay to every configured element on the page. Returns how
/// many attached successfully.
pub fn attach_all() -> usize {
	let Some(document) = document() else {
		return 0;
	};
	let nodes = match document.query_selector_all(&format!("[{CONFIG_ATTRIBUTE}]")) {
		Ok(nodes) => nodes,
		Err(e) => {
			warn!("ambient-fx: element scan failed: {:?}", e);
			return 0;
		}
	};

	let mut attached = 0;
	for i in 0..nodes.length() {
		let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
			continue;
		};
		match attach(&el) {
			Ok(_) => attached += 1,
			Err(e) => warn!(
				"ambient-fx: skipping <{}>: {}",
				el.tag_name().to_lowercase(),
				e
			),
		}
	}
	info!("ambient-fx: attached {} of {} overlays", attached, nodes.length());
	attached
}

/// Set up (or restart) the overlay on one element.
pub fn attach(el: &HtmlElement) -> Result<HtmlCanvasElement> {
	let raw = el
		.get_attribute(CONFIG_ATTRIBUTE)
		.filter(|raw| !raw.trim().is_empty())
		.ok_or(AttachError::MissingConfig)?;
	let config = AnimConfig::parse(&raw)?;
	let document = el
		.owner_document()
		.ok_or_else(|| AttachError::Dom("element has no document".into()))?;

	remove_stale_canvas(el)?;
	let canvas = create_canvas(&document)?;
	if is_image(el) {
		let wrapper = ensure_wrapper(&document, el)?;
		wrapper.append_child(&canvas)?;
	} else {
		ensure_positioned(el)?;
		el.insert_before(&canvas, el.first_child().as_ref())?;
	}

	fit_canvas(&canvas, el);
	let observer = observe_resize(el, &canvas)?;

	let live = canvas.clone();
	let liveness = OnDetach::new(move || live.is_connected(), move || observer.disconnect());
	start_on_canvas(canvas.clone(), &config, entropy_seed(), liveness)?;
	Ok(canvas)
}

/// Start a loop drawing `config` on `canvas` until `liveness` says stop.
pub fn start_on_canvas<L: Liveness + 'static>(
	canvas: HtmlCanvasElement,
	config: &AnimConfig,
	seed: u64,
	liveness: L,
) -> Result<CanvasLoop<L>> {
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(AttachError::NoContext)?
		.dyn_into()
		.map_err(|_| AttachError::NoContext)?;
	let surface = CanvasSurface::new(canvas, ctx);
	let engine = Engine::new(config, Bounds::of(&surface), seed);
	Ok(scheduler::run(
		AnimationLoop::new(engine, surface, liveness),
		Rc::new(AnimationFrames),
	))
}

/// Overlay canvas style as an inline CSS declaration list.
pub fn canvas_css() -> String {
	CANVAS_STYLE
		.iter()
		.map(|(property, value)| format!("{property}: {value};"))
		.collect::<Vec<_>>()
		.join(" ")
}

/// Create an unattached overlay canvas.
pub fn create_canvas(document: &Document) -> Result<HtmlCanvasElement> {
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| AttachError::Dom("created element is not a canvas".into()))?;
	canvas.set_class_name(CANVAS_CLASS);
	let style = canvas.style();
	for (property, value) in CANVAS_STYLE {
		style.set_property(property, value)?;
	}
	Ok(canvas)
}

/// Copy `host`'s client size into the canvas pixel size.
pub fn fit_canvas(canvas: &HtmlCanvasElement, host: &Element) {
	canvas.set_width(host.client_width().max(0) as u32);
	canvas.set_height(host.client_height().max(0) as u32);
}

/// Keep the canvas pixel size in step with `host`. The observer disconnects
/// itself if it fires after the canvas has left the document.
pub fn observe_resize(host: &Element, canvas: &HtmlCanvasElement) -> Result<ResizeObserver> {
	let (host_size, canvas_size) = (host.clone(), canvas.clone());
	let callback = Closure::<dyn FnMut(JsValue, ResizeObserver)>::new(
		move |_entries: JsValue, observer: ResizeObserver| {
			if canvas_size.is_connected() {
				fit_canvas(&canvas_size, &host_size);
			} else {
				observer.disconnect();
			}
		},
	);
	let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
	observer.observe(host);
	callback.forget();
	Ok(observer)
}

fn remove_stale_canvas(el: &HtmlElement) -> Result<()> {
	let selector = format!(":scope > canvas.{CANVAS_CLASS}");
	if is_image(el) {
		if let Some(parent) = el.parent_element() {
			if let Some(old) = parent.query_selector(&selector)? {
				old.remove();
			}
		}
	}
	if let Some(old) = el.query_selector(&selector)? {
		old.remove();
	}
	Ok(())
}

/// The `div.anim-wrapper` around `img`, creating it if needed. The image's
/// margin moves to the wrapper.
fn ensure_wrapper(document: &Document, img: &HtmlElement) -> Result<Element> {
	if let Some(parent) = img.parent_element() {
		if parent.class_list().contains(WRAPPER_CLASS) {
			return Ok(parent);
		}
	}
	let parent = img
		.parent_node()
		.ok_or_else(|| AttachError::Dom("image has no parent".into()))?;

	let wrapper: HtmlElement = document
		.create_element("div")?
		.dyn_into()
		.map_err(|_| AttachError::Dom("created element is not a div".into()))?;
	wrapper.class_list().add_1(WRAPPER_CLASS)?;
	let style = wrapper.style();
	style.set_property("position", "relative")?;
	style.set_property("display", "inline-block")?;
	style.set_property("line-height", "0")?;
	style.set_property("margin", &img.style().get_property_value("margin")?)?;
	img.style().set_property("margin", "0")?;

	let img_node: &Node = img;
	parent.insert_before(&wrapper, Some(img_node))?;
	wrapper.append_child(img_node)?;
	Ok(wrapper.into())
}

fn ensure_positioned(el: &HtmlElement) -> Result<()> {
	let window = web_sys::window().ok_or_else(|| AttachError::Dom("no window".into()))?;
	if let Some(computed) = window.get_computed_style(el)? {
		if computed.get_property_value("position")? == "static" {
			el.style().set_property("position", "relative")?;
		}
	}
	Ok(())
}

fn is_image(el: &Element) -> bool {
	el.tag_name().eq_ignore_ascii_case("img")
}

fn document() -> Option<Document> {
	web_sys::window()?.document()
}

/// Random seed for a browser attachment.
pub fn entropy_seed() -> u64 {
	let word = || (js_sys::Math::random() * 4_294_967_296.0) as u64;
	(word() << 32) | word()
}
