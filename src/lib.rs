//! ambient-fx: ambient particle overlays for web pages.
//!
//! Any element carrying a `data-anim-config` attribute gets a transparent
//! canvas laid over it with an animated effect (snow, rain, fireflies, aurora
//! and friends). Leptos applications can use the [`ParticleOverlay`]
//! component instead of the attribute.
//!
//! The simulation in [`engine`] draws through the [`Surface`] trait and has
//! no browser dependency, so it is tested on the host against a
//! [`RecordingSurface`].

use log::{Level, info};

pub mod components;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod surface;

pub use components::particle_overlay::ParticleOverlay;
pub use config::AnimConfig;
pub use engine::particle::{Effect, Particle};
pub use engine::scheduler::{AnimationLoop, Liveness, LoopState, TickSource};
pub use engine::{Bounds, Engine, EngineContext};
pub use error::AttachError;
pub use surface::{CanvasSurface, PaintOp, RecordingSurface, Surface};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("ambient-fx: logging initialized");
}
