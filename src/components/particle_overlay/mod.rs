//! Declarative particle overlay for Leptos applications.
//!
//! Wraps its children in a relatively positioned box and lays an animated
//! canvas over them. The effect follows the reactive `config` signal: every
//! change restarts the animation with a fresh particle pool.
//!
//! # Example
//!
//! ```ignore
//! use ambient_fx::{AnimConfig, ParticleOverlay};
//!
//! let config = AnimConfig::new("snow").with_intensity(80.0);
//!
//! view! {
//!     <ParticleOverlay config=config>
//!         <img src="winter.jpg" />
//!     </ParticleOverlay>
//! }
//! ```

mod component;

pub use component::ParticleOverlay;
