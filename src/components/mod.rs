//! Leptos components.

pub mod particle_overlay;
