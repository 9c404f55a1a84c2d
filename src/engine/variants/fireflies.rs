//! Fireflies: glowing dots that wander between random targets.
//!
//! Each tick a firefly covers a fixed fraction of the distance to its target.
//! The target is re-rolled once the firefly gets close, and occasionally at
//! random, so the motion is smooth but never settles.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, VariantOps, chance, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const SEEK_FRACTION: f64 = 0.02;
const ARRIVE_DISTANCE: f64 = 5.0;
const RETARGET_CHANCE: f64 = 0.01;
const DECAY: f64 = 0.25;
const HALO_SCALE: f64 = 3.0;

#[derive(Clone, Debug)]
pub struct Firefly {
	pub size: f64,
	pub color: Color,
	pub target_x: f64,
	pub target_y: f64,
	pub glow: f64,
	pub glow_speed: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Fireflies,
	name: "fireflies",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let (w, h) = (env.bounds.width, env.bounds.height);
	let firefly = Firefly {
		size: range(rng, 1.0, 4.0),
		color: Color::hsl(env.hue(), 100.0, 60.0),
		target_x: unit(rng) * w,
		target_y: unit(rng) * h,
		glow: unit(rng) * TAU,
		glow_speed: range(rng, 0.03, 0.08),
	};
	Particle::new(unit(rng) * w, unit(rng) * h, Body::Fireflies(firefly))
}

fn advance(p: &mut Particle, env: &Env<'_>, rng: &mut dyn RngCore) {
	if let Body::Fireflies(fly) = &mut p.body {
		let (dx, dy) = (fly.target_x - p.x, fly.target_y - p.y);
		p.x += dx * SEEK_FRACTION;
		p.y += dy * SEEK_FRACTION;

		if (dx * dx + dy * dy).sqrt() < ARRIVE_DISTANCE || chance(rng, RETARGET_CHANCE) {
			fly.target_x = unit(rng) * env.bounds.width;
			fly.target_y = unit(rng) * env.bounds.height;
		}
		fly.glow += fly.glow_speed;
	}
	p.life -= DECAY;
}

/// Glow pulse in `[0, 1]`.
pub fn glow_alpha(fly: &Firefly) -> f64 {
	fly.glow.sin() * 0.5 + 0.5
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Fireflies(fly) = &p.body else {
		return;
	};
	let alpha = glow_alpha(fly) * p.life_ratio();
	surface.set_fill_color(fly.color);

	surface.set_global_alpha(alpha * 0.25);
	surface.begin_path();
	surface.arc(p.x, p.y, fly.size * HALO_SCALE, 0.0, TAU);
	surface.fill();

	surface.set_global_alpha(alpha);
	surface.begin_path();
	surface.arc(p.x, p.y, fly.size, 0.0, TAU);
	surface.fill();
}
