//! Snowflakes: fall from above the surface with a gentle sideways wobble.

use std::f64::consts::PI;

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, range, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

/// Snowflakes get a wider margin so the wobble can't clip them at the sides.
const SNOW_MARGIN: f64 = 100.0;
const ALPHA: f64 = 0.8;

#[derive(Clone, Debug)]
pub struct Flake {
	pub size: f64,
	pub color: Color,
	pub wobble: f64,
	pub wobble_speed: f64,
	pub rotation: f64,
	pub rotation_speed: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Snow,
	name: "snow",
	spawn,
	advance,
	should_recycle,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let flake = Flake {
		size: range(rng, 2.0, 7.0),
		color: Color::WHITE,
		wobble: unit(rng),
		wobble_speed: range(rng, 0.02, 0.05),
		rotation: range(rng, 0.0, PI),
		rotation_speed: range(rng, -0.02, 0.02),
	};
	Particle::new(unit(rng) * env.bounds.width, -10.0, Body::Snow(flake))
		.with_velocity((unit(rng) - 0.5) * s, range(rng, 1.0, 3.0) * s)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Snow(flake) = &mut p.body {
		p.x += flake.wobble.sin() * 0.5;
		flake.wobble += flake.wobble_speed;
		flake.rotation += flake.rotation_speed;
	}
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn should_recycle(p: &Particle, env: &Env<'_>) -> bool {
	p.life <= 0.0 || env.bounds.outside(p.x, p.y, SNOW_MARGIN)
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Snow(flake) = &p.body else {
		return;
	};
	surface.translate(p.x, p.y);
	surface.rotate(flake.rotation);
	surface.set_global_alpha(ALPHA);
	surface.set_fill_color(flake.color);

	surface.begin_path();
	for i in 0..6 {
		let angle = i as f64 * PI / 3.0;
		let (x, y) = (angle.cos() * flake.size, angle.sin() * flake.size);
		if i == 0 {
			surface.move_to(x, y);
		} else {
			surface.line_to(x, y);
		}
	}
	surface.close_path();
	surface.fill();
}
