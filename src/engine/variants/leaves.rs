//! Leaves: drift down from the top edge, swaying and spinning.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const SWAY: f64 = 1.5;
const DECAY: f64 = 0.25;

#[derive(Clone, Debug)]
pub struct Leaf {
	pub size: f64,
	pub color: Color,
	pub wobble: f64,
	pub wobble_speed: f64,
	pub rotation: f64,
	pub rotation_speed: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Leaves,
	name: "leaves",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let leaf = Leaf {
		size: range(rng, 6.0, 12.0),
		color: Color::hsl(
			env.hue() + range(rng, -25.0, 25.0),
			range(rng, 60.0, 85.0),
			range(rng, 35.0, 50.0),
		),
		wobble: unit(rng) * TAU,
		wobble_speed: range(rng, 0.02, 0.06),
		rotation: unit(rng) * TAU,
		rotation_speed: range(rng, -0.05, 0.05),
	};
	Particle::new(unit(rng) * env.bounds.width, -20.0, Body::Leaves(leaf))
		.with_velocity((unit(rng) - 0.5) * 0.5 * s, range(rng, 0.5, 1.5) * s)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Leaves(leaf) = &mut p.body {
		p.x += leaf.wobble.sin() * SWAY;
		leaf.wobble += leaf.wobble_speed;
		leaf.rotation += leaf.rotation_speed;
	}
	integrate(p);
	p.life -= DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Leaves(leaf) = &p.body else {
		return;
	};
	let s = leaf.size;
	surface.translate(p.x, p.y);
	surface.rotate(leaf.rotation);
	surface.set_global_alpha(p.life_ratio());
	surface.set_fill_color(leaf.color);

	surface.begin_path();
	surface.move_to(0.0, -s);
	surface.quadratic_curve_to(s * 0.6, 0.0, 0.0, s);
	surface.quadratic_curve_to(-s * 0.6, 0.0, 0.0, -s);
	surface.fill();
}
