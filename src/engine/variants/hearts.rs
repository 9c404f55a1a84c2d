//! Hearts: rise from the bottom edge, swaying, and fade as they go.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const SWAY: f64 = 0.8;

#[derive(Clone, Debug)]
pub struct Heart {
	pub size: f64,
	pub color: Color,
	pub wobble: f64,
	pub wobble_speed: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Hearts,
	name: "hearts",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	// Hearts stay in the pink/red band whatever the configured hue.
	let heart = Heart {
		size: range(rng, 6.0, 14.0),
		color: Color::hsl(
			350.0 + range(rng, -20.0, 20.0),
			range(rng, 70.0, 90.0),
			range(rng, 55.0, 70.0),
		),
		wobble: unit(rng) * TAU,
		wobble_speed: range(rng, 0.02, 0.05),
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		env.bounds.height + 20.0,
		Body::Hearts(heart),
	)
	.with_velocity(0.0, -range(rng, 0.5, 1.5) * env.speed())
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Hearts(heart) = &mut p.body {
		p.x += heart.wobble.sin() * SWAY;
		heart.wobble += heart.wobble_speed;
	}
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Hearts(heart) = &p.body else {
		return;
	};
	let s = heart.size;
	let top = s * 0.3;
	surface.translate(p.x, p.y - s * 0.5);
	surface.set_global_alpha(p.life_ratio());
	surface.set_fill_color(heart.color);

	surface.begin_path();
	surface.move_to(0.0, top);
	surface.bezier_curve_to(0.0, 0.0, -s * 0.5, 0.0, -s * 0.5, top);
	surface.bezier_curve_to(-s * 0.5, s * 0.6, 0.0, s * 0.8, 0.0, s);
	surface.bezier_curve_to(0.0, s * 0.8, s * 0.5, s * 0.6, s * 0.5, top);
	surface.bezier_curve_to(s * 0.5, 0.0, 0.0, 0.0, 0.0, top);
	surface.fill();
}
