//! Smoke: soft grey puffs rising from the bottom edge, growing as they fade.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const MAX_ALPHA: f64 = 0.3;

#[derive(Clone, Debug)]
pub struct Puff {
	pub size: f64,
	pub growth: f64,
	pub color: Color,
	pub drift: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Smoke,
	name: "smoke",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let puff = Puff {
		size: range(rng, 10.0, 25.0),
		growth: range(rng, 0.1, 0.3),
		color: Color::hsl(env.hue(), 8.0, range(rng, 55.0, 75.0)),
		drift: unit(rng) * TAU,
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		env.bounds.height + range(rng, 0.0, 20.0),
		Body::Smoke(puff),
	)
	.with_velocity((unit(rng) - 0.5) * 0.3 * s, -range(rng, 0.3, 1.0) * s)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Smoke(puff) = &mut p.body {
		p.x += puff.drift.sin() * 0.4;
		puff.drift += 0.02;
		puff.size += puff.growth;
	}
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Smoke(puff) = &p.body else {
		return;
	};
	let alpha = MAX_ALPHA * p.life_ratio();
	surface.set_fill_radial(
		p.x,
		p.y,
		0.0,
		puff.size,
		&[
			(0.0, puff.color.with_alpha(alpha)),
			(1.0, puff.color.with_alpha(0.0)),
		],
	);
	surface.begin_path();
	surface.arc(p.x, p.y, puff.size, 0.0, TAU);
	surface.fill();
}
