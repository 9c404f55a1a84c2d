//! Sparks: short-lived embers thrown out in every direction, pulled down by a
//! little gravity.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const GRAVITY: f64 = 0.05;
const DRAG: f64 = 0.98;
const DECAY: f64 = 1.5;

#[derive(Clone, Debug)]
pub struct Spark {
	pub size: f64,
	pub color: Color,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Sparks,
	name: "sparks",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let spark = Spark {
		size: range(rng, 1.0, 4.0),
		color: Color::hsl(env.hue() + range(rng, -20.0, 20.0), 100.0, 60.0),
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height,
		Body::Sparks(spark),
	)
	.with_velocity((unit(rng) - 0.5) * 5.0 * s, (unit(rng) - 0.5) * 5.0 * s)
}

fn advance(p: &mut Particle, env: &Env<'_>, _rng: &mut dyn RngCore) {
	integrate(p);
	p.vy += GRAVITY * env.speed();
	p.vx *= DRAG;
	p.vy *= DRAG;
	p.life -= DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Sparks(spark) = &p.body else {
		return;
	};
	surface.set_global_alpha(p.life_ratio());
	surface.set_fill_color(spark.color);
	surface.begin_path();
	surface.arc(p.x, p.y, spark.size, 0.0, TAU);
	surface.fill();
}
