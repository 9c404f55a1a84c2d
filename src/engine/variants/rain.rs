//! Rain: a continuous curtain of streaks.
//!
//! Drops are never recycled. Once a drop has fallen a full streak length past
//! the bottom edge it is moved back above the top, so the same particles fall
//! forever and the curtain never thins out.

use rand::RngCore;

use super::{Env, VariantOps, integrate, never_recycle, range, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct Raindrop {
	pub width: f64,
	pub length: f64,
	pub color: Color,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Rain,
	name: "rain",
	spawn,
	advance,
	should_recycle: never_recycle,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let width = range(rng, 1.0, 3.0);
	let drop = Raindrop {
		width,
		length: width * 5.0,
		color: Color::hsla(210.0, 80.0, 70.0, 0.7),
	};
	// Spread over the full height so the first frame is already raining.
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height,
		Body::Rain(drop),
	)
	.with_velocity(0.0, range(rng, 10.0, 20.0) * env.speed())
}

fn advance(p: &mut Particle, env: &Env<'_>, rng: &mut dyn RngCore) {
	integrate(p);
	if let Body::Rain(drop) = &p.body {
		if p.y > env.bounds.height + drop.length {
			p.y = -drop.length;
			p.x = unit(rng) * env.bounds.width;
		}
	}
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Rain(drop) = &p.body else {
		return;
	};
	surface.translate(p.x, p.y);
	surface.set_fill_color(drop.color);
	surface.fill_rect(0.0, 0.0, drop.width, drop.length);
}
