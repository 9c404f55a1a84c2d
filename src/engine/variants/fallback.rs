//! Fallback for unknown effect names: hue-coloured dots drifting straight
//! down. Only needs the common fields plus size and colour, so a misspelt
//! effect still animates.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const SIZE: f64 = 5.0;

#[derive(Clone, Debug)]
pub struct Drift {
	pub size: f64,
	pub color: Color,
}

impl Default for Drift {
	fn default() -> Self {
		Self {
			size: SIZE,
			color: Color::hsl(180.0, 100.0, 50.0),
		}
	}
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Fallback,
	name: "",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let drift = Drift {
		size: SIZE,
		color: Color::hsl(env.hue(), 100.0, 50.0),
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height,
		Body::Fallback(drift),
	)
	.with_velocity(0.0, env.speed())
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Fallback(drift) = &p.body else {
		return;
	};
	surface.set_global_alpha(p.life_ratio());
	surface.set_fill_radial(
		p.x,
		p.y,
		0.0,
		drift.size,
		&[(0.0, drift.color.lighten(0.5)), (1.0, drift.color)],
	);
	surface.begin_path();
	surface.arc(p.x, p.y, drift.size, 0.0, TAU);
	surface.fill();
}

#[cfg(test)]
mod tests {
	use super::super::testing::*;
	use super::*;
	use crate::surface::{PaintOp, RecordingSurface};

	#[test]
	fn drifts_down_at_speed() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let mut p = spawn(&env, &mut rng);
		let y0 = p.y;
		advance(&mut p, &env, &mut rng);
		assert_eq!(p.y, y0 + ctx.speed);
		assert_eq!(p.life, p.max_life - LIFE_DECAY);
	}

	#[test]
	fn draws_a_full_circle() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let p = spawn(&env, &mut rng);
		let mut surface = RecordingSurface::new(400.0, 300.0);
		render(&mut surface, &p);
		assert!(surface.ops.contains(&PaintOp::Arc {
			x: p.x,
			y: p.y,
			radius: SIZE
		}));
		assert_eq!(surface.count(|op| matches!(op, PaintOp::Fill)), 1);
	}
}
