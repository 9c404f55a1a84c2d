//! Bubbles: translucent rings floating up from the bottom edge.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct Bubble {
	pub size: f64,
	pub color: Color,
	pub rim: Color,
	pub wobble: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Bubbles,
	name: "bubbles",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let color = Color::hsla(env.hue(), 70.0, 70.0, 0.3);
	let bubble = Bubble {
		size: range(rng, 5.0, 15.0),
		color,
		rim: color.lighten(0.3).with_alpha(0.6),
		wobble: unit(rng) * TAU,
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		env.bounds.height + 10.0,
		Body::Bubbles(bubble),
	)
	.with_velocity((unit(rng) - 0.5) * s, -range(rng, 1.0, 3.0) * s)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Bubbles(bubble) = &mut p.body {
		p.x += bubble.wobble.sin() * 0.3;
		bubble.wobble += 0.05;
	}
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Bubbles(bubble) = &p.body else {
		return;
	};
	let r = bubble.size;
	surface.set_global_alpha(p.life_ratio());

	surface.set_fill_color(bubble.color);
	surface.begin_path();
	surface.arc(p.x, p.y, r, 0.0, TAU);
	surface.fill();

	surface.set_stroke_color(bubble.rim);
	surface.set_line_width(1.0);
	surface.stroke();

	surface.set_fill_color(Color::WHITE.with_alpha(0.5));
	surface.begin_path();
	surface.arc(p.x - r * 0.35, p.y - r * 0.35, r * 0.25, 0.0, TAU);
	surface.fill();
}

#[cfg(test)]
mod tests {
	use super::super::testing::*;
	use super::*;
	use crate::surface::{PaintOp, RecordingSurface};

	#[test]
	fn spawns_below_and_floats_up() {
		let ctx = context(Effect::Bubbles);
		let env = env(&ctx);
		let mut rng = rng();
		let p = spawn(&env, &mut rng);
		assert_eq!(p.y, 310.0);
		assert!(p.vy < 0.0);
	}

	#[test]
	fn draws_fill_rim_and_highlight() {
		let ctx = context(Effect::Bubbles);
		let env = env(&ctx);
		let mut rng = rng();
		let p = spawn(&env, &mut rng);
		let mut surface = RecordingSurface::new(400.0, 300.0);
		render(&mut surface, &p);
		assert_eq!(surface.count(|op| matches!(op, PaintOp::Arc { .. })), 2);
		assert_eq!(surface.count(|op| matches!(op, PaintOp::Stroke)), 1);
	}
}
