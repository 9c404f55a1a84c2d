//! Energy: streaks bursting out of the centre, each dragging a comet tail.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle, Trail};
use crate::surface::Surface;

const DECAY: f64 = 1.0;

#[derive(Clone, Debug)]
pub struct Streak {
	pub size: f64,
	pub color: Color,
	pub trail: Trail,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Energy,
	name: "energy",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let angle = unit(rng) * TAU;
	let speed = range(rng, 1.0, 4.0) * env.speed();
	let streak = Streak {
		size: range(rng, 1.0, 3.0),
		color: Color::hsl(env.hue() + range(rng, -20.0, 20.0), 100.0, 65.0),
		trail: Trail::new(),
	};
	let (cx, cy) = env.bounds.center();
	Particle::new(cx, cy, Body::Energy(streak))
		.with_velocity(angle.cos() * speed, angle.sin() * speed)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Energy(streak) = &mut p.body {
		streak.trail.push(p.x, p.y);
	}
	integrate(p);
	p.life -= DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Energy(streak) = &p.body else {
		return;
	};
	let Some((x0, y0)) = streak.trail.oldest() else {
		return;
	};
	surface.set_global_alpha(p.life_ratio());
	surface.set_stroke_color(streak.color);
	surface.set_line_width(streak.size);

	surface.begin_path();
	surface.move_to(x0, y0);
	for &(x, y) in streak.trail.iter().skip(1) {
		surface.line_to(x, y);
	}
	surface.line_to(p.x, p.y);
	surface.stroke();
}

#[cfg(test)]
mod tests {
	use super::super::testing::*;
	use super::*;
	use crate::engine::particle::TRAIL_CAPACITY;
	use crate::surface::{PaintOp, RecordingSurface};

	#[test]
	fn starts_at_center() {
		let ctx = context(Effect::Energy);
		let env = env(&ctx);
		let mut rng = rng();
		let p = spawn(&env, &mut rng);
		assert_eq!((p.x, p.y), (200.0, 150.0));
		assert!(p.vx != 0.0 || p.vy != 0.0);
	}

	#[test]
	fn trail_is_bounded() {
		let ctx = context(Effect::Energy);
		let env = env(&ctx);
		let mut rng = rng();
		let mut p = spawn(&env, &mut rng);
		p.vx = 0.1;
		p.vy = 0.0;
		for _ in 0..(TRAIL_CAPACITY * 3) {
			advance(&mut p, &env, &mut rng);
		}
		let Body::Energy(streak) = &p.body else {
			unreachable!()
		};
		assert_eq!(streak.trail.len(), TRAIL_CAPACITY);
	}

	#[test]
	fn strokes_through_the_trail() {
		let ctx = context(Effect::Energy);
		let env = env(&ctx);
		let mut rng = rng();
		let mut p = spawn(&env, &mut rng);
		let mut surface = RecordingSurface::new(400.0, 300.0);
		render(&mut surface, &p);
		assert!(surface.ops.is_empty(), "nothing to draw before the first move");

		for _ in 0..4 {
			advance(&mut p, &env, &mut rng);
		}
		render(&mut surface, &p);
		let Body::Energy(streak) = &p.body else {
			unreachable!()
		};
		assert!(surface.ops.contains(&PaintOp::LineWidth(streak.size)));
		assert!(surface.ops.contains(&PaintOp::GlobalAlpha(p.life_ratio())));
		assert_eq!(surface.count(|op| matches!(op, PaintOp::LineTo(..))), 4);
		assert_eq!(surface.count(|op| matches!(op, PaintOp::Stroke)), 1);
	}
}
