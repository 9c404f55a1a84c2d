//! Magic: slowly rising four-point sparkles that pulse and spin.

use std::f64::consts::{FRAC_PI_4, TAU};

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct Charm {
	pub size: f64,
	pub color: Color,
	pub pulse: f64,
	pub pulse_speed: f64,
	pub rotation: f64,
	pub rotation_speed: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Magic,
	name: "magic",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let charm = Charm {
		size: range(rng, 2.0, 5.0),
		color: Color::hsl(env.hue() + range(rng, -40.0, 40.0), 90.0, 70.0),
		pulse: unit(rng) * TAU,
		pulse_speed: range(rng, 0.05, 0.15),
		rotation: unit(rng) * TAU,
		rotation_speed: range(rng, -0.04, 0.04),
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height,
		Body::Magic(charm),
	)
	.with_velocity((unit(rng) - 0.5) * 0.4 * s, -range(rng, 0.2, 0.8) * s)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Magic(charm) = &mut p.body {
		charm.pulse += charm.pulse_speed;
		charm.rotation += charm.rotation_speed;
	}
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Magic(charm) = &p.body else {
		return;
	};
	let r = charm.size * (1.0 + 0.3 * charm.pulse.sin());
	surface.translate(p.x, p.y);
	surface.rotate(charm.rotation);
	surface.set_global_alpha(p.life_ratio());
	surface.set_fill_color(charm.color);

	surface.begin_path();
	for i in 0..8 {
		let angle = i as f64 * FRAC_PI_4;
		let radius = if i % 2 == 0 { r } else { r * 0.4 };
		let (x, y) = (angle.cos() * radius, angle.sin() * radius);
		if i == 0 {
			surface.move_to(x, y);
		} else {
			surface.line_to(x, y);
		}
	}
	surface.close_path();
	surface.fill();
}

#[cfg(test)]
mod tests {
	use super::super::testing::*;
	use super::*;
	use crate::surface::{PaintOp, RecordingSurface};

	#[test]
	fn pulse_changes_drawn_size() {
		let ctx = context(Effect::Magic);
		let env = env(&ctx);
		let mut rng = rng();
		let mut p = spawn(&env, &mut rng);
		let first_point = |p: &Particle| {
			let mut surface = RecordingSurface::new(400.0, 300.0);
			render(&mut surface, p);
			surface.ops.iter().find_map(|op| match op {
				PaintOp::MoveTo(x, _) => Some(*x),
				_ => None,
			})
		};
		let before = first_point(&p);
		for _ in 0..5 {
			advance(&mut p, &env, &mut rng);
		}
		assert_ne!(before, first_point(&p));
	}
}
