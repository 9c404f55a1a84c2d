//! Confetti: multicoloured paper scraps tumbling down.

use std::f64::consts::TAU;

use rand::RngCore;

use super::{Env, LIFE_DECAY, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct Confetto {
	pub width: f64,
	pub height: f64,
	pub color: Color,
	pub rotation: f64,
	pub rotation_speed: f64,
	pub flutter: f64,
}

pub const OPS: VariantOps = VariantOps {
	effect: Effect::Confetti,
	name: "confetti",
	spawn,
	advance,
	should_recycle: recycle_generic,
	render,
};

fn spawn(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let confetto = Confetto {
		width: range(rng, 4.0, 10.0),
		height: range(rng, 2.0, 6.0),
		color: Color::hsl(unit(rng) * 360.0, 85.0, 60.0),
		rotation: unit(rng) * TAU,
		rotation_speed: range(rng, -0.1, 0.1),
		flutter: unit(rng) * TAU,
	};
	Particle::new(unit(rng) * env.bounds.width, -10.0, Body::Confetti(confetto))
		.with_velocity((unit(rng) - 0.5) * 0.5 * s, range(rng, 1.0, 3.0) * s)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Confetti(c) = &mut p.body {
		p.x += c.flutter.sin() * 0.5;
		c.flutter += 0.1;
		c.rotation += c.rotation_speed;
	}
	integrate(p);
	p.life -= LIFE_DECAY;
}

fn render(surface: &mut dyn Surface, p: &Particle) {
	let Body::Confetti(c) = &p.body else {
		return;
	};
	// Squash the scrap vertically as it flips.
	let h = c.height * c.flutter.cos().abs().max(0.1);
	surface.translate(p.x, p.y);
	surface.rotate(c.rotation);
	surface.set_global_alpha(p.life_ratio());
	surface.set_fill_color(c.color);
	surface.fill_rect(-c.width / 2.0, -h / 2.0, c.width, h);
}

#[cfg(test)]
mod tests {
	use super::super::testing::*;
	use super::*;

	#[test]
	fn colors_are_not_tied_to_base_hue() {
		let ctx = context(Effect::Confetti);
		let env = env(&ctx);
		let mut rng = rng();
		let colors: Vec<Color> = (0..20)
			.filter_map(|_| match spawn(&env, &mut rng).body {
				Body::Confetti(c) => Some(c.color),
				_ => None,
			})
			.collect();
		assert_eq!(colors.len(), 20);
		assert!(colors.windows(2).any(|w| w[0] != w[1]));
	}
}
