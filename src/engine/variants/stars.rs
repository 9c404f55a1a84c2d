//! Stars and glitter: fixed points that blink in place.
//!
//! Neither variant moves or recycles. `life` is reused as the blink clock: it
//! counts down at the particle's own rate and wraps back to full once it would
//! go negative, and alpha is derived from `sin(life)` rather than from the
//! life ratio.

use std::f64::consts::{FRAC_PI_2, TAU};

use rand::RngCore;

use super::{Env, VariantOps, never_recycle, range, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, DEFAULT_MAX_LIFE, Effect, Particle};
use crate::surface::Surface;

/// Blink frequency applied to `life`.
const BLINK_RATE: f64 = 0.1;

#[derive(Clone, Debug)]
pub struct Twinkle {
	pub size: f64,
	pub color: Color,
	/// Life consumed per tick; faster rates blink faster.
	pub rate: f64,
	pub phase: f64,
}

pub const STARS: VariantOps = VariantOps {
	effect: Effect::Stars,
	name: "stars",
	spawn: spawn_star,
	advance,
	should_recycle: never_recycle,
	render: render_star,
};

pub const GLITTER: VariantOps = VariantOps {
	effect: Effect::Glitter,
	name: "glitter",
	spawn: spawn_glitter,
	advance,
	should_recycle: never_recycle,
	render: render_glitter,
};

fn spawn_star(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let twinkle = Twinkle {
		size: range(rng, 0.5, 2.5),
		color: Color::hsl(env.hue(), 40.0, 92.0),
		rate: range(rng, 0.3, 1.0),
		phase: unit(rng) * TAU,
	};
	place(env, rng, Body::Stars(twinkle))
}

fn spawn_glitter(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let twinkle = Twinkle {
		size: range(rng, 1.0, 3.0),
		color: Color::hsl(env.hue() + range(rng, -60.0, 60.0), 90.0, 70.0),
		rate: range(rng, 0.8, 2.0),
		phase: unit(rng) * TAU,
	};
	place(env, rng, Body::Glitter(twinkle))
}

fn place(env: &Env<'_>, rng: &mut dyn RngCore, body: Body) -> Particle {
	// Random starting life so the field doesn't blink in unison.
	let life = unit(rng) * DEFAULT_MAX_LIFE;
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height,
		body,
	)
	.with_life(life)
}

fn advance(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	let rate = match &p.body {
		Body::Stars(t) | Body::Glitter(t) => t.rate,
		_ => return,
	};
	p.life -= rate;
	if p.life < 0.0 {
		p.life = p.max_life;
	}
}

/// Blink alpha in `[0, 1]` for a star or glitter particle.
pub fn blink_alpha(p: &Particle) -> Option<f64> {
	match &p.body {
		Body::Stars(t) | Body::Glitter(t) => {
			Some((((p.life * BLINK_RATE + t.phase).sin() + 1.0) / 2.0).clamp(0.0, 1.0))
		}
		_ => None,
	}
}

fn render_star(surface: &mut dyn Surface, p: &Particle) {
	let (Body::Stars(t), Some(alpha)) = (&p.body, blink_alpha(p)) else {
		return;
	};
	surface.set_global_alpha(alpha);
	surface.set_fill_color(t.color);
	surface.begin_path();
	surface.arc(p.x, p.y, t.size, 0.0, TAU);
	surface.fill();
}

fn render_glitter(surface: &mut dyn Surface, p: &Particle) {
	let (Body::Glitter(t), Some(alpha)) = (&p.body, blink_alpha(p)) else {
		return;
	};
	surface.translate(p.x, p.y);
	surface.set_global_alpha(alpha);
	surface.set_fill_color(t.color);

	// Four-point glint: long spikes on the axes, short ones between.
	surface.begin_path();
	for i in 0..8 {
		let angle = i as f64 * FRAC_PI_2 / 2.0;
		let r = if i % 2 == 0 { t.size * 2.0 } else { t.size * 0.4 };
		let (x, y) = (angle.cos() * r, angle.sin() * r);
		if i == 0 {
			surface.move_to(x, y);
		} else {
			surface.line_to(x, y);
		}
	}
	surface.close_path();
	surface.fill();
}
