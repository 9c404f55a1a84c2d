//! Aurora and nebula: large, faint gradient blobs layered behind everything
//! else. They barely move, live a long time, and fade in and out smoothly.

use std::f64::consts::{PI, TAU};

use rand::RngCore;

use super::{Env, VariantOps, integrate, range, recycle_generic, unit};
use crate::engine::color::Color;
use crate::engine::particle::{Body, Effect, Particle};
use crate::surface::Surface;

const DECAY: f64 = 0.1;
const AURORA_ALPHA: f64 = 0.15;
const NEBULA_ALPHA: f64 = 0.12;

/// A horizontal aurora band.
#[derive(Clone, Debug)]
pub struct Veil {
	pub width: f64,
	pub height: f64,
	pub color: Color,
	pub wave: f64,
	pub wave_speed: f64,
}

/// A round nebula cloud.
#[derive(Clone, Debug)]
pub struct Cloud {
	pub size: f64,
	pub color: Color,
	pub pulse: f64,
	pub pulse_speed: f64,
}

pub const AURORA: VariantOps = VariantOps {
	effect: Effect::Aurora,
	name: "aurora",
	spawn: spawn_aurora,
	advance: advance_aurora,
	should_recycle: recycle_generic,
	render: render_aurora,
};

pub const NEBULA: VariantOps = VariantOps {
	effect: Effect::Nebula,
	name: "nebula",
	spawn: spawn_nebula,
	advance: advance_nebula,
	should_recycle: recycle_generic,
	render: render_nebula,
};

/// Rises from zero to one and back over the particle's life.
fn fade(p: &Particle) -> f64 {
	(PI * p.life_ratio()).sin()
}

fn spawn_aurora(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let veil = Veil {
		width: range(rng, 150.0, 300.0),
		height: range(rng, 40.0, 90.0),
		color: Color::hsl(env.hue() + range(rng, -40.0, 40.0), 80.0, 60.0),
		wave: unit(rng) * TAU,
		wave_speed: range(rng, 0.005, 0.02),
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height * 0.5,
		Body::Aurora(veil),
	)
	.with_velocity((unit(rng) - 0.5) * 0.3 * env.speed(), 0.0)
}

fn advance_aurora(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Aurora(veil) = &mut p.body {
		p.y += veil.wave.sin() * 0.3;
		veil.wave += veil.wave_speed;
	}
	integrate(p);
	p.life -= DECAY;
}

fn render_aurora(surface: &mut dyn Surface, p: &Particle) {
	let Body::Aurora(veil) = &p.body else {
		return;
	};
	let alpha = AURORA_ALPHA * fade(p);
	surface.set_fill_radial(
		p.x,
		p.y,
		0.0,
		veil.width / 2.0,
		&[
			(0.0, veil.color.with_alpha(alpha)),
			(1.0, veil.color.with_alpha(0.0)),
		],
	);
	surface.begin_path();
	surface.ellipse(p.x, p.y, veil.width / 2.0, veil.height / 2.0);
	surface.fill();
}

fn spawn_nebula(env: &Env<'_>, rng: &mut dyn RngCore) -> Particle {
	let s = env.speed();
	let cloud = Cloud {
		size: range(rng, 60.0, 140.0),
		color: Color::hsl(env.hue() + range(rng, -60.0, 60.0), 70.0, 50.0),
		pulse: unit(rng) * TAU,
		pulse_speed: range(rng, 0.01, 0.03),
	};
	Particle::new(
		unit(rng) * env.bounds.width,
		unit(rng) * env.bounds.height,
		Body::Nebula(cloud),
	)
	.with_velocity((unit(rng) - 0.5) * 0.2 * s, (unit(rng) - 0.5) * 0.2 * s)
}

fn advance_nebula(p: &mut Particle, _env: &Env<'_>, _rng: &mut dyn RngCore) {
	if let Body::Nebula(cloud) = &mut p.body {
		cloud.pulse += cloud.pulse_speed;
	}
	integrate(p);
	p.life -= DECAY;
}

fn render_nebula(surface: &mut dyn Surface, p: &Particle) {
	let Body::Nebula(cloud) = &p.body else {
		return;
	};
	let alpha = NEBULA_ALPHA * fade(p) * (0.8 + 0.2 * cloud.pulse.sin());
	surface.set_fill_radial(
		p.x,
		p.y,
		0.0,
		cloud.size,
		&[
			(0.0, cloud.color.with_alpha(alpha)),
			(0.5, cloud.color.with_alpha(alpha * 0.5)),
			(1.0, cloud.color.with_alpha(0.0)),
		],
	);
	surface.begin_path();
	surface.arc(p.x, p.y, cloud.size, 0.0, TAU);
	surface.fill();
}
