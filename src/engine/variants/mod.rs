//! The effect variant table.
//!
//! Each effect is a bundle of four plain functions ([`VariantOps`]): how a
//! particle spawns, how it moves each tick, when it must be recycled, and how
//! it is drawn. The table is a `static` slice, so every attachment shares it
//! read-only. Adding an effect means adding one module and one entry to
//! [`VARIANTS`].
//!
//! Recycling comes in two flavours. Most variants use [`recycle_generic`]
//! (life exhausted, or past the surface edge by [`MARGIN`]). A variant that
//! wraps itself in place (rain) or never moves (stars, glitter) opts out by
//! pointing `should_recycle` at [`never_recycle`].

use rand::{Rng, RngCore};

use super::particle::{Effect, Particle};
use super::{Bounds, EngineContext};
use crate::surface::Surface;

pub mod atmosphere;
pub mod bubbles;
pub mod confetti;
pub mod energy;
pub mod fallback;
pub mod fireflies;
pub mod hearts;
pub mod leaves;
pub mod magic;
pub mod rain;
pub mod smoke;
pub mod snow;
pub mod sparks;
pub mod stars;

/// How far past the surface edge a particle may drift before it is recycled.
pub const MARGIN: f64 = 50.0;

/// Life lost per tick by variants that don't pick their own rate.
pub const LIFE_DECAY: f64 = 0.5;

/// Read-only inputs to a variant operation for one tick.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a> {
	pub ctx: &'a EngineContext,
	/// Surface dimensions as read at the start of the tick.
	pub bounds: Bounds,
}

impl Env<'_> {
	/// Resolved speed scalar.
	pub fn speed(&self) -> f64 {
		self.ctx.speed
	}

	/// Base hue in degrees.
	pub fn hue(&self) -> f64 {
		self.ctx.hue
	}
}

pub type SpawnFn = fn(&Env<'_>, &mut dyn RngCore) -> Particle;
pub type AdvanceFn = fn(&mut Particle, &Env<'_>, &mut dyn RngCore);
pub type RecycleFn = fn(&Particle, &Env<'_>) -> bool;
pub type RenderFn = fn(&mut dyn Surface, &Particle);

/// The four operations that make up an effect.
#[derive(Clone, Copy)]
pub struct VariantOps {
	pub effect: Effect,
	/// Lower-case identifier used in configuration.
	pub name: &'static str,
	pub spawn: SpawnFn,
	pub advance: AdvanceFn,
	pub should_recycle: RecycleFn,
	/// Draws one particle. Runs inside a `save`/`restore` pair.
	pub render: RenderFn,
}

impl std::fmt::Debug for VariantOps {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VariantOps")
			.field("effect", &self.effect)
			.field("name", &self.name)
			.finish_non_exhaustive()
	}
}

/// All named effects.
pub static VARIANTS: &[VariantOps] = &[
	snow::OPS,
	rain::OPS,
	sparks::OPS,
	fireflies::OPS,
	leaves::OPS,
	hearts::OPS,
	bubbles::OPS,
	confetti::OPS,
	stars::STARS,
	stars::GLITTER,
	smoke::OPS,
	energy::OPS,
	magic::OPS,
	atmosphere::AURORA,
	atmosphere::NEBULA,
];

/// Used for empty or unrecognised effect names.
pub static FALLBACK: VariantOps = fallback::OPS;

/// Resolve an effect identifier, ignoring case and surrounding whitespace.
/// Unknown identifiers resolve to [`FALLBACK`].
pub fn lookup(effect_id: &str) -> &'static VariantOps {
	let id = effect_id.trim();
	VARIANTS
		.iter()
		.find(|ops| ops.name.eq_ignore_ascii_case(id))
		.unwrap_or(&FALLBACK)
}

/// Operations for an already-resolved effect.
pub fn ops_for(effect: Effect) -> &'static VariantOps {
	VARIANTS
		.iter()
		.find(|ops| ops.effect == effect)
		.unwrap_or(&FALLBACK)
}

/// Default recycling test: life exhausted or outside the surface by more
/// than [`MARGIN`] on any side.
pub fn recycle_generic(p: &Particle, env: &Env<'_>) -> bool {
	p.life <= 0.0 || env.bounds.outside(p.x, p.y, MARGIN)
}

pub fn never_recycle(_: &Particle, _: &Env<'_>) -> bool {
	false
}

/// Uniform sample in `[lo, hi)`.
pub(crate) fn range(rng: &mut dyn RngCore, lo: f64, hi: f64) -> f64 {
	lo + rng.r#gen::<f64>() * (hi - lo)
}

/// Uniform sample in `[0, 1)`.
pub(crate) fn unit(rng: &mut dyn RngCore) -> f64 {
	rng.r#gen::<f64>()
}

pub(crate) fn chance(rng: &mut dyn RngCore, p: f64) -> bool {
	unit(rng) < p
}

/// Apply velocity to position.
pub(crate) fn integrate(p: &mut Particle) {
	p.x += p.vx;
	p.y += p.vy;
}


#[cfg(test)]
mod tests {
	use super::testing::*;
	use super::*;
	use crate::surface::RecordingSurface;

	#[test]
	fn lookup_is_case_insensitive() {
		assert_eq!(lookup("snow").effect, Effect::Snow);
		assert_eq!(lookup("SNOW").effect, Effect::Snow);
		assert_eq!(lookup("  Rain ").effect, Effect::Rain);
	}

	#[test]
	fn unknown_names_fall_back() {
		for id in ["", "UNKNOWN_XYZ", "sn0w", "   "] {
			assert_eq!(lookup(id).effect, Effect::Fallback, "{id:?}");
		}
	}

	#[test]
	fn every_variant_is_registered_once() {
		let mut names: Vec<_> = VARIANTS.iter().map(|ops| ops.name).collect();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), VARIANTS.len());
		for ops in VARIANTS {
			assert_eq!(ops_for(ops.effect).name, ops.name);
		}
		assert_eq!(ops_for(Effect::Fallback).effect, Effect::Fallback);
	}

	#[test]
	fn spawn_tags_body_with_own_effect() {
		let mut rng = rng();
		for ops in VARIANTS.iter().chain(std::iter::once(&FALLBACK)) {
			let ctx = context(ops.effect);
			let env = env(&ctx);
			let p = (ops.spawn)(&env, &mut rng);
			assert_eq!(p.effect(), ops.effect, "{}", ops.name);
		}
	}

	#[test]
	fn every_variant_survives_a_full_cycle() {
		let mut rng = rng();
		for ops in VARIANTS.iter().chain(std::iter::once(&FALLBACK)) {
			let ctx = context(ops.effect);
			let env = env(&ctx);
			let mut p = (ops.spawn)(&env, &mut rng);
			let mut surface = RecordingSurface::new(400.0, 300.0);
			for _ in 0..50 {
				(ops.advance)(&mut p, &env, &mut rng);
				if (ops.should_recycle)(&p, &env) {
					p = (ops.spawn)(&env, &mut rng);
				}
				(ops.render)(&mut surface, &p);
			}
			assert!(p.x.is_finite() && p.y.is_finite(), "{}", ops.name);
			assert!(!surface.ops.is_empty(), "{} drew nothing", ops.name);
		}
	}

	#[test]
	fn generic_policy_checks_life_and_margin() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let fresh = (FALLBACK.spawn)(&env, &mut rng);

		let mut p = fresh.clone();
		p.x = 200.0;
		p.y = 150.0;
		assert!(!recycle_generic(&p, &env));

		p.life = 0.0;
		assert!(recycle_generic(&p, &env));

		for (x, y) in [(-51.0, 10.0), (451.0, 10.0), (10.0, -51.0), (10.0, 351.0)] {
			let mut p = fresh.clone();
			p.x = x;
			p.y = y;
			assert!(recycle_generic(&p, &env), "({x}, {y})");
		}

		let mut p = fresh;
		p.x = -49.0;
		p.y = 349.0;
		assert!(!recycle_generic(&p, &env));
	}
}
