//! The particle simulation engine.
//!
//! One [`Engine`] drives one attachment: it owns the particle pool, the
//! resolved [`EngineContext`] and a seeded RNG, and looks up its variant from
//! the shared table once. Each [`Engine::frame`] reads the surface's current
//! size, advances the pool, and repaints it.
//!
//! The engine has no browser dependency; it paints through
//! [`Surface`](crate::surface::Surface), so it runs the same against a canvas
//! or a [`RecordingSurface`](crate::surface::RecordingSurface).

use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::AnimConfig;
use crate::surface::Surface;

pub mod color;
pub mod particle;
pub mod pool;
pub mod render;
pub mod scheduler;
pub mod simulate;
pub mod variants;

use particle::Effect;
use pool::ParticlePool;
use variants::{Env, VariantOps};

/// Surface dimensions, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn of(surface: &dyn Surface) -> Self {
		Self::new(surface.width(), surface.height())
	}

	/// Whether either dimension is zero, as for an unloaded image host.
	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}

	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}

	/// Whether `(x, y)` lies more than `margin` outside the bounds.
	pub fn outside(&self, x: f64, y: f64, margin: f64) -> bool {
		x < -margin || x > self.width + margin || y < -margin || y > self.height + margin
	}
}

/// Per-attachment settings resolved from an [`AnimConfig`].
///
/// Fixed for the lifetime of a loop; a new configuration builds a new context.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineContext {
	pub effect: Effect,
	/// Number of particles in the pool.
	pub count: usize,
	/// Speed scalar applied to spawn velocities.
	pub speed: f64,
	/// Base hue in degrees, `[0, 360)`.
	pub hue: f64,
}

/// Simulation state for one attachment.
pub struct Engine {
	context: EngineContext,
	ops: &'static VariantOps,
	pool: ParticlePool,
	rng: ChaCha8Rng,
	recycled: Vec<bool>,
	/// Bounds seen by the previous tick.
	bounds: Bounds,
}

impl Engine {
	/// Resolve `config` and fill a pool sized to it. `seed` fixes every random
	/// draw the engine makes.
	pub fn new(config: &AnimConfig, bounds: Bounds, seed: u64) -> Self {
		let (context, ops) = Self::resolve(config);
		let mut rng = ChaCha8Rng::seed_from_u64(seed);
		let env = Env {
			ctx: &context,
			bounds,
		};
		let pool = ParticlePool::fill(context.count, ops, &env, &mut rng);
		Self {
			context,
			ops,
			pool,
			rng,
			recycled: Vec::new(),
			bounds,
		}
	}

	fn resolve(config: &AnimConfig) -> (EngineContext, &'static VariantOps) {
		let context = config.resolve();
		let ops = variants::ops_for(context.effect);
		if ops.effect == Effect::Fallback {
			debug!(
				"ambient-fx: effect {:?} not recognised, using fallback",
				config.effect_id()
			);
		}
		(context, ops)
	}

	/// Rebuild the pool from a new configuration. The old particles are
	/// discarded wholesale, even if the count is unchanged.
	pub fn reconfigure(&mut self, config: &AnimConfig, bounds: Bounds) {
		let (context, ops) = Self::resolve(config);
		let env = Env {
			ctx: &context,
			bounds,
		};
		self.pool.refill(context.count, ops, &env, &mut self.rng);
		self.context = context;
		self.ops = ops;
		self.recycled.clear();
		self.bounds = bounds;
	}

	/// Advance the simulation one tick. Returns how many slots were recycled.
	///
	/// A pool spawned against an empty surface is respawned the first time
	/// the surface has a size.
	pub fn step(&mut self, bounds: Bounds) -> usize {
		if self.bounds.is_empty() && !bounds.is_empty() {
			debug!(
				"ambient-fx: surface sized to {}x{}, respawning {} particles",
				bounds.width,
				bounds.height,
				self.pool.len()
			);
			let env = Env {
				ctx: &self.context,
				bounds,
			};
			self.pool.refill(self.context.count, self.ops, &env, &mut self.rng);
		}
		self.bounds = bounds;

		let env = Env {
			ctx: &self.context,
			bounds,
		};
		simulate::step(
			&mut self.pool,
			self.ops,
			&env,
			&mut self.rng,
			&mut self.recycled,
		)
	}

	/// Repaint the surface from the current pool.
	pub fn render(&self, surface: &mut dyn Surface) {
		render::render(surface, &self.pool, self.ops, &self.recycled);
	}

	/// One full tick: sample the surface size, step, render.
	pub fn frame(&mut self, surface: &mut dyn Surface) {
		let bounds = Bounds::of(surface);
		self.step(bounds);
		self.render(surface);
	}

	pub fn context(&self) -> &EngineContext {
		&self.context
	}

	pub fn ops(&self) -> &'static VariantOps {
		self.ops
	}

	pub fn pool(&self) -> &ParticlePool {
		&self.pool
	}

	/// Slots recycled by the most recent step.
	pub fn recycled(&self) -> &[bool] {
		&self.recycled
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::surface::{PaintOp, RecordingSurface};

	#[test]
	fn bounds_margin() {
		let b = Bounds::new(100.0, 50.0);
		assert!(!b.outside(0.0, 0.0, 10.0));
		assert!(!b.outside(110.0, 60.0, 10.0));
		assert!(b.outside(110.1, 0.0, 10.0));
		assert!(b.outside(0.0, -10.1, 10.0));
		assert_eq!(b.center(), (50.0, 25.0));
	}

	#[test]
	fn frame_reads_current_dimensions() {
		let mut engine = Engine::new(&AnimConfig::new("bubbles"), Bounds::new(400.0, 300.0), 1);
		let mut surface = RecordingSurface::new(400.0, 300.0);
		engine.frame(&mut surface);

		surface.width = 800.0;
		surface.height = 600.0;
		engine.frame(&mut surface);
		assert_eq!(
			surface.ops[0],
			PaintOp::Clear {
				width: 800.0,
				height: 600.0
			}
		);
	}

	#[test]
	fn recycled_slots_are_not_drawn() {
		let config = AnimConfig::new("sparks").with_intensity(40.0);
		let mut engine = Engine::new(&config, Bounds::new(400.0, 300.0), 5);
		let mut surface = RecordingSurface::new(400.0, 300.0);
		let mut saw_recycle = false;
		for _ in 0..200 {
			engine.frame(&mut surface);
			let skipped = engine.recycled().iter().filter(|r| **r).count();
			saw_recycle |= skipped > 0;
			let drawn = surface.count(|op| matches!(op, PaintOp::Save));
			assert_eq!(drawn + skipped, engine.pool().len());
		}
		assert!(saw_recycle);
	}

	#[test]
	fn first_real_size_respawns_the_pool() {
		for effect in ["stars", "rain", "glitter"] {
			let config = AnimConfig::new(effect).with_intensity(10.0);
			let mut engine = Engine::new(&config, Bounds::new(0.0, 0.0), 6);
			assert!(engine.pool().iter().all(|p| p.x == 0.0));

			let mut surface = RecordingSurface::new(0.0, 0.0);
			engine.frame(&mut surface);
			assert!(engine.pool().iter().all(|p| p.x == 0.0));
			let before = engine.pool().ids();

			surface.width = 400.0;
			surface.height = 300.0;
			engine.frame(&mut surface);
			assert_eq!(engine.pool().len(), 10);
			assert!(engine.pool().ids().iter().all(|id| !before.contains(id)));
			let spread = engine.pool().iter().filter(|p| p.x > 1.0).count();
			assert!(spread >= 8, "{effect}: only {spread} particles moved off the edge");

			// Later resizes leave the pool alone.
			let ids = engine.pool().ids();
			surface.width = 200.0;
			engine.frame(&mut surface);
			assert_eq!(engine.pool().ids(), ids);
		}
	}

	#[test]
	fn reconfigure_replaces_pool() {
		let bounds = Bounds::new(400.0, 300.0);
		let config = AnimConfig::new("snow").with_intensity(12.0);
		let mut engine = Engine::new(&config, bounds, 3);
		let before = engine.pool().ids();

		engine.reconfigure(&config, bounds);
		assert_eq!(engine.pool().len(), 12);
		assert!(engine.pool().ids().iter().all(|id| !before.contains(id)));

		engine.reconfigure(&config.clone().with_intensity(30.0), bounds);
		assert_eq!(engine.pool().len(), 30);
		assert_eq!(engine.context().count, 30);
		assert!(engine.pool().iter().all(|p| p.effect() == Effect::Snow));
	}
}
