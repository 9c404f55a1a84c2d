//! Fixed-size particle storage for one attachment.

use rand::RngCore;

use super::particle::Particle;
use super::variants::{Env, VariantOps};

/// An ordered pool of exactly `len()` particles.
///
/// The size is fixed when the pool is filled. Recycling swaps a slot's
/// contents in place; nothing is ever pushed or removed.
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
	particles: Vec<Particle>,
	next_id: u64,
}

impl ParticlePool {
	/// Spawn `count` particles with `ops`.
	pub fn fill(count: usize, ops: &VariantOps, env: &Env<'_>, rng: &mut dyn RngCore) -> Self {
		let mut pool = Self::default();
		pool.refill(count, ops, env, rng);
		pool
	}

	/// Discard every particle and spawn `count` new ones. Ids keep counting
	/// up, so no new particle shares an id with a discarded one.
	pub fn refill(&mut self, count: usize, ops: &VariantOps, env: &Env<'_>, rng: &mut dyn RngCore) {
		self.particles.clear();
		self.particles.reserve(count);
		for _ in 0..count {
			let particle = self.stamp((ops.spawn)(env, rng));
			self.particles.push(particle);
		}
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Particle> {
		self.particles.get(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Particle> {
		self.particles.iter()
	}

	/// Ids of every slot, in slot order.
	pub fn ids(&self) -> Vec<u64> {
		self.particles.iter().map(|p| p.id).collect()
	}

	pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Particle> {
		self.particles.get_mut(index)
	}

	/// Replace the particle in `index` with a fresh one, giving it a new id.
	pub(crate) fn replace(&mut self, index: usize, particle: Particle) {
		let particle = self.stamp(particle);
		if let Some(slot) = self.particles.get_mut(index) {
			*slot = particle;
		}
	}

	fn stamp(&mut self, mut particle: Particle) -> Particle {
		particle.id = self.next_id;
		self.next_id += 1;
		particle
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::particle::Effect;
	use crate::engine::variants::{FALLBACK, testing::*};

	#[test]
	fn fill_assigns_unique_ids() {
		let ctx = context(Effect::Fallback);
		let mut rng = rng();
		let pool = ParticlePool::fill(25, &FALLBACK, &env(&ctx), &mut rng);
		assert_eq!(pool.len(), 25);
		let mut ids = pool.ids();
		ids.dedup();
		assert_eq!(ids, (0..25).collect::<Vec<_>>());
	}

	#[test]
	fn replace_keeps_size_and_renews_id() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let mut pool = ParticlePool::fill(3, &FALLBACK, &env, &mut rng);
		let fresh = (FALLBACK.spawn)(&env, &mut rng);
		pool.replace(1, fresh);
		assert_eq!(pool.len(), 3);
		assert_eq!(pool.ids(), vec![0, 3, 2]);

		pool.replace(99, (FALLBACK.spawn)(&env, &mut rng));
		assert_eq!(pool.len(), 3);
	}

	#[test]
	fn refill_never_reuses_ids() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let mut pool = ParticlePool::fill(4, &FALLBACK, &env, &mut rng);
		pool.refill(2, &FALLBACK, &env, &mut rng);
		assert_eq!(pool.ids(), vec![4, 5]);
	}

	#[test]
	fn empty_pool() {
		let ctx = context(Effect::Fallback);
		let mut rng = rng();
		let pool = ParticlePool::fill(0, &FALLBACK, &env(&ctx), &mut rng);
		assert!(pool.is_empty());
		assert!(pool.get(0).is_none());
	}
}
