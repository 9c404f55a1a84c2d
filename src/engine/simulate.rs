//! One simulation tick over a pool.

use rand::RngCore;

use super::pool::ParticlePool;
use super::variants::{Env, VariantOps};

/// Advance every particle once, in slot order, and respawn the ones the
/// variant flags for recycling.
///
/// `recycled` is resized to the pool and marks the slots replaced this tick;
/// the renderer skips those. Returns the number of recycled slots.
pub fn step(
	pool: &mut ParticlePool,
	ops: &VariantOps,
	env: &Env<'_>,
	rng: &mut dyn RngCore,
	recycled: &mut Vec<bool>,
) -> usize {
	recycled.clear();
	recycled.resize(pool.len(), false);

	let mut count = 0;
	for index in 0..pool.len() {
		let Some(particle) = pool.slot_mut(index) else {
			continue;
		};
		(ops.advance)(particle, env, rng);
		if (ops.should_recycle)(particle, env) {
			pool.replace(index, (ops.spawn)(env, rng));
			recycled[index] = true;
			count += 1;
		}
	}
	count
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand_chacha::ChaCha8Rng;

	use super::*;
	use crate::engine::particle::Effect;
	use crate::engine::variants::{FALLBACK, lookup, testing::*};

	#[test]
	fn recycles_expired_particles_in_place() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let mut pool = ParticlePool::fill(4, &FALLBACK, &env, &mut rng);
		let ids = pool.ids();
		pool.slot_mut(2).unwrap().life = 0.2;

		let mut recycled = Vec::new();
		let count = step(&mut pool, &FALLBACK, &env, &mut rng, &mut recycled);

		assert_eq!(pool.len(), 4);
		assert!(count >= 1);
		assert!(recycled[2]);
		assert_ne!(pool.ids()[2], ids[2]);
		for (i, was_recycled) in recycled.iter().enumerate() {
			assert_eq!(*was_recycled, pool.ids()[i] != ids[i]);
		}
	}

	#[test]
	fn same_seed_same_trajectories() {
		let run = || {
			let ctx = context(Effect::Snow);
			let env = env(&ctx);
			let ops = lookup("snow");
			let mut rng = ChaCha8Rng::seed_from_u64(99);
			let mut pool = ParticlePool::fill(30, ops, &env, &mut rng);
			let mut recycled = Vec::new();
			for _ in 0..200 {
				step(&mut pool, ops, &env, &mut rng, &mut recycled);
			}
			pool.iter().map(|p| (p.x, p.y, p.life)).collect::<Vec<_>>()
		};
		assert_eq!(run(), run());
	}

	#[test]
	fn mask_tracks_pool_size() {
		let ctx = context(Effect::Fallback);
		let env = env(&ctx);
		let mut rng = rng();
		let mut pool = ParticlePool::fill(7, &FALLBACK, &env, &mut rng);
		let mut recycled = vec![true; 100];
		step(&mut pool, &FALLBACK, &env, &mut rng, &mut recycled);
		assert_eq!(recycled.len(), 7);
	}
}
