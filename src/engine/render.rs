//! Frame rendering.
//!
//! Particles are painted back to front in slot order; there is no depth sort.
//! Each particle draws inside its own `save`/`restore` pair so transforms,
//! alpha and fill style never leak into the next one.

use super::pool::ParticlePool;
use super::variants::VariantOps;
use crate::surface::Surface;

/// Clear the surface and draw every particle not recycled this tick.
pub fn render(surface: &mut dyn Surface, pool: &ParticlePool, ops: &VariantOps, recycled: &[bool]) {
	surface.clear();

	for (index, particle) in pool.iter().enumerate() {
		if recycled.get(index).copied().unwrap_or(false) {
			continue;
		}
		surface.save();
		(ops.render)(surface, particle);
		surface.restore();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::particle::Effect;
	use crate::engine::variants::{lookup, testing::*};
	use crate::surface::{PaintOp, RecordingSurface};

	#[test]
	fn clears_first_and_balances_state() {
		let ctx = context(Effect::Snow);
		let env = env(&ctx);
		let mut rng = rng();
		let ops = lookup("snow");
		let pool = ParticlePool::fill(5, ops, &env, &mut rng);
		let mut surface = RecordingSurface::new(400.0, 300.0);

		render(&mut surface, &pool, ops, &[]);

		assert_eq!(
			surface.ops[0],
			PaintOp::Clear {
				width: 400.0,
				height: 300.0
			}
		);
		let saves = surface.count(|op| matches!(op, PaintOp::Save));
		let restores = surface.count(|op| matches!(op, PaintOp::Restore));
		assert_eq!(saves, 5);
		assert_eq!(restores, 5);

		let mut depth = 0i32;
		for op in &surface.ops {
			match op {
				PaintOp::Save => depth += 1,
				PaintOp::Restore => depth -= 1,
				PaintOp::Translate(..) | PaintOp::Rotate(_) | PaintOp::GlobalAlpha(_) => {
					assert_eq!(depth, 1, "state change outside save/restore")
				}
				_ => {}
			}
			assert!((0..=1).contains(&depth));
		}
	}

	#[test]
	fn skips_recycled_slots() {
		let ctx = context(Effect::Rain);
		let env = env(&ctx);
		let mut rng = rng();
		let ops = lookup("rain");
		let pool = ParticlePool::fill(4, ops, &env, &mut rng);
		let mut surface = RecordingSurface::new(400.0, 300.0);

		render(&mut surface, &pool, ops, &[false, true, false, true]);

		let translated: Vec<(f64, f64)> = surface
			.ops
			.iter()
			.filter_map(|op| match op {
				PaintOp::Translate(x, y) => Some((*x, *y)),
				_ => None,
			})
			.collect();
		let expected: Vec<(f64, f64)> = [0, 2]
			.iter()
			.map(|&i| {
				let p = pool.get(i).unwrap();
				(p.x, p.y)
			})
			.collect();
		assert_eq!(translated, expected);
	}
}
