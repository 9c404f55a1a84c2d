//! Particle records.
//!
//! Every particle carries the same small set of common fields plus a tagged
//! [`Body`] holding the fields of exactly one effect. The body tag is fixed at
//! spawn, so a particle's effect never changes over its lifetime.

use std::collections::VecDeque;

use super::variants::{
	atmosphere::{Cloud, Veil},
	bubbles::Bubble,
	confetti::Confetto,
	energy::Streak,
	fallback::Drift,
	fireflies::Firefly,
	hearts::Heart,
	leaves::Leaf,
	magic::Charm,
	rain::Raindrop,
	smoke::Puff,
	snow::Flake,
	sparks::Spark,
	stars::Twinkle,
};

/// Life every particle starts with unless its variant says otherwise.
pub const DEFAULT_MAX_LIFE: f64 = 100.0;

/// Number of recent positions an energy streak remembers.
pub const TRAIL_CAPACITY: usize = 12;

/// Effect identifiers understood by the variant table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
	Snow,
	Rain,
	Sparks,
	Fireflies,
	Leaves,
	Hearts,
	Bubbles,
	Confetti,
	Stars,
	Glitter,
	Smoke,
	Energy,
	Magic,
	Aurora,
	Nebula,
	/// Catch-all for unknown or empty effect names.
	Fallback,
}

/// Effect-specific particle state.
#[derive(Clone, Debug)]
pub enum Body {
	Snow(Flake),
	Rain(Raindrop),
	Sparks(Spark),
	Fireflies(Firefly),
	Leaves(Leaf),
	Hearts(Heart),
	Bubbles(Bubble),
	Confetti(Confetto),
	Stars(Twinkle),
	Glitter(Twinkle),
	Smoke(Puff),
	Energy(Streak),
	Magic(Charm),
	Aurora(Veil),
	Nebula(Cloud),
	Fallback(Drift),
}

impl Body {
	pub fn effect(&self) -> Effect {
		match self {
			Body::Snow(_) => Effect::Snow,
			Body::Rain(_) => Effect::Rain,
			Body::Sparks(_) => Effect::Sparks,
			Body::Fireflies(_) => Effect::Fireflies,
			Body::Leaves(_) => Effect::Leaves,
			Body::Hearts(_) => Effect::Hearts,
			Body::Bubbles(_) => Effect::Bubbles,
			Body::Confetti(_) => Effect::Confetti,
			Body::Stars(_) => Effect::Stars,
			Body::Glitter(_) => Effect::Glitter,
			Body::Smoke(_) => Effect::Smoke,
			Body::Energy(_) => Effect::Energy,
			Body::Magic(_) => Effect::Magic,
			Body::Aurora(_) => Effect::Aurora,
			Body::Nebula(_) => Effect::Nebula,
			Body::Fallback(_) => Effect::Fallback,
		}
	}
}

/// A single particle in an attachment's pool.
#[derive(Clone, Debug)]
pub struct Particle {
	/// Serial assigned by the pool; changes whenever the slot is recycled.
	pub id: u64,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub life: f64,
	pub max_life: f64,
	pub body: Body,
}

impl Particle {
	/// A motionless particle at `(x, y)` with full default life.
	pub fn new(x: f64, y: f64, body: Body) -> Self {
		Self {
			id: 0,
			x,
			y,
			vx: 0.0,
			vy: 0.0,
			life: DEFAULT_MAX_LIFE,
			max_life: DEFAULT_MAX_LIFE,
			body,
		}
	}

	pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
		self.vx = vx;
		self.vy = vy;
		self
	}

	pub fn with_life(mut self, life: f64) -> Self {
		self.life = life;
		self
	}

	pub fn effect(&self) -> Effect {
		self.body.effect()
	}

	/// Remaining life as a fraction of `max_life`, clamped to `[0, 1]`.
	pub fn life_ratio(&self) -> f64 {
		if self.max_life <= 0.0 {
			return 0.0;
		}
		(self.life / self.max_life).clamp(0.0, 1.0)
	}
}

/// Bounded history of recent positions, oldest first.
#[derive(Clone, Debug, Default)]
pub struct Trail {
	points: VecDeque<(f64, f64)>,
}

impl Trail {
	pub fn new() -> Self {
		Self {
			points: VecDeque::with_capacity(TRAIL_CAPACITY + 1),
		}
	}

	/// Append a position, dropping the oldest once over capacity.
	pub fn push(&mut self, x: f64, y: f64) {
		self.points.push_back((x, y));
		while self.points.len() > TRAIL_CAPACITY {
			self.points.pop_front();
		}
	}

	pub fn len(&self) -> usize {
		self.points.len()
	}

	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &(f64, f64)> {
		self.points.iter()
	}

	pub fn oldest(&self) -> Option<(f64, f64)> {
		self.points.front().copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn trail_drops_oldest_over_capacity() {
		let mut trail = Trail::new();
		for i in 0..(TRAIL_CAPACITY + 5) {
			trail.push(i as f64, 0.0);
		}
		assert_eq!(trail.len(), TRAIL_CAPACITY);
		assert_eq!(trail.oldest(), Some((5.0, 0.0)));
		assert_eq!(
			trail.iter().last().copied(),
			Some(((TRAIL_CAPACITY + 4) as f64, 0.0))
		);
	}

	#[test]
	fn life_ratio_is_clamped() {
		let p = Particle::new(0.0, 0.0, Body::Fallback(Drift::default()));
		assert_eq!(p.life_ratio(), 1.0);
		assert_eq!(p.clone().with_life(-3.0).life_ratio(), 0.0);
		assert_eq!(p.with_life(250.0).life_ratio(), 1.0);
	}
}
