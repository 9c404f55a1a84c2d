//! Overlay configuration, as read from a host element's `data-anim-config`
//! attribute or handed to [`ParticleOverlay`](crate::ParticleOverlay).
//!
//! Parsing is lenient: numeric fields accept numbers or numeric strings, and
//! anything missing, zero or unparseable falls back to a default when the
//! config is resolved. Negative intensity and speed fall back too; a negative
//! hue wraps like any other.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::engine::EngineContext;
use crate::engine::variants;
use crate::error::Result;

pub const DEFAULT_INTENSITY: f64 = 50.0;
pub const DEFAULT_SPEED: f64 = 50.0;
pub const DEFAULT_HUE: f64 = 180.0;

/// Upper bound on particles per attachment.
pub const MAX_PARTICLES: usize = 2000;

/// Raw overlay settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AnimConfig {
	/// Effect name; matched case-insensitively.
	#[serde(default)]
	pub effect: String,
	/// Particle count.
	#[serde(default, deserialize_with = "lenient_number")]
	pub intensity: Option<f64>,
	/// Speed, where 50 is the nominal rate.
	#[serde(default, deserialize_with = "lenient_number")]
	pub speed: Option<f64>,
	/// Base hue in degrees.
	#[serde(default, alias = "color", deserialize_with = "lenient_number")]
	pub hue: Option<f64>,
}

impl AnimConfig {
	pub fn new(effect: impl Into<String>) -> Self {
		Self {
			effect: effect.into(),
			..Self::default()
		}
	}

	pub fn parse(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	pub fn with_intensity(mut self, intensity: f64) -> Self {
		self.intensity = Some(intensity);
		self
	}

	pub fn with_speed(mut self, speed: f64) -> Self {
		self.speed = Some(speed);
		self
	}

	pub fn with_hue(mut self, hue: f64) -> Self {
		self.hue = Some(hue);
		self
	}

	/// Normalised effect name, as used for lookup.
	pub fn effect_id(&self) -> String {
		self.effect.trim().to_ascii_lowercase()
	}

	/// Apply defaults and limits, producing the context a loop runs with.
	pub fn resolve(&self) -> EngineContext {
		let intensity = positive(self.intensity).unwrap_or(DEFAULT_INTENSITY).ceil();
		let count = if intensity > MAX_PARTICLES as f64 {
			warn!(
				"ambient-fx: intensity {} capped to {}",
				intensity, MAX_PARTICLES
			);
			MAX_PARTICLES
		} else {
			intensity as usize
		};

		EngineContext {
			effect: variants::lookup(&self.effect).effect,
			count,
			speed: positive(self.speed).unwrap_or(DEFAULT_SPEED) / 10.0,
			hue: nonzero(self.hue).unwrap_or(DEFAULT_HUE).rem_euclid(360.0),
		}
	}
}

fn positive(value: Option<f64>) -> Option<f64> {
	value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Hues wrap, so only zero and non-finite values count as unset.
fn nonzero(value: Option<f64>) -> Option<f64> {
	value.filter(|v| v.is_finite() && *v != 0.0)
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::Number(n)) => n.as_f64(),
		Some(Value::String(s)) => s.trim().parse().ok(),
		_ => None,
	})
}
