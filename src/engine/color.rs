//! Particle colours.
//!
//! Colours are resolved once when a particle spawns and stored on it, so the
//! renderer only ever formats a finished value and modulates alpha.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(255, 255, 255);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Build a color from CSS-style HSL: hue in degrees, saturation and
	/// lightness in percent.
	pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
		Self::hsla(hue, saturation, lightness, 1.0)
	}

	pub fn hsla(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
		let h = hue.rem_euclid(360.0) / 360.0;
		let s = (saturation / 100.0).clamp(0.0, 1.0);
		let l = (lightness / 100.0).clamp(0.0, 1.0);

		if s == 0.0 {
			let v = channel(l);
			return Self::rgba(v, v, v, alpha.clamp(0.0, 1.0));
		}

		let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
		let p = 2.0 * l - q;

		Self {
			r: channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
			g: channel(hue_to_rgb(p, q, h)),
			b: channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
			a: alpha.clamp(0.0, 1.0),
		}
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
	let t = t.rem_euclid(1.0);
	if t < 1.0 / 6.0 {
		p + (q - p) * 6.0 * t
	} else if t < 0.5 {
		q
	} else if t < 2.0 / 3.0 {
		p + (q - p) * (2.0 / 3.0 - t) * 6.0
	} else {
		p
	}
}

fn channel(v: f64) -> u8 {
	(v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hsl_primaries() {
		assert_eq!(Color::hsl(0.0, 100.0, 50.0), Color::rgb(255, 0, 0));
		assert_eq!(Color::hsl(120.0, 100.0, 50.0), Color::rgb(0, 255, 0));
		assert_eq!(Color::hsl(240.0, 100.0, 50.0), Color::rgb(0, 0, 255));
		assert_eq!(Color::hsl(180.0, 100.0, 50.0), Color::rgb(0, 255, 255));
	}

	#[test]
	fn hue_wraps_and_greys_ignore_hue() {
		assert_eq!(Color::hsl(360.0, 100.0, 50.0), Color::hsl(0.0, 100.0, 50.0));
		assert_eq!(Color::hsl(-120.0, 100.0, 50.0), Color::hsl(240.0, 100.0, 50.0));
		assert_eq!(Color::hsl(77.0, 0.0, 100.0), Color::WHITE);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(255, 0, 16).to_css(), "#ff0010");
		assert_eq!(
			Color::rgba(1, 2, 3, 0.5).to_css(),
			"rgba(1, 2, 3, 0.5)"
		);
		assert_eq!(Color::hsla(210.0, 80.0, 70.0, 0.7).a, 0.7);
	}
}
