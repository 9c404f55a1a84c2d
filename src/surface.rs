//! Drawing surfaces.
//!
//! The engine paints through the [`Surface`] trait and never owns the
//! underlying canvas. [`CanvasSurface`] forwards to a browser 2D context;
//! [`RecordingSurface`] keeps a log of paint calls for headless use.

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::engine::color::Color;

/// An opaque 2D paintable region.
///
/// Mirrors the subset of the canvas 2D API the particle variants need.
/// Transform and style changes are scoped with `save`/`restore`.
pub trait Surface {
	/// Current pixel width. May change between ticks.
	fn width(&self) -> f64;
	/// Current pixel height. May change between ticks.
	fn height(&self) -> f64;
	/// Clears the whole drawing region.
	fn clear(&mut self);

	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, x: f64, y: f64);
	fn rotate(&mut self, angle: f64);

	fn set_global_alpha(&mut self, alpha: f64);
	fn set_fill_color(&mut self, color: Color);
	fn set_stroke_color(&mut self, color: Color);
	/// Fill with a radial gradient centred at `(x, y)`, running from `r0` to
	/// `r1` through the given `(offset, color)` stops.
	fn set_fill_radial(&mut self, x: f64, y: f64, r0: f64, r1: f64, stops: &[(f64, Color)]);
	fn set_line_width(&mut self, width: f64);

	fn begin_path(&mut self);
	fn close_path(&mut self);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
	fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);
	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64);
	fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
	fn fill(&mut self);
	fn stroke(&mut self);
	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

/// Surface backed by an HTML canvas and its 2D context.
///
/// Dimensions are read from the canvas on every call so resizes made by the
/// resize observer are seen on the next tick.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
		Self { canvas, ctx }
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}
}

impl Surface for CanvasSurface {
	fn width(&self) -> f64 {
		self.canvas.width() as f64
	}

	fn height(&self) -> f64 {
		self.canvas.height() as f64
	}

	fn clear(&mut self) {
		self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = self.ctx.translate(x, y);
	}

	fn rotate(&mut self, angle: f64) {
		let _ = self.ctx.rotate(angle);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
	}

	fn set_fill_color(&mut self, color: Color) {
		self.ctx.set_fill_style_str(&color.to_css());
	}

	fn set_stroke_color(&mut self, color: Color) {
		self.ctx.set_stroke_style_str(&color.to_css());
	}

	fn set_fill_radial(&mut self, x: f64, y: f64, r0: f64, r1: f64, stops: &[(f64, Color)]) {
		let Ok(gradient) = self.ctx.create_radial_gradient(x, y, r0, x, y, r1) else {
			return;
		};
		for &(offset, color) in stops {
			let _ = gradient.add_color_stop(offset as f32, &color.to_css());
		}
		self.ctx.set_fill_style_canvas_gradient(&gradient);
	}

	fn set_line_width(&mut self, width: f64) {
		self.ctx.set_line_width(width);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn close_path(&mut self) {
		self.ctx.close_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
		self.ctx.quadratic_curve_to(cx, cy, x, y);
	}

	fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
		self.ctx.bezier_curve_to(c1x, c1y, c2x, c2y, x, y);
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let _ = self.ctx.arc(x, y, radius.max(0.0), start, end);
	}

	fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64) {
		let _ = self.ctx.ellipse(
			x,
			y,
			rx.max(0.0),
			ry.max(0.0),
			0.0,
			0.0,
			std::f64::consts::TAU,
		);
	}

	fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.rect(x, y, w, h);
	}

	fn fill(&mut self) {
		self.ctx.fill();
	}

	fn stroke(&mut self) {
		self.ctx.stroke();
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ctx.fill_rect(x, y, w, h);
	}
}

/// A single recorded paint call.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
	Clear { width: f64, height: f64 },
	Save,
	Restore,
	Translate(f64, f64),
	Rotate(f64),
	GlobalAlpha(f64),
	FillColor(Color),
	StrokeColor(Color),
	FillRadial { x: f64, y: f64, r0: f64, r1: f64, stops: Vec<(f64, Color)> },
	LineWidth(f64),
	BeginPath,
	ClosePath,
	MoveTo(f64, f64),
	LineTo(f64, f64),
	QuadraticCurveTo(f64, f64, f64, f64),
	BezierCurveTo(f64, f64, f64, f64, f64, f64),
	Arc { x: f64, y: f64, radius: f64 },
	Ellipse { x: f64, y: f64, rx: f64, ry: f64 },
	Rect(f64, f64, f64, f64),
	Fill,
	Stroke,
	FillRect(f64, f64, f64, f64),
}

/// Headless surface that records paint calls.
///
/// `clear` starts a new frame, so `ops` only ever holds the calls issued since
/// the last clear. Dimensions are plain fields so callers can emulate a resize
/// between ticks.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
	pub width: f64,
	pub height: f64,
	pub ops: Vec<PaintOp>,
}

impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			ops: Vec::new(),
		}
	}

	/// Number of recorded calls matching `pred` in the current frame.
	pub fn count(&self, pred: impl Fn(&PaintOp) -> bool) -> usize {
		self.ops.iter().filter(|op| pred(op)).count()
	}
}

impl Surface for RecordingSurface {
	fn width(&self) -> f64 {
		self.width
	}

	fn height(&self) -> f64 {
		self.height
	}

	fn clear(&mut self) {
		self.ops.clear();
		self.ops.push(PaintOp::Clear {
			width: self.width,
			height: self.height,
		});
	}

	fn save(&mut self) {
		self.ops.push(PaintOp::Save);
	}

	fn restore(&mut self) {
		self.ops.push(PaintOp::Restore);
	}

	fn translate(&mut self, x: f64, y: f64) {
		self.ops.push(PaintOp::Translate(x, y));
	}

	fn rotate(&mut self, angle: f64) {
		self.ops.push(PaintOp::Rotate(angle));
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ops.push(PaintOp::GlobalAlpha(alpha));
	}

	fn set_fill_color(&mut self, color: Color) {
		self.ops.push(PaintOp::FillColor(color));
	}

	fn set_stroke_color(&mut self, color: Color) {
		self.ops.push(PaintOp::StrokeColor(color));
	}

	fn set_fill_radial(&mut self, x: f64, y: f64, r0: f64, r1: f64, stops: &[(f64, Color)]) {
		self.ops.push(PaintOp::FillRadial {
			x,
			y,
			r0,
			r1,
			stops: stops.to_vec(),
		});
	}

	fn set_line_width(&mut self, width: f64) {
		self.ops.push(PaintOp::LineWidth(width));
	}

	fn begin_path(&mut self) {
		self.ops.push(PaintOp::BeginPath);
	}

	fn close_path(&mut self) {
		self.ops.push(PaintOp::ClosePath);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ops.push(PaintOp::MoveTo(x, y));
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ops.push(PaintOp::LineTo(x, y));
	}

	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
		self.ops.push(PaintOp::QuadraticCurveTo(cx, cy, x, y));
	}

	fn bezier_curve_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
		self.ops
			.push(PaintOp::BezierCurveTo(c1x, c1y, c2x, c2y, x, y));
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) {
		self.ops.push(PaintOp::Arc { x, y, radius });
	}

	fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64) {
		self.ops.push(PaintOp::Ellipse { x, y, rx, ry });
	}

	fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ops.push(PaintOp::Rect(x, y, w, h));
	}

	fn fill(&mut self) {
		self.ops.push(PaintOp::Fill);
	}

	fn stroke(&mut self) {
		self.ops.push(PaintOp::Stroke);
	}

	fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
		self.ops.push(PaintOp::FillRect(x, y, w, h));
	}
}
