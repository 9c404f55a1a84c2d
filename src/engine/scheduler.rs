//! Per-attachment animation loop.
//!
//! A loop is either running or halted. Every running tick checks liveness
//! first; once the surface is gone the loop halts for good and stops asking
//! for further ticks. There is no stop call: detaching the surface is how a
//! loop ends.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;

use super::{Bounds, Engine};
use crate::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	Running,
	Halted,
}

/// Whether the surface a loop draws to is still attached.
pub trait Liveness {
	fn is_live(&self) -> bool;
}

impl<F: Fn() -> bool> Liveness for F {
	fn is_live(&self) -> bool {
		self()
	}
}

/// Liveness that runs a cleanup once, the first time `inner` reports the
/// surface gone.
pub struct OnDetach<L, F> {
	inner: L,
	cleanup: Cell<Option<F>>,
}

impl<L, F> OnDetach<L, F> {
	pub fn new(inner: L, cleanup: F) -> Self {
		Self {
			inner,
			cleanup: Cell::new(Some(cleanup)),
		}
	}
}

impl<L: Liveness, F: FnOnce()> Liveness for OnDetach<L, F> {
	fn is_live(&self) -> bool {
		let live = self.inner.is_live();
		if !live {
			if let Some(cleanup) = self.cleanup.take() {
				cleanup();
			}
		}
		live
	}
}

/// Something that calls back once per display frame.
pub trait TickSource {
	fn request_tick(&self, tick: Box<dyn FnOnce()>);
}

pub struct AnimationLoop<S, L> {
	engine: Engine,
	surface: S,
	liveness: L,
	state: LoopState,
	ticks: u64,
}

impl<S: Surface, L: Liveness> AnimationLoop<S, L> {
	pub fn new(engine: Engine, surface: S, liveness: L) -> Self {
		Self {
			engine,
			surface,
			liveness,
			state: LoopState::Running,
			ticks: 0,
		}
	}

	/// Run one frame unless halted. A dead surface halts the loop instead.
	pub fn tick(&mut self) -> LoopState {
		if self.state == LoopState::Halted {
			return LoopState::Halted;
		}
		if !self.liveness.is_live() {
			self.state = LoopState::Halted;
			debug!(
				"ambient-fx: {:?} loop halted after {} ticks",
				self.engine.context().effect,
				self.ticks
			);
			return LoopState::Halted;
		}
		self.engine.frame(&mut self.surface);
		self.ticks += 1;
		LoopState::Running
	}

	pub fn state(&self) -> LoopState {
		self.state
	}

	/// Frames drawn so far.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	pub fn engine(&self) -> &Engine {
		&self.engine
	}

	pub fn engine_mut(&mut self) -> &mut Engine {
		&mut self.engine
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	/// Current surface size.
	pub fn bounds(&self) -> Bounds {
		Bounds::of(&self.surface)
	}
}

/// Start driving `anim` from `source`: tick once now, then once per
/// requested tick for as long as the loop keeps running.
///
/// The returned handle shares the loop with the pending callback; dropping
/// it does not stop the loop.
pub fn run<S, L, T>(anim: AnimationLoop<S, L>, source: Rc<T>) -> Rc<RefCell<AnimationLoop<S, L>>>
where
	S: Surface + 'static,
	L: Liveness + 'static,
	T: TickSource + 'static,
{
	debug!(
		"ambient-fx: {:?} loop started with {} particles",
		anim.engine.context().effect,
		anim.engine.pool().len()
	);
	let anim = Rc::new(RefCell::new(anim));
	drive(anim.clone(), source);
	anim
}

fn drive<S, L, T>(anim: Rc<RefCell<AnimationLoop<S, L>>>, source: Rc<T>)
where
	S: Surface + 'static,
	L: Liveness + 'static,
	T: TickSource + 'static,
{
	let state = anim.borrow_mut().tick();
	if state == LoopState::Running {
		let next = source.clone();
		source.request_tick(Box::new(move || drive(anim, next)));
	}
}

#[cfg(test)]
mod tests {
	use std::collections::VecDeque;

	use super::*;
	use crate::config::AnimConfig;
	use crate::surface::RecordingSurface;

	#[derive(Default)]
	struct ManualTicks {
		queue: RefCell<VecDeque<Box<dyn FnOnce()>>>,
	}

	impl ManualTicks {
		fn pending(&self) -> usize {
			self.queue.borrow().len()
		}

		fn fire(&self) -> bool {
			let next = self.queue.borrow_mut().pop_front();
			match next {
				Some(tick) => {
					tick();
					true
				}
				None => false,
			}
		}
	}

	impl TickSource for ManualTicks {
		fn request_tick(&self, tick: Box<dyn FnOnce()>) {
			self.queue.borrow_mut().push_back(tick);
		}
	}

	fn engine() -> Engine {
		Engine::new(
			&AnimConfig::new("fireflies").with_intensity(8.0),
			Bounds::new(200.0, 100.0),
			11,
		)
	}

	#[test]
	fn halted_loop_stays_halted() {
		let live = Rc::new(Cell::new(true));
		let flag = live.clone();
		let mut anim = AnimationLoop::new(engine(), RecordingSurface::new(200.0, 100.0), move || {
			flag.get()
		});

		assert_eq!(anim.tick(), LoopState::Running);
		assert_eq!(anim.ticks(), 1);
		live.set(false);
		assert_eq!(anim.tick(), LoopState::Halted);
		live.set(true);
		assert_eq!(anim.tick(), LoopState::Halted);
		assert_eq!(anim.ticks(), 1);
	}

	#[test]
	fn halted_tick_draws_nothing() {
		let mut anim = AnimationLoop::new(engine(), RecordingSurface::new(200.0, 100.0), || false);
		assert_eq!(anim.tick(), LoopState::Halted);
		assert!(anim.surface().ops.is_empty());
	}

	#[test]
	fn run_requests_ticks_until_detached() {
		let live = Rc::new(Cell::new(true));
		let flag = live.clone();
		let source = Rc::new(ManualTicks::default());
		let anim = AnimationLoop::new(engine(), RecordingSurface::new(200.0, 100.0), move || {
			flag.get()
		});

		let handle = run(anim, source.clone());
		assert_eq!(handle.borrow().ticks(), 1);
		assert_eq!(source.pending(), 1);

		for _ in 0..10 {
			assert!(source.fire());
			assert_eq!(source.pending(), 1);
		}
		assert_eq!(handle.borrow().ticks(), 11);

		live.set(false);
		assert!(source.fire());
		assert_eq!(source.pending(), 0);
		assert_eq!(handle.borrow().state(), LoopState::Halted);
		assert!(!source.fire());
	}

	#[test]
	fn detach_cleanup_runs_once() {
		let live = Rc::new(Cell::new(true));
		let cleaned = Rc::new(Cell::new(0));
		let (flag, counter) = (live.clone(), cleaned.clone());
		let liveness = OnDetach::new(move || flag.get(), move || counter.set(counter.get() + 1));
		let source = Rc::new(ManualTicks::default());
		let handle = run(
			AnimationLoop::new(engine(), RecordingSurface::new(200.0, 100.0), liveness),
			source.clone(),
		);

		for _ in 0..5 {
			source.fire();
		}
		assert_eq!(cleaned.get(), 0);

		live.set(false);
		source.fire();
		assert_eq!(cleaned.get(), 1);
		assert_eq!(handle.borrow_mut().tick(), LoopState::Halted);
		assert_eq!(cleaned.get(), 1);
	}

	#[test]
	fn run_on_dead_surface_never_schedules() {
		let source = Rc::new(ManualTicks::default());
		let anim = AnimationLoop::new(engine(), RecordingSurface::new(200.0, 100.0), || false);
		let handle = run(anim, source.clone());
		assert_eq!(source.pending(), 0);
		assert_eq!(handle.borrow().ticks(), 0);
	}
}
