//! Scheduled one-shot callbacks on a time thread.

use std::cell::RefCell;
use std::rc::Rc;

use super::approx_zero;

/// Shared handle to a [`TimeTrigger`].
///
/// The thread and the scheduling system both hold one; either side can
/// dispose the trigger through it. Triggers are single-threaded
/// cooperative objects, like everything on a time thread.
pub type TriggerHandle = Rc<RefCell<TimeTrigger>>;

type TriggerHandler = Box<dyn FnMut(&mut TimeTrigger)>;

/// A scheduled callback that fires when its interval elapses on a time
/// thread.
///
/// By default a trigger is one-shot: it is disposed after firing. Calling
/// [`proceed`](TimeTrigger::proceed) from inside the handler re-arms it
/// for another full interval.
pub struct TimeTrigger {
	total_interval: f32,
	elapsed: f32,
	handler: Option<TriggerHandler>,
	disposed: bool,
	proceeded: bool,
	facade: bool,
	seq: u64,
}

impl TimeTrigger {
	pub(crate) fn new(interval: f32, seq: u64) -> Self {
		Self {
			total_interval: interval,
			elapsed: 0.0,
			handler: None,
			disposed: false,
			proceeded: false,
			facade: false,
			seq,
		}
	}

	/// A facade stands in for a zero-interval trigger: it fires once,
	/// immediately, and cannot proceed.
	pub(crate) fn facade() -> Self {
		Self {
			facade: true,
			..Self::new(0.0, 0)
		}
	}

	pub(crate) fn set_handler(&mut self, handler: impl FnMut(&mut TimeTrigger) + 'static) {
		self.handler = Some(Box::new(handler));
	}

	pub(crate) fn seq(&self) -> u64 {
		self.seq
	}

	/// Returns the full interval in seconds.
	pub fn total_interval(&self) -> f32 {
		self.total_interval
	}

	/// Returns the time elapsed toward the next fire.
	pub fn time_elapsed(&self) -> f32 {
		self.elapsed
	}

	/// Returns the time remaining until the next fire.
	pub fn time_remaining(&self) -> f32 {
		(self.total_interval - self.elapsed).max(0.0)
	}

	/// Returns true if this trigger has been disposed and will never fire
	/// again.
	pub fn is_disposed(&self) -> bool {
		self.disposed
	}

	/// Returns true if this is a zero-interval facade.
	pub fn is_facade(&self) -> bool {
		self.facade
	}

	/// Re-arms the trigger for another full interval. Only meaningful
	/// from inside the handler; a facade ignores it.
	pub fn proceed(&mut self) {
		if !self.facade {
			self.proceeded = true;
		}
	}

	/// Disposes the trigger. Idempotent; a disposed trigger is dropped
	/// from its thread at the next integration point.
	pub fn dispose(&mut self) {
		self.disposed = true;
	}

	pub(crate) fn update(&mut self, delta: f32) {
		if self.disposed {
			return;
		}
		self.elapsed += delta;
		if approx_zero(self.time_remaining()) {
			self.fire();
		}
	}

	/// Invokes the handler. Dispose wins over proceed; neither means the
	/// trigger was one-shot and is disposed.
	pub(crate) fn fire(&mut self) {
		let Some(mut handler) = self.handler.take() else {
			self.disposed = true;
			return;
		};
		self.proceeded = false;
		handler(self);
		self.handler = Some(handler);
		if self.disposed {
			return;
		}
		if self.proceeded {
			self.elapsed = 0.0;
			self.proceeded = false;
		} else {
			self.disposed = true;
		}
	}
}

impl std::fmt::Debug for TimeTrigger {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TimeTrigger")
			.field("total_interval", &self.total_interval)
			.field("elapsed", &self.elapsed)
			.field("disposed", &self.disposed)
			.field("facade", &self.facade)
			.field("seq", &self.seq)
			.finish_non_exhaustive()
	}
}
