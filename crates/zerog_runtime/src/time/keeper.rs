//! The time thread registry.

use super::thread::TimeThread;
use super::ThreadRole;

/// Owns one [`TimeThread`] per [`ThreadRole`] and advances them all from
/// the host's tick.
///
/// The keeper is plain owned state: the host creates one and passes it
/// (or individual threads) to whoever needs a clock.
#[derive(Debug)]
pub struct TimeKeeper {
	threads: Vec<TimeThread>,
}

impl TimeKeeper {
	/// Creates the full thread registry.
	pub fn new() -> Self {
		Self {
			threads: ThreadRole::ALL.into_iter().map(TimeThread::new).collect(),
		}
	}

	/// Advances every thread by one host tick, in [`ThreadRole::ALL`]
	/// order.
	pub fn fixed_update(&mut self, raw_delta: f32) {
		for thread in &mut self.threads {
			thread.fixed_update(raw_delta);
		}
	}

	/// Returns the thread for a role.
	pub fn thread(&self, role: ThreadRole) -> &TimeThread {
		&self.threads[Self::index(role)]
	}

	/// Returns the thread for a role, mutably.
	pub fn thread_mut(&mut self, role: ThreadRole) -> &mut TimeThread {
		&mut self.threads[Self::index(role)]
	}

	fn index(role: ThreadRole) -> usize {
		ThreadRole::ALL
			.iter()
			.position(|r| *r == role)
			.unwrap_or_default()
	}
}

impl Default for TimeKeeper {
	fn default() -> Self {
		Self::new()
	}
}
