//! Virtualized game clocks for the `zerog-rs` project.
//!
//! Wall-clock time never drives gameplay directly. The host feeds one raw
//! tick delta into a [`TimeKeeper`], which advances one [`TimeThread`] per
//! [`ThreadRole`]; everything downstream (animation playback, cinematics,
//! scheduled triggers) reads its own thread's [`delta_time`] so whole
//! domains can be paused, slowed, or frozen independently.
//!
//! # Rate Changes Are Queued
//!
//! Rate changes never take effect mid-tick. A queued rate is applied at
//! the start of the next [`fixed_update`], after the freeze check and
//! before triggers run, so every consumer of a thread sees one consistent
//! rate per tick.
//!
//! # Pause Keys
//!
//! Pausing is reference-counted by [`PauseKey`]: each system locks with
//! its own key and the thread resumes only when every key has been
//! removed. A freeze is sugar for a timed pause under a dedicated key,
//! decremented by the raw (unscaled) delta so a frozen thread can thaw
//! itself.
//!
//! The Application thread is immutable: always unscaled, never paused.
//!
//! [`delta_time`]: TimeThread::delta_time
//! [`fixed_update`]: TimeThread::fixed_update

mod keeper;
mod thread;
mod trigger;

pub use keeper::TimeKeeper;
pub use thread::{ObserverKey, TimeThread};
pub use trigger::{TimeTrigger, TriggerHandle};

/// Tolerance for "has this time value reached zero" checks.
pub const TIME_EPSILON: f32 = 1e-5;

pub(crate) fn approx_zero(value: f32) -> bool {
	value.abs() < TIME_EPSILON
}

/// The rate at which a time thread advances.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TimeRate {
	/// The thread does not advance.
	Paused,
	/// The thread advances by the raw delta times the thread's time scale.
	#[default]
	Scaled,
	/// The thread advances by the raw delta, ignoring the time scale.
	Unscaled,
}

/// Identifies who is holding a pause lock on a time thread.
///
/// Keys are plain integers owned by calling systems; the negative values
/// below are reserved for the thread's own bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PauseKey(pub i32);

impl PauseKey {
	/// Reserved key used by [`TimeThread::queue_time_rate`].
	pub const TIME_RATE: PauseKey = PauseKey(-1);
	/// Reserved key used by [`TimeThread::queue_freeze`].
	pub const FREEZE: PauseKey = PauseKey(-2);
}

/// The fixed set of time threads, one per game domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreadRole {
	/// Always unscaled, never paused. Menus, debug overlays, the things
	/// that must keep moving.
	Application,
	/// Anything pausable: gameplay logic, modal dialogue included.
	Gameplay,
	/// Character movement and actions on the field.
	Field,
	/// Non-interactive cutscene playback.
	Cinematic,
}

impl ThreadRole {
	/// Every role, in [`TimeKeeper`] tick order.
	pub const ALL: [ThreadRole; 4] = [
		ThreadRole::Application,
		ThreadRole::Gameplay,
		ThreadRole::Field,
		ThreadRole::Cinematic,
	];
}

impl std::fmt::Display for ThreadRole {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			ThreadRole::Application => "Application",
			ThreadRole::Gameplay => "Gameplay",
			ThreadRole::Field => "Field",
			ThreadRole::Cinematic => "Cinematic",
		};
		f.write_str(name)
	}
}
