//! A single virtualized clock.

use std::rc::Rc;

use super::trigger::{TimeTrigger, TriggerHandle};
use super::{approx_zero, PauseKey, ThreadRole, TimeRate};

/// Handle for removing a pause/unpause observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverKey(u64);

type Observer = Box<dyn FnMut()>;
type OneShot = Box<dyn FnOnce()>;

/// One virtualized clock, advanced once per host tick via
/// [`fixed_update`](TimeThread::fixed_update).
///
/// See the [module docs](crate::time) for the rate, pause-key, and
/// trigger models. All rate transitions are queued and applied at the
/// start of the next tick; the Application thread rejects every
/// transition.
pub struct TimeThread {
	role: ThreadRole,
	is_app_thread: bool,
	time_rate: TimeRate,
	rate_queued: TimeRate,
	rate_unpause: TimeRate,
	time_scale: f32,
	raw_delta: f32,
	pause_keys: Vec<PauseKey>,
	freeze_key: Option<PauseKey>,
	freeze_time: f32,
	pause_observers: Vec<(ObserverKey, Observer)>,
	unpause_observers: Vec<(ObserverKey, Observer)>,
	pause_callbacks: Vec<OneShot>,
	unpause_callbacks: Vec<OneShot>,
	next_observer_key: u64,
	triggers: Vec<TriggerHandle>,
	triggers_new: Vec<TriggerHandle>,
	triggers_out: Vec<TriggerHandle>,
	next_trigger_seq: u64,
}

impl TimeThread {
	/// Creates the thread for a role. The Application thread starts
	/// unscaled and stays that way.
	pub fn new(role: ThreadRole) -> Self {
		let is_app_thread = role == ThreadRole::Application;
		let initial_rate = if is_app_thread {
			TimeRate::Unscaled
		} else {
			TimeRate::Scaled
		};
		Self {
			role,
			is_app_thread,
			time_rate: initial_rate,
			rate_queued: initial_rate,
			rate_unpause: initial_rate,
			time_scale: 1.0,
			raw_delta: 0.0,
			pause_keys: Vec::new(),
			freeze_key: None,
			freeze_time: 0.0,
			pause_observers: Vec::new(),
			unpause_observers: Vec::new(),
			pause_callbacks: Vec::new(),
			unpause_callbacks: Vec::new(),
			next_observer_key: 0,
			triggers: Vec::new(),
			triggers_new: Vec::new(),
			triggers_out: Vec::new(),
			next_trigger_seq: 0,
		}
	}

	/// Returns this thread's role.
	pub fn role(&self) -> ThreadRole {
		self.role
	}

	/// Returns this tick's delta as seen by this thread: zero while
	/// paused, scaled or raw otherwise.
	pub fn delta_time(&self) -> f32 {
		match self.time_rate {
			TimeRate::Paused => 0.0,
			TimeRate::Scaled => self.time_scale * self.raw_delta,
			TimeRate::Unscaled => self.raw_delta,
		}
	}

	/// Returns the thread's speed factor: 0 while paused, the time scale
	/// when scaled, 1 when unscaled.
	pub fn speed(&self) -> f32 {
		match self.time_rate {
			TimeRate::Paused => 0.0,
			TimeRate::Scaled => self.time_scale,
			TimeRate::Unscaled => 1.0,
		}
	}

	/// Returns the current rate.
	pub fn time_rate(&self) -> TimeRate {
		self.time_rate
	}

	/// Returns the current time scale. Only meaningful under
	/// [`TimeRate::Scaled`].
	pub fn time_scale(&self) -> f32 {
		self.time_scale
	}

	/// Returns true if the thread is currently paused.
	pub fn is_paused(&self) -> bool {
		self.time_rate == TimeRate::Paused
	}

	/// Returns true if a rate transition is waiting for the next tick.
	pub fn is_rate_queued(&self) -> bool {
		self.time_rate != self.rate_queued
	}

	/// Advances the thread by one host tick.
	///
	/// Order matters: the freeze countdown runs first (on the raw delta),
	/// then any queued rate transition is applied, then triggers advance;
	/// a paused thread skips its triggers entirely.
	pub fn fixed_update(&mut self, raw_delta: f32) {
		self.raw_delta = raw_delta;
		self.check_freeze(raw_delta);
		self.check_rate_queued();
		if self.is_paused() {
			return;
		}
		self.update_triggers();
	}

	// -- pause/unpause --

	/// Queues a pause under the given key. Returns false only if this is
	/// the Application thread.
	pub fn queue_pause(&mut self, key: PauseKey) -> bool {
		if self.is_app_thread {
			log::error!("the TimeRate of the Application time thread cannot be changed");
			return false;
		}
		if self.is_rate_queued() && self.rate_queued != TimeRate::Paused {
			log::warn!("{} thread: a different TimeRate is already queued", self.role);
		}
		let already_processed = !self.pause_keys.is_empty();
		if !self.pause_keys.contains(&key) {
			self.pause_keys.push(key);
		}
		if already_processed {
			return true;
		}
		self.rate_queued = TimeRate::Paused;
		true
	}

	/// Queues a pause and a one-shot callback invoked when the pause
	/// takes effect.
	pub fn queue_pause_with(&mut self, key: PauseKey, callback: impl FnOnce() + 'static) {
		if self.queue_pause(key) {
			self.pause_callbacks.push(Box::new(callback));
		}
	}

	/// Removes a pause key; the thread unpauses at the next tick once no
	/// keys remain. Returns false on the Application thread or when no
	/// keys were held.
	pub fn queue_unpause(&mut self, key: PauseKey) -> bool {
		if self.is_app_thread {
			log::error!("the TimeRate of the Application time thread cannot be changed");
			return false;
		}
		if self.is_rate_queued() && self.rate_queued != self.rate_unpause {
			log::warn!("{} thread: a different TimeRate is already queued", self.role);
		}
		if self.pause_keys.is_empty() {
			log::warn!("{} thread: nothing to unpause", self.role);
			return false;
		}
		self.pause_keys.retain(|k| *k != key);
		if !self.pause_keys.is_empty() {
			// Other systems still hold the thread paused.
			return true;
		}
		self.rate_queued = self.rate_unpause;
		true
	}

	/// Queues an unpause and a one-shot callback invoked when the
	/// unpause takes effect.
	pub fn queue_unpause_with(&mut self, key: PauseKey, callback: impl FnOnce() + 'static) {
		if self.queue_unpause(key) {
			self.unpause_callbacks.push(Box::new(callback));
		}
	}

	/// Pauses or unpauses depending on whether the key is currently held.
	pub fn queue_pause_toggle(&mut self, key: PauseKey) {
		if self.pause_keys.contains(&key) {
			self.queue_unpause(key);
		} else {
			self.queue_pause(key);
		}
	}

	/// Queues a rate change under the given key.
	///
	/// The time scale itself changes immediately; the rate transition is
	/// applied at the next tick like any other.
	pub fn queue_time_rate(&mut self, time_rate: TimeRate, time_scale: f32, key: PauseKey) {
		if self.is_app_thread {
			log::error!("the TimeRate of the Application time thread cannot be changed");
			return;
		}
		if self.is_rate_queued() {
			log::error!("{} thread: a different TimeRate is already queued", self.role);
			return;
		}
		match time_rate {
			TimeRate::Paused => {
				self.queue_pause(key);
			}
			TimeRate::Scaled => {
				self.rate_unpause = TimeRate::Scaled;
				self.time_scale = time_scale;
				self.queue_unpause(key);
			}
			TimeRate::Unscaled => {
				self.rate_unpause = TimeRate::Unscaled;
				self.queue_unpause(key);
			}
		}
	}

	/// Pauses the thread for `duration` seconds of raw time under the
	/// given key, unpausing automatically afterwards.
	///
	/// A second freeze under the same key extends the countdown to the
	/// longer of the two; a freeze under a different key while one is
	/// active is an error and is ignored.
	pub fn queue_freeze(&mut self, duration: f32, key: PauseKey) {
		match self.freeze_key {
			Some(active) if active == key => {
				self.freeze_time = self.freeze_time.max(duration);
			}
			Some(_) => {
				log::error!(
					"{} thread: a time freeze is already active with a different pause key",
					self.role
				);
			}
			None => {
				self.freeze_time = duration;
				self.freeze_key = Some(key);
				self.queue_pause(key);
			}
		}
	}

	/// Registers an observer invoked every time the thread pauses.
	pub fn add_pause_observer(&mut self, observer: impl FnMut() + 'static) -> ObserverKey {
		let key = self.next_observer();
		self.pause_observers.push((key, Box::new(observer)));
		key
	}

	/// Registers an observer invoked every time the thread unpauses.
	pub fn add_unpause_observer(&mut self, observer: impl FnMut() + 'static) -> ObserverKey {
		let key = self.next_observer();
		self.unpause_observers.push((key, Box::new(observer)));
		key
	}

	/// Removes a pause observer. Returns false if the key is unknown.
	pub fn remove_pause_observer(&mut self, key: ObserverKey) -> bool {
		let before = self.pause_observers.len();
		self.pause_observers.retain(|(k, _)| *k != key);
		self.pause_observers.len() < before
	}

	/// Removes an unpause observer. Returns false if the key is unknown.
	pub fn remove_unpause_observer(&mut self, key: ObserverKey) -> bool {
		let before = self.unpause_observers.len();
		self.unpause_observers.retain(|(k, _)| *k != key);
		self.unpause_observers.len() < before
	}

	// -- triggers --

	/// Schedules `handler` to run after `interval` seconds of this
	/// thread's time.
	///
	/// A zero interval fires the handler immediately through a facade
	/// trigger (unless `disallow_facade` is set, which makes it an
	/// error). Negative intervals are always an error; errors return
	/// `None`.
	pub fn add_trigger(
		&mut self,
		interval: f32,
		handler: impl FnMut(&mut TimeTrigger) + 'static,
		disallow_facade: bool,
	) -> Option<TriggerHandle> {
		if interval > 0.0 {
			let mut trigger = TimeTrigger::new(interval, self.next_trigger_seq());
			trigger.set_handler(handler);
			let handle = TriggerHandle::new(trigger.into());
			self.triggers_new.push(Rc::clone(&handle));
			Some(handle)
		} else if disallow_facade {
			log::error!("{} thread: trigger interval must be greater than zero", self.role);
			None
		} else if approx_zero(interval) {
			// No measurable interval: fire immediately through a facade.
			let mut facade = TimeTrigger::facade();
			facade.set_handler(handler);
			facade.fire();
			Some(TriggerHandle::new(facade.into()))
		} else {
			log::error!(
				"{} thread: trigger interval must be greater than or equal to zero",
				self.role
			);
			None
		}
	}

	/// Links an existing (e.g. previously unlinked) trigger to this
	/// thread. Its elapsed time is kept.
	pub fn link_trigger(&mut self, handle: TriggerHandle) {
		if handle.borrow().total_interval() > 0.0 {
			self.triggers_new.push(handle);
		} else {
			log::error!("{} thread: trigger interval must be greater than zero", self.role);
		}
	}

	/// Disposes a linked trigger. Returns false if the trigger isn't
	/// linked or is already disposed.
	pub fn remove_trigger(&mut self, handle: &TriggerHandle) -> bool {
		if self.triggers.iter().any(|t| Rc::ptr_eq(t, handle)) && !handle.borrow().is_disposed() {
			handle.borrow_mut().dispose();
			true
		} else {
			false
		}
	}

	/// Unlinks a trigger without disposing it; it keeps its elapsed time
	/// and can be linked again later. Returns false if it isn't linked.
	pub fn unlink_trigger(&mut self, handle: &TriggerHandle) -> bool {
		if self.triggers.iter().any(|t| Rc::ptr_eq(t, handle))
			&& !self.triggers_out.iter().any(|t| Rc::ptr_eq(t, handle))
		{
			self.triggers_out.push(Rc::clone(handle));
			true
		} else {
			false
		}
	}

	/// Returns the number of triggers linked (including not yet
	/// integrated ones).
	pub fn trigger_count(&self) -> usize {
		self.triggers.len() + self.triggers_new.len()
	}

	// -- internals --

	fn next_observer(&mut self) -> ObserverKey {
		let key = ObserverKey(self.next_observer_key);
		self.next_observer_key += 1;
		key
	}

	fn next_trigger_seq(&mut self) -> u64 {
		let seq = self.next_trigger_seq;
		self.next_trigger_seq += 1;
		seq
	}

	fn check_freeze(&mut self, raw_delta: f32) {
		let Some(key) = self.freeze_key else {
			return;
		};
		if approx_zero(self.freeze_time) {
			self.queue_unpause(key);
			self.freeze_key = None;
		} else {
			// Freezes thaw in raw time; the thread itself is paused.
			self.freeze_time = (self.freeze_time - raw_delta).max(0.0);
		}
	}

	fn check_rate_queued(&mut self) {
		if !self.is_rate_queued() {
			return;
		}
		match self.rate_queued {
			TimeRate::Paused => self.pause(),
			TimeRate::Scaled | TimeRate::Unscaled => self.unpause(),
		}
	}

	fn pause(&mut self) {
		self.time_rate = TimeRate::Paused;
		for callback in self.pause_callbacks.drain(..) {
			callback();
		}
		for (_, observer) in &mut self.pause_observers {
			observer();
		}
	}

	fn unpause(&mut self) {
		self.time_rate = self.rate_unpause;
		for callback in self.unpause_callbacks.drain(..) {
			callback();
		}
		for (_, observer) in &mut self.unpause_observers {
			observer();
		}
	}

	fn update_triggers(&mut self) {
		self.integrate_triggers();
		let delta = self.delta_time();
		let mut i = 0;
		while i < self.triggers.len() {
			let handle = Rc::clone(&self.triggers[i]);
			handle.borrow_mut().update(delta);
			if handle.borrow().is_disposed() {
				self.triggers.remove(i);
			} else {
				i += 1;
			}
		}
		self.integrate_triggers();
	}

	/// Applies the new/out double buffers and restores the firing order:
	/// soonest remaining time first, insertion order breaking ties.
	fn integrate_triggers(&mut self) {
		if !self.triggers_new.is_empty() {
			self.triggers.append(&mut self.triggers_new);
			Self::sort_triggers(&mut self.triggers);
		}
		if !self.triggers_out.is_empty() {
			let out = std::mem::take(&mut self.triggers_out);
			self.triggers.retain(|t| !out.iter().any(|o| Rc::ptr_eq(t, o)));
			Self::sort_triggers(&mut self.triggers);
		}
	}

	fn sort_triggers(triggers: &mut [TriggerHandle]) {
		triggers.sort_by(|a, b| {
			let (a, b) = (a.borrow(), b.borrow());
			a.time_remaining()
				.partial_cmp(&b.time_remaining())
				.unwrap_or(std::cmp::Ordering::Equal)
				.then_with(|| a.seq().cmp(&b.seq()))
		});
	}
}

impl std::fmt::Debug for TimeThread {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TimeThread")
			.field("role", &self.role)
			.field("time_rate", &self.time_rate)
			.field("time_scale", &self.time_scale)
			.field("pause_keys", &self.pause_keys)
			.field("triggers", &self.triggers.len())
			.finish_non_exhaustive()
	}
}
