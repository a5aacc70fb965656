//! Virtual clock behavior through the public facade.

use std::cell::RefCell;
use std::rc::Rc;

use zerog_rs::prelude::*;

const DT: f32 = 1.0 / 60.0;
const MENU: PauseKey = PauseKey(1);
const DIALOGUE: PauseKey = PauseKey(2);

#[test]
fn keeper_owns_one_thread_per_role() {
	let mut keeper = TimeKeeper::new();
	keeper.fixed_update(DT);
	for role in ThreadRole::ALL {
		assert_eq!(keeper.thread(role).role(), role);
		assert!(keeper.thread(role).delta_time() > 0.0);
	}
}

#[test]
fn pause_reference_counting_across_ticks() {
	let mut keeper = TimeKeeper::new();
	let gameplay = keeper.thread_mut(ThreadRole::Gameplay);
	gameplay.queue_pause(MENU);
	gameplay.queue_pause(DIALOGUE);
	keeper.fixed_update(DT);
	assert_eq!(keeper.thread(ThreadRole::Gameplay).delta_time(), 0.0);

	keeper.thread_mut(ThreadRole::Gameplay).queue_unpause(MENU);
	keeper.fixed_update(DT);
	assert_eq!(
		keeper.thread(ThreadRole::Gameplay).delta_time(),
		0.0,
		"dialogue still holds the pause"
	);

	keeper.thread_mut(ThreadRole::Gameplay).queue_unpause(DIALOGUE);
	keeper.fixed_update(DT);
	assert!(keeper.thread(ThreadRole::Gameplay).delta_time() > 0.0);
}

#[test]
fn pausing_gameplay_leaves_other_threads_running() {
	let mut keeper = TimeKeeper::new();
	keeper.thread_mut(ThreadRole::Gameplay).queue_pause(MENU);
	keeper.fixed_update(DT);
	assert!(keeper.thread(ThreadRole::Gameplay).is_paused());
	assert!(!keeper.thread(ThreadRole::Field).is_paused());
	assert!(keeper.thread(ThreadRole::Cinematic).delta_time() > 0.0);
	assert_eq!(keeper.thread(ThreadRole::Application).delta_time(), DT);
}

#[test]
fn triggers_fire_in_remaining_time_order() {
	let order = Rc::new(RefCell::new(Vec::new()));
	let mut keeper = TimeKeeper::new();
	let thread = keeper.thread_mut(ThreadRole::Field);
	let o = Rc::clone(&order);
	thread.add_trigger(3.0 * DT, move |_| o.borrow_mut().push("late"), false);
	let o = Rc::clone(&order);
	thread.add_trigger(DT, move |_| o.borrow_mut().push("early"), false);
	for _ in 0..3 {
		keeper.fixed_update(DT);
	}
	assert_eq!(*order.borrow(), vec!["early", "late"]);
}

#[test]
fn proceeding_trigger_repeats_on_the_thread_clock() {
	let fired = Rc::new(RefCell::new(0));
	let mut keeper = TimeKeeper::new();
	let f = Rc::clone(&fired);
	keeper.thread_mut(ThreadRole::Gameplay).add_trigger(
		2.0 * DT,
		move |trigger| {
			*f.borrow_mut() += 1;
			trigger.proceed();
		},
		false,
	);
	for _ in 0..4 {
		keeper.fixed_update(DT);
	}
	assert_eq!(*fired.borrow(), 2);

	// Pausing the thread stops the repetition.
	keeper.thread_mut(ThreadRole::Gameplay).queue_pause(MENU);
	for _ in 0..4 {
		keeper.fixed_update(DT);
	}
	assert_eq!(*fired.borrow(), 2);
}

#[test]
fn freeze_pauses_then_auto_unpauses() {
	let mut keeper = TimeKeeper::new();
	keeper.thread_mut(ThreadRole::Field).queue_freeze(2.0 * DT, PauseKey::FREEZE);
	keeper.fixed_update(DT);
	assert!(keeper.thread(ThreadRole::Field).is_paused());
	keeper.fixed_update(DT);
	keeper.fixed_update(DT);
	assert!(!keeper.thread(ThreadRole::Field).is_paused());
}

#[test]
fn scaled_time_slows_playback_pacing() {
	let mut keeper = TimeKeeper::new();
	keeper
		.thread_mut(ThreadRole::Gameplay)
		.queue_time_rate(TimeRate::Scaled, 0.5, PauseKey::TIME_RATE);
	keeper.fixed_update(DT);
	let delta = keeper.thread(ThreadRole::Gameplay).delta_time();
	assert!((delta - DT * 0.5).abs() < TIME_EPSILON);
}

#[test]
fn cinematic_wait_runs_on_the_cinematic_thread() {
	struct NoopHost;
	impl CinematicHost for NoopHost {
		fn begin_action(&mut self, _action: &CinematicAction, _done: CompletionSignal) {}
	}

	let mut keeper = TimeKeeper::new();
	let mut director = CinematicDirector::new();
	let mut host = NoopHost;
	director.run_sequence(CinematicSequence::new("beat").with_action(CinematicAction::wait(2.0 * DT)));

	// Pause the cinematic thread: its delta is 0, so the wait never
	// elapses.
	keeper.thread_mut(ThreadRole::Cinematic).queue_pause(MENU);
	keeper.fixed_update(DT);
	for _ in 0..8 {
		keeper.fixed_update(DT);
		director.tick(keeper.thread(ThreadRole::Cinematic).delta_time(), &mut host);
	}
	assert_eq!(director.active_sequence_count(), 1);

	keeper.thread_mut(ThreadRole::Cinematic).queue_unpause(MENU);
	for _ in 0..4 {
		keeper.fixed_update(DT);
		director.tick(keeper.thread(ThreadRole::Cinematic).delta_time(), &mut host);
	}
	assert_eq!(director.active_sequence_count(), 0);
}
