//! Frame-spec compilation driving playback through the public facade.

use std::rc::Rc;

use zerog_rs::prelude::*;

fn seeded() -> PlaybackOptions {
	PlaybackOptions::new().with_rng_seed(7)
}

#[test]
fn compiler_grammar_basics() {
	assert_eq!(compile_frame_spec("1-5").frames(), &[1, 2, 3, 4, 5]);
	assert_eq!(compile_frame_spec("5-1").frames(), &[5, 4, 3, 2, 1]);
	assert_eq!(compile_frame_spec("1-3x2").frames(), &[1, 2, 3, 1, 2, 3]);
	assert_eq!(compile_frame_spec("1,3,5").frames(), &[1, 3, 5]);
	// Deterministic: same source, same result.
	assert_eq!(compile_frame_spec("(1,2)x2,9").frames(), compile_frame_spec("(1,2)x2,9").frames());
}

#[test]
fn equal_range_endpoints_degrade_without_crashing() {
	let compiled = compile_frame_spec("3-3");
	assert_eq!(compiled.frames(), &[3]);
	assert_eq!(compiled.issues().len(), 1);
}

#[test]
fn extender_remainder_is_appended_once() {
	// The right operand's first value is the repeat count; the rest is a
	// one-time trailing remainder.
	assert_eq!(compile_frame_spec("1x(3,2)").frames(), &[1, 1, 1, 2]);
}

#[test]
fn two_sequence_animation_plays_to_completion() {
	let mut anim = RasterAnimation::new("Walk_RasterAnimation", 4, 4, 0.05)
		.with_sequence(
			FrameSequence::new("step", "1-2")
				.with_play_count(zerog_rs::zerog_types::anim::PlayCountRange::exactly(2)),
		)
		.with_sequence(FrameSequence::new("rest", "3"));
	anim.loop_enabled = false;
	anim.validate();

	let mut state = RasterAnimationState::new(Rc::new(anim), seeded()).unwrap();
	let mut visited = vec![state.current_frame_number()];
	while let Some(frame) = state.advance_frame() {
		visited.push(frame);
	}
	// Sequence 0 twice, sequence 1 once, then finished.
	assert_eq!(visited, vec![1, 2, 1, 2, 3]);

	let events: Vec<_> = state.drain_events().collect();
	let play_loops = events
		.iter()
		.filter(|e| matches!(e, StateEvent::FrameSequencePlayLoopStarted { .. }))
		.count();
	assert_eq!(play_loops, 3, "two plays of sequence 0, one of sequence 1");
	assert!(matches!(
		events.last(),
		Some(StateEvent::FrameSequenceStopped { sequence_index: 1 })
	));
}

#[test]
fn fully_unplayable_animation_is_a_configuration_error() {
	let unplayable = zerog_rs::zerog_types::anim::PlayCountRange {
		min_value: 0,
		max_value: 0,
		min_inclusive: false,
		max_inclusive: false,
	};
	let mut anim = RasterAnimation::new("Broken_RasterAnimation", 4, 4, 0.05)
		.with_sequence(FrameSequence::new("a", "1").with_play_count(unplayable))
		.with_sequence(FrameSequence::new("b", "2").with_play_count(unplayable));
	anim.validate();

	assert!(matches!(
		RasterAnimationState::new(Rc::new(anim), seeded()),
		Err(PlaybackError::NoPlayableSequences { .. })
	));
}

#[test]
fn malformed_spec_degrades_the_sequence_only() {
	let mut anim = RasterAnimation::new("Rough_RasterAnimation", 4, 4, 0.05)
		.with_sequence(FrameSequence::new("bad", "x2"))
		.with_sequence(FrameSequence::new("good", "1-2"));
	let issue_count = anim.validate();
	assert!(issue_count > 0);
	assert!(anim.sequence(0).unwrap().frame_list().is_empty());

	// The degraded sequence plays as empty; the intact one is unaffected.
	let mut state = RasterAnimationState::new(Rc::new(anim), seeded()).unwrap();
	assert_eq!(state.current_frame_number(), 0);
	assert_eq!(state.advance_frame(), Some(1));
	assert_eq!(state.advance_frame(), Some(2));
}
