//! The playback state machine for a raster animation.

use std::collections::VecDeque;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use zerog_types::anim::{
	AudioPlayStyle, AudioTrigger, FRAME_SEQUENCE_COUNT_MAX, INFINITE_PLAY_COUNT, RasterAnimation,
};

use super::{LoopMode, PlaybackError, PlaybackOptions, StateEvent};

const ADVANCE: bool = true;
const REVERSE: bool = false;

/// Playback state for one [`RasterAnimation`].
///
/// The state owns a cursor into the current sequence's frame list and
/// resolves sequence play counts with its own RNG. Navigation methods
/// return the settled 1-based frame number, or `None` once the animation
/// has finished; lifecycle transitions are queued as [`StateEvent`]s for
/// the host to drain.
///
/// Construction fails when no sequence in the animation can resolve to a
/// play count of 1 or more.
#[derive(Debug)]
pub struct RasterAnimationState {
	animation: Rc<RasterAnimation>,
	options: PlaybackOptions,
	loop_mode: LoopMode,
	/// Completed whole-animation loops; goes negative in reverse playback.
	loop_index: i32,
	sequence_index: usize,
	frame_list: Vec<u32>,
	play_count: u32,
	play_index: u32,
	frame_list_index: usize,
	rng: SmallRng,
	events: VecDeque<StateEvent>,
}

impl RasterAnimationState {
	/// Creates a state positioned on the first playable sequence's first
	/// frame.
	///
	/// The entry events (sequence started, play loop started, frame
	/// changed) are already queued on return.
	pub fn new(animation: Rc<RasterAnimation>, options: PlaybackOptions) -> Result<Self, PlaybackError> {
		if !animation.has_playable_frame_sequences() {
			return Err(PlaybackError::NoPlayableSequences {
				name: animation.name.clone(),
			});
		}
		let rng = match options.rng_seed {
			Some(seed) => SmallRng::seed_from_u64(seed),
			None => SmallRng::from_os_rng(),
		};
		let loop_mode = options.loop_mode;
		let mut state = Self {
			animation,
			options,
			loop_mode,
			loop_index: 0,
			sequence_index: 0,
			frame_list: Vec::new(),
			play_count: 0,
			play_index: 0,
			frame_list_index: 0,
			rng,
			events: VecDeque::new(),
		};
		state.reset();
		Ok(state)
	}

	/// Rewinds to the first playable sequence's first frame.
	pub fn reset(&mut self) {
		self.loop_index = 0;
		if self.set_frame_sequence(0, ADVANCE) {
			self.frame_list_index = 0;
			self.on_frame_changed();
		}
	}

	/// Overrides the loop behavior from here on.
	pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
		self.loop_mode = loop_mode;
	}

	/// Drains the queued lifecycle events in order.
	pub fn drain_events(&mut self) -> impl Iterator<Item = StateEvent> + '_ {
		self.events.drain(..)
	}

	/// The animation being played.
	pub fn animation(&self) -> &RasterAnimation {
		&self.animation
	}

	/// Index of the current sequence within the animation.
	pub fn sequence_index(&self) -> usize {
		self.sequence_index
	}

	/// Resolved play count of the current sequence.
	pub fn play_count(&self) -> u32 {
		self.play_count
	}

	/// Which play of the current sequence is in progress, counting from 0.
	pub fn play_index(&self) -> u32 {
		self.play_index
	}

	/// Completed whole-animation loops; negative in reverse playback.
	pub fn loop_index(&self) -> i32 {
		self.loop_index
	}

	/// Position of the cursor within the current sequence's frame list.
	pub fn frame_list_index(&self) -> usize {
		self.frame_list_index
	}

	/// The 1-based frame number under the cursor, or 0 for an empty
	/// sequence.
	pub fn current_frame_number(&self) -> u32 {
		self.frame_list.get(self.frame_list_index).copied().unwrap_or(0)
	}

	/// Steps the cursor forward one frame.
	///
	/// In order of precedence: the next frame in the list, another play of
	/// the sequence, the next sequence, an animation loop back to the
	/// loop-to sequence. Returns `None` when none apply: the animation is
	/// finished and its final stop events are queued.
	pub fn advance_frame(&mut self) -> Option<u32> {
		if self.frame_list_index + 1 < self.frame_list.len() {
			self.frame_list_index += 1;
		} else if self.check_frame_sequence_loop(ADVANCE) {
			self.push_play_loop_stopped();
			self.play_index += 1;
			self.frame_list_index = 0;
			self.push_play_loop_started();
		} else if self.sequence_index + 1 < self.animation.frame_sequence_count() {
			self.push_stop_events();
			if !self.set_frame_sequence(self.sequence_index as isize + 1, ADVANCE) {
				return Some(self.current_frame_number());
			}
			self.frame_list_index = 0;
		} else if self.check_animation_loop(ADVANCE) {
			self.push_stop_events();
			self.loop_index += 1;
			let target = self.animation.loop_to_sequence as isize;
			if !self.set_frame_sequence(target, ADVANCE) {
				return Some(self.current_frame_number());
			}
			self.frame_list_index = 0;
		} else {
			self.push_stop_events();
			return None;
		}
		self.on_frame_changed();
		Some(self.current_frame_number())
	}

	/// Steps the cursor backward one frame; the mirror of
	/// [`advance_frame`](RasterAnimationState::advance_frame).
	///
	/// Reverse playback never exhausts the animation's loop count, so with
	/// looping enabled it only returns `None` on a skip-guard failure.
	pub fn reverse_frame(&mut self) -> Option<u32> {
		if self.frame_list_index > 0 {
			self.frame_list_index -= 1;
		} else if self.check_frame_sequence_loop(REVERSE) {
			self.push_play_loop_stopped();
			self.play_index = self.play_index.saturating_sub(1);
			self.frame_list_index = self.frame_list.len().saturating_sub(1);
			self.push_play_loop_started();
		} else if self.sequence_index > 0 {
			self.push_stop_events();
			if !self.set_frame_sequence(self.sequence_index as isize - 1, REVERSE) {
				return Some(self.current_frame_number());
			}
			self.frame_list_index = self.frame_list.len().saturating_sub(1);
		} else if self.check_animation_loop(REVERSE) {
			self.push_stop_events();
			self.loop_index -= 1;
			let last = self.animation.frame_sequence_count() as isize - 1;
			if !self.set_frame_sequence(last, REVERSE) {
				return Some(self.current_frame_number());
			}
			self.frame_list_index = self.frame_list.len().saturating_sub(1);
		} else {
			self.push_stop_events();
			return None;
		}
		self.on_frame_changed();
		Some(self.current_frame_number())
	}

	/// Abandons the current sequence and enters the next one from its
	/// first frame, looping the animation when already on the last.
	pub fn advance_frame_sequence(&mut self) -> Option<u32> {
		if self.sequence_index + 1 < self.animation.frame_sequence_count() {
			self.push_stop_events();
			if !self.set_frame_sequence(self.sequence_index as isize + 1, ADVANCE) {
				return Some(self.current_frame_number());
			}
		} else if self.check_animation_loop(ADVANCE) {
			self.push_stop_events();
			self.loop_index += 1;
			let target = self.animation.loop_to_sequence as isize;
			if !self.set_frame_sequence(target, ADVANCE) {
				return Some(self.current_frame_number());
			}
		} else {
			self.push_stop_events();
			return None;
		}
		self.frame_list_index = 0;
		self.on_frame_changed();
		Some(self.current_frame_number())
	}

	/// Abandons the current sequence and enters the previous one from its
	/// first frame.
	pub fn reverse_frame_sequence(&mut self) -> Option<u32> {
		if self.sequence_index > 0 {
			self.push_stop_events();
			if !self.set_frame_sequence(self.sequence_index as isize - 1, REVERSE) {
				return Some(self.current_frame_number());
			}
		} else if self.check_animation_loop(REVERSE) {
			self.push_stop_events();
			self.loop_index -= 1;
			let last = self.animation.frame_sequence_count() as isize - 1;
			if !self.set_frame_sequence(last, REVERSE) {
				return Some(self.current_frame_number());
			}
		} else {
			self.push_stop_events();
			return None;
		}
		// Entering in reverse still plays the sequence from its beginning.
		self.frame_list_index = 0;
		self.on_frame_changed();
		Some(self.current_frame_number())
	}

	/// Jumps to the first sequence carrying the given pre-sequence action,
	/// searching forward from the current sequence and wrapping around.
	///
	/// Returns `None` when no sequence carries the action; the state is
	/// left untouched in that case.
	pub fn go_to_sequence_with_pre_action(&mut self, action: i32) -> Option<u32> {
		self.go_to_sequence_with_any_pre_action(&[action])
	}

	/// Like
	/// [`go_to_sequence_with_pre_action`](RasterAnimationState::go_to_sequence_with_pre_action),
	/// matching any of the given actions.
	pub fn go_to_sequence_with_any_pre_action(&mut self, actions: &[i32]) -> Option<u32> {
		let count = self.animation.frame_sequence_count();
		let order = (self.sequence_index..count).chain(0..self.sequence_index);
		for i in order {
			let matched = self
				.animation
				.sequence(i)
				.is_some_and(|seq| seq.pre_sequence_actions.iter().any(|a| actions.contains(a)));
			if !matched {
				continue;
			}
			self.push_stop_events();
			if !self.set_frame_sequence(i as isize, ADVANCE) {
				return None;
			}
			self.frame_list_index = 0;
			self.on_frame_changed();
			return Some(self.current_frame_number());
		}
		None
	}

	/// Enters the sequence at `index`, wrapping out-of-range indexes and
	/// skipping sequences whose play count resolves to 0.
	///
	/// Returns false without touching the state when the skip guard trips.
	/// Queues the sequence-started and play-loop-started events on
	/// success.
	fn set_frame_sequence(&mut self, index: isize, advance: bool) -> bool {
		let count = self.animation.frame_sequence_count() as isize;
		debug_assert!(count > 0);
		let mut index = index;
		let mut skipped = 0;
		let resolved = loop {
			if index >= count {
				index = 0;
			} else if index < 0 {
				index = count - 1;
			}
			// In range after the wrap above.
			let seq = &self.animation.sequences()[index as usize];
			let play_count = seq.play_count.random_value(&mut self.rng);
			if play_count > 0 {
				break play_count;
			}
			skipped += 1;
			if skipped >= FRAME_SEQUENCE_COUNT_MAX {
				log::error!(
					"RasterAnimation `{}`: stuck skipping unplayable frame sequences",
					self.animation.name
				);
				return false;
			}
			index += if advance { 1 } else { -1 };
		};
		let play_count = if resolved >= INFINITE_PLAY_COUNT {
			if self.options.infinite_loop_replacement > 0 {
				self.options.infinite_loop_replacement
			} else {
				u32::MAX
			}
		} else {
			resolved
		};
		let seq = &self.animation.sequences()[index as usize];
		self.sequence_index = index as usize;
		self.frame_list = seq.frame_list().to_vec();
		self.play_count = play_count;
		self.play_index = if advance { 0 } else { play_count - 1 };
		self.events.push_back(StateEvent::FrameSequenceStarted {
			sequence_index: self.sequence_index,
		});
		self.push_play_loop_started();
		true
	}

	fn check_frame_sequence_loop(&self, advance: bool) -> bool {
		match self.loop_mode {
			LoopMode::LoopSequence => true,
			LoopMode::LoopNothing => false,
			_ => {
				if advance {
					self.play_index + 1 < self.play_count
				} else {
					self.play_index > 0
				}
			}
		}
	}

	fn check_animation_loop(&self, advance: bool) -> bool {
		match self.loop_mode {
			LoopMode::LoopAnimationOn => true,
			LoopMode::LoopAnimationOff | LoopMode::LoopNothing => false,
			_ => self.animation.does_loop(self.loop_index, advance),
		}
	}

	fn check_play_audio(&self, trigger: &AudioTrigger) -> bool {
		if trigger.frame_delay != self.frame_list_index {
			return false;
		}
		match trigger.play_style {
			AudioPlayStyle::None => false,
			AudioPlayStyle::PlayOnce => self.play_index == 0,
			AudioPlayStyle::PlayEachIteration => true,
		}
	}

	/// Queues the frame-changed event and any audio triggers matching the
	/// settled frame.
	fn on_frame_changed(&mut self) {
		self.events.push_back(StateEvent::FrameChanged {
			frame_list_index: self.frame_list_index,
			frame_number: self.current_frame_number(),
		});
		let Some(seq) = self.animation.sequence(self.sequence_index) else {
			return;
		};
		let fired: Vec<AudioTrigger> = seq
			.audio_triggers
			.iter()
			.filter(|t| self.check_play_audio(t))
			.cloned()
			.collect();
		for trigger in fired {
			self.events.push_back(StateEvent::AudioTriggered(trigger));
		}
	}

	fn push_play_loop_started(&mut self) {
		self.events.push_back(StateEvent::FrameSequencePlayLoopStarted {
			sequence_index: self.sequence_index,
			play_index: self.play_index,
		});
	}

	fn push_play_loop_stopped(&mut self) {
		self.events.push_back(StateEvent::FrameSequencePlayLoopStopped {
			sequence_index: self.sequence_index,
			play_index: self.play_index,
		});
	}

	/// Final play loop stopped, then the sequence stopped.
	fn push_stop_events(&mut self) {
		self.push_play_loop_stopped();
		self.events.push_back(StateEvent::FrameSequenceStopped {
			sequence_index: self.sequence_index,
		});
	}
}
