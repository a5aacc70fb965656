//! Frame sequences: a named frame-spec plus playback metadata.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::spec::{self, FrameSpecIssue};
use super::PlayCountRange;

/// When a sequence-scoped audio event fires relative to the play loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioPlayStyle {
	/// Never fire.
	#[default]
	None,
	/// Fire only during the first play of the sequence.
	PlayOnce,
	/// Fire during every play of the sequence.
	PlayEachIteration,
}

/// An audio event bound to a position inside a frame sequence.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrigger {
	/// The audio event to post.
	pub audio_event: String,
	/// When the trigger fires relative to the play loop.
	pub play_style: AudioPlayStyle,
	/// Frame-list index (not frame number) the trigger fires on.
	pub frame_delay: usize,
}

impl AudioTrigger {
	/// Creates a trigger that fires on the given frame-list index.
	pub fn new(audio_event: impl Into<String>, play_style: AudioPlayStyle, frame_delay: usize) -> Self {
		Self {
			audio_event: audio_event.into(),
			play_style,
			frame_delay,
		}
	}
}

/// A named run of frames within a [`RasterAnimation`], selected with a
/// frame-spec string and played a randomizable number of times.
///
/// The frame list is compiled from the spec string by [`validate`], which
/// must run before playback; an unvalidated sequence has an empty frame
/// list.
///
/// [`RasterAnimation`]: super::RasterAnimation
/// [`validate`]: FrameSequence::validate
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FrameSequence {
	/// Sequence name, for logs and editor display.
	pub name: String,
	/// The frame-spec source string.
	pub frames: String,
	/// How many times the sequence plays each time it is entered.
	pub play_count: PlayCountRange,
	/// Action identifiers that allow jumping into this sequence.
	pub pre_sequence_actions: Vec<i32>,
	/// Audio events bound to positions inside the sequence.
	pub audio_triggers: Vec<AudioTrigger>,
	#[serde(skip)]
	frame_list: Vec<u32>,
	#[serde(skip)]
	issues: Vec<FrameSpecIssue>,
}

impl FrameSequence {
	/// Creates a sequence from a name and a frame-spec string.
	///
	/// Call [`validate`](FrameSequence::validate) before playback.
	pub fn new(name: impl Into<String>, frames: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			frames: frames.into(),
			play_count: PlayCountRange::default(),
			pre_sequence_actions: Vec::new(),
			audio_triggers: Vec::new(),
			frame_list: Vec::new(),
			issues: Vec::new(),
		}
	}

	/// Sets the play-count range.
	pub fn with_play_count(mut self, play_count: PlayCountRange) -> Self {
		self.play_count = play_count;
		self
	}

	/// Adds a pre-sequence action identifier.
	pub fn with_pre_sequence_action(mut self, action: i32) -> Self {
		self.pre_sequence_actions.push(action);
		self
	}

	/// Adds an audio trigger.
	pub fn with_audio_trigger(mut self, trigger: AudioTrigger) -> Self {
		self.audio_triggers.push(trigger);
		self
	}

	/// Compiles the frame-spec string and normalizes the metadata.
	///
	/// Returns the issues found while compiling the spec. Must be called
	/// again after editing [`frames`](FrameSequence::frames), and after
	/// deserializing (the compiled frame list is not persisted).
	pub fn validate(&mut self) -> &[FrameSpecIssue] {
		self.name = self.name.trim().to_owned();
		if self.play_count.min_value == 0 && self.play_count.max_value == 0 && self.play_count.min_inclusive {
			self.play_count.min_value = 1;
		}
		let compiled = spec::compile_frame_spec(&self.frames);
		self.frame_list = compiled.frames().to_vec();
		self.issues = compiled.issues().to_vec();
		&self.issues
	}

	/// Returns the compiled frame list (1-based frame numbers).
	pub fn frame_list(&self) -> &[u32] {
		&self.frame_list
	}

	/// Returns the issues found by the last [`validate`](FrameSequence::validate).
	pub fn issues(&self) -> &[FrameSpecIssue] {
		&self.issues
	}

	/// Returns true if this sequence can resolve to a play count of 1 or
	/// more. Unplayable sequences are skipped during playback.
	pub fn is_playable(&self) -> bool {
		self.play_count.is_playable()
	}
}

impl Display for FrameSequence {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"FrameSequence `{}`: `{}` ({} frames, {})",
			self.name,
			self.frames,
			self.frame_list.len(),
			self.play_count
		)
	}
}
