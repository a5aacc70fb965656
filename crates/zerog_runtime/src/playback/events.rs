use zerog_types::anim::AudioTrigger;

/// A playback lifecycle transition, queued in order for the host to drain.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
	/// A frame sequence was entered.
	FrameSequenceStarted {
		/// Index of the sequence within the animation.
		sequence_index: usize,
	},
	/// A frame sequence was left, after its final play loop stopped.
	FrameSequenceStopped {
		/// Index of the sequence within the animation.
		sequence_index: usize,
	},
	/// One play of the current sequence's frame list began.
	FrameSequencePlayLoopStarted {
		/// Index of the sequence within the animation.
		sequence_index: usize,
		/// Which play this is, counting from 0.
		play_index: u32,
	},
	/// One play of the current sequence's frame list ended.
	FrameSequencePlayLoopStopped {
		/// Index of the sequence within the animation.
		sequence_index: usize,
		/// Which play just ended, counting from 0.
		play_index: u32,
	},
	/// The frame cursor settled on a frame.
	FrameChanged {
		/// Position within the current sequence's frame list.
		frame_list_index: usize,
		/// The 1-based frame number at that position.
		frame_number: u32,
	},
	/// An audio trigger matched the settled frame.
	AudioTriggered(AudioTrigger),
}
