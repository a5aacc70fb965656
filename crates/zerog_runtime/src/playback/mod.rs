//! Raster animation playback.
//!
//! [`RasterAnimationState`] is the playback state machine for one
//! [`RasterAnimation`](zerog_types::anim::RasterAnimation): it owns the
//! current sequence, play index, and frame-list cursor, and navigates
//! between frames and sequences under the animation's loop settings (or a
//! [`LoopMode`] override).
//!
//! # Events
//!
//! The state machine does not call back into the host. Every lifecycle
//! transition is pushed onto an ordered event queue the host drains after
//! each navigation call:
//!
//! ```text
//! entering a sequence     FrameSequenceStarted, FrameSequencePlayLoopStarted
//! sequence play loops     FrameSequencePlayLoopStopped, then after the
//!                         play index moves, FrameSequencePlayLoopStarted
//! leaving a sequence      FrameSequencePlayLoopStopped, FrameSequenceStopped
//! every settled frame     FrameChanged, then any matching AudioTriggered
//! ```
//!
//! # Navigation
//!
//! Navigation calls return `Some(frame_number)` while the animation keeps
//! playing and `None` once it has finished (final stop events are still
//! queued). Unplayable sequences (play count resolving to 0) are skipped,
//! with a [`FRAME_SEQUENCE_COUNT_MAX`](zerog_types::anim::FRAME_SEQUENCE_COUNT_MAX)
//! guard against scanning forever.

mod events;
mod options;
mod state;

pub use events::StateEvent;
pub use options::{LoopMode, PlaybackOptions};
pub use state::RasterAnimationState;

use thiserror::Error;

/// Errors for raster animation playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
	/// Every sequence in the animation resolves to a play count of 0.
	#[error("raster animation `{name}` has no playable frame sequences")]
	NoPlayableSequences {
		/// The animation's asset name.
		name: String,
	},
}
