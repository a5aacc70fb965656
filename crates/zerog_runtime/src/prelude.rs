//! Prelude module for `zerog_runtime`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```
//! use zerog_runtime::prelude::*;
//!
//! let mut keeper = TimeKeeper::new();
//! keeper.fixed_update(1.0 / 60.0);
//! let delta = keeper.thread(ThreadRole::Gameplay).delta_time();
//! assert!(delta > 0.0);
//! ```

// Playback types
#[doc(inline)]
pub use crate::playback::{
	LoopMode,
	PlaybackError,
	PlaybackOptions,
	RasterAnimationState,
	StateEvent,
};

// Time types
#[doc(inline)]
pub use crate::time::{
	ObserverKey,
	PauseKey,
	ThreadRole,
	TIME_EPSILON,
	TimeKeeper,
	TimeRate,
	TimeThread,
	TimeTrigger,
	TriggerHandle,
};

// Cinematic types
#[doc(inline)]
pub use crate::cinematic::{
	CinematicAction,
	CinematicCommand,
	CinematicDirector,
	CinematicHost,
	CinematicSequence,
	CompletionSignal,
	DirectorEvent,
};
