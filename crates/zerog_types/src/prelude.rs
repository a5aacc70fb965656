//! Prelude module for `zerog_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use zerog_types::prelude::*;
//!
//! // Now you can use all common types directly
//! let compiled = compile_frame_spec("1-4x2");
//! let seq = FrameSequence::new("walk", "1-4");
//! ```

#[doc(inline)]
pub use crate::anim::{
	// Constants
	FRAME_PARAGRAPH_LINE_MAX,
	FRAME_SEQUENCE_COUNT_MAX,
	INFINITE_PLAY_COUNT,
	NUMBER_MAX_LENGTH,
	RASTER_ANIMATION_SUFFIX,

	// Audio types
	AudioPlayStyle,
	AudioTrigger,

	// Frame-spec compiler
	CompiledFrameSpec,
	FrameSpecIssue,

	// Animation types
	FrameSequence,
	PlayCountRange,
	RasterAnimation,

	compile_frame_spec,
};

#[doc(inline)]
pub use crate::elanic::{
	// Constants
	ELANIC_DATA_SUFFIX,

	// Codec types
	ElanicData,
	ElanicError,
	ElanicFrame,
};

#[doc(inline)]
pub use crate::graphics::{Color32, FrameImage};
