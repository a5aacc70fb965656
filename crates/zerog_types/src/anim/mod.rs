//! Raster animation assets for the `zerog-rs` project.
//!
//! This module provides the authored data model for frame-based 2D
//! animations: a [`RasterAnimation`] names a strip of equally-sized frame
//! images and partitions it into [`FrameSequence`]s, each of which selects
//! frames with a compact frame-spec string and plays a randomizable number
//! of times.
//!
//! # Frame-Spec Mini-Language
//!
//! A frame spec is a single-line string compiled into an ordered list of
//! 1-based frame numbers:
//!
//! ```text
//! Token       Chars    Description
//! ---------   ------   ------------------------------------------------
//! number      0-9      Frame number, at most 3 digits (extra ignored)
//! range       - or t   Walk from the left number to the right number,
//!                      inclusive, ascending or descending
//! extender    x        Repeat the preceding resolved list N times
//! separator   ,        List separator; also an operand barrier
//! group       ( )      Resolve the enclosed spec first; the result acts
//!                      as a single list operand
//! ```
//!
//! Groups resolve innermost-first. Within each level, ranges and
//! separators resolve before extenders, so `1-3x2` repeats the whole
//! resolved run: `[1, 2, 3, 1, 2, 3]`.
//!
//! One deliberate quirk is preserved from the original engine: when the
//! extender's right operand is itself a list (from a group or a resolved
//! range), only its first value is the repeat count and the remaining
//! values are appended once as a trailing remainder, so `1x(3,2)` compiles
//! to `[1, 1, 1, 2]`.
//!
//! Malformed specs never abort compilation: every problem is recorded as a
//! [`FrameSpecIssue`] in the returned [`CompiledFrameSpec`] and the
//! compiler degrades to the best interpretation it can.
//!
//! # Play Counts
//!
//! Each sequence carries a [`PlayCountRange`] resolved to a concrete play
//! count (with a caller-supplied RNG) every time playback enters the
//! sequence. A resolved count of [`INFINITE_PLAY_COUNT`] or more means
//! "loop forever".

mod animation;
mod play_count;
mod sequence;
pub mod spec;

pub use animation::RasterAnimation;
pub use play_count::PlayCountRange;
pub use sequence::{AudioPlayStyle, AudioTrigger, FrameSequence};
pub use spec::{CompiledFrameSpec, FrameSpecIssue, compile_frame_spec};

/// Maximum number of digits in a frame-spec number.
pub const NUMBER_MAX_LENGTH: usize = 3;

/// Resolved play counts at or above this sentinel mean "loop forever".
pub const INFINITE_PLAY_COUNT: u32 = 100;

/// Upper bound on sequences skipped in one navigation before giving up.
pub const FRAME_SEQUENCE_COUNT_MAX: usize = 20;

/// Maximum number of lines accepted by
/// [`RasterAnimation::parse_frame_paragraph`].
pub const FRAME_PARAGRAPH_LINE_MAX: usize = 24;

/// Suffix stripped from animation asset names when deriving side-car names.
pub const RASTER_ANIMATION_SUFFIX: &str = "_RasterAnimation";
