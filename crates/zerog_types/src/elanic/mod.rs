//! ELANIC lossless delta-compression codec for animation frame strips.
//!
//! ELANIC stores an animation's frames as a small set of full **imprint**
//! images plus, for every other frame, a sparse diff against the most
//! recent imprint. Frame 0 and the first frame of every frame sequence
//! become imprints; sequences always start on a pristine image.
//!
//! # Data Layout
//!
//! ```text
//! Field       Type               Description
//! ---------   ----------------   -----------------------------------------
//! imprints    [FrameImage]       Full images, in order of first use
//! colors      [Color32]          Shared palette; index 0 is always the
//!                                transparent clear color
//! frames      [ElanicFrame]      One entry per animation frame, in order
//! ```
//!
//! Each [`ElanicFrame`] holds the index of its imprint and two parallel
//! diff arrays:
//!
//! ```text
//! Field                    Type      Description
//! ----------------------   -------   --------------------------------------
//! imprint_index            usize     Index into `imprints`
//! diff_pixel_position      [u32]     Flat pixel positions, ascending
//! diff_pixel_color_index   [i16]     Palette indices, or a run marker
//! ```
//!
//! A color index of `-1` is a run marker: fill from the previous diff
//! position (exclusive) up to and including this position with the
//! previous entry's color. The encoder guarantees run markers never
//! appear first and never chain, so the previous entry's index is always
//! a real palette index.
//!
//! An imprint's own frame entry has empty diff arrays; decoding it is a
//! plain copy of the imprint image.
//!
//! # Errors
//!
//! Encoding and decoding are strict: mismatched frame dimensions, out of
//! range indices, or a palette past `i16::MAX` entries fail with an
//! [`ElanicError`]. Corrupted side-car data is not playable data.

mod data;
mod decode;
mod encode;

pub use data::{ElanicData, ElanicFrame};
pub use decode::{decode_frame, decode_frames};
pub use encode::encode;

use thiserror::Error;

/// Suffix appended to animation base names when deriving the side-car
/// asset name.
pub const ELANIC_DATA_SUFFIX: &str = "_ElanicData";

/// Errors for ELANIC encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ElanicError {
	/// A frame image's dimensions don't match the animation's.
	#[error("frame {frame_index} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
	DimensionMismatch {
		/// Index of the offending frame.
		frame_index: usize,
		/// Expected frame width.
		expected_width: u32,
		/// Expected frame height.
		expected_height: u32,
		/// Actual frame width.
		actual_width: u32,
		/// Actual frame height.
		actual_height: u32,
	},
	/// The requested frame index is past the end of the frame table.
	#[error("frame index {index} out of range (frame count: {count})")]
	FrameIndexOutOfRange {
		/// The requested frame index.
		index: usize,
		/// Number of frames in the data.
		count: usize,
	},
	/// A frame references an imprint past the end of the imprint table.
	#[error("frame {frame_index} references imprint {imprint_index} (imprint count: {count})")]
	ImprintIndexOutOfRange {
		/// Index of the offending frame.
		frame_index: usize,
		/// The referenced imprint index.
		imprint_index: usize,
		/// Number of imprints in the data.
		count: usize,
	},
	/// A diff entry references a palette index past the end of the table.
	#[error("frame {frame_index} references color {color_index} (color count: {count})")]
	ColorIndexOutOfRange {
		/// Index of the offending frame.
		frame_index: usize,
		/// The referenced palette index.
		color_index: i16,
		/// Number of palette entries in the data.
		count: usize,
	},
	/// A diff entry's pixel position is outside the frame.
	#[error("frame {frame_index} has a diff at pixel {position} (pixel count: {pixel_count})")]
	DiffPositionOutOfRange {
		/// Index of the offending frame.
		frame_index: usize,
		/// The offending flat pixel position.
		position: u32,
		/// Number of pixels per frame.
		pixel_count: usize,
	},
	/// The palette grew past what an `i16` diff entry can reference.
	#[error("palette overflow: {count} colors exceed the i16 index space")]
	PaletteOverflow {
		/// Number of palette entries at the point of failure.
		count: usize,
	},
}
