//! ELANIC side-car data structures.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::graphics::{Color32, FrameImage};

/// The ELANIC side-car for one animation: imprints, shared palette, and
/// one [`ElanicFrame`] per animation frame.
///
/// See the [module docs](crate::elanic) for the layout and invariants.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElanicData {
	/// Full images, in order of first use.
	pub imprints: Vec<FrameImage>,
	/// Shared palette; index 0 is always the transparent clear color.
	pub colors: Vec<Color32>,
	/// One entry per animation frame, in animation order.
	pub frames: Vec<ElanicFrame>,
}

impl ElanicData {
	/// Returns the number of animation frames described.
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns the total number of diff entries across all frames.
	pub fn diff_entry_count(&self) -> usize {
		self.frames.iter().map(ElanicFrame::diff_pixel_count).sum()
	}

	/// Returns the number of pixels stored raw (imprints only), the
	/// uncompressed equivalent being `frame_count * pixels_per_frame`.
	pub fn raw_pixel_count(&self) -> usize {
		self.imprints.iter().map(FrameImage::pixel_count).sum()
	}
}

impl Display for ElanicData {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"ElanicData: {} frames, {} imprints, {} colors, {} diff entries",
			self.frames.len(),
			self.imprints.len(),
			self.colors.len(),
			self.diff_entry_count()
		)
	}
}

/// One animation frame in ELANIC form: an imprint reference plus a sparse
/// diff.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElanicFrame {
	/// Index into [`ElanicData::imprints`].
	pub imprint_index: usize,
	/// Flat pixel positions of the diff entries, ascending.
	pub diff_pixel_position: Vec<u32>,
	/// Palette index per diff entry; `-1` is the run marker.
	pub diff_pixel_color_index: Vec<i16>,
}

impl ElanicFrame {
	/// Creates the frame entry for an imprint itself: no diff data.
	pub fn imprint(imprint_index: usize) -> Self {
		Self {
			imprint_index,
			diff_pixel_position: Vec::new(),
			diff_pixel_color_index: Vec::new(),
		}
	}

	/// Returns the number of diff entries.
	pub fn diff_pixel_count(&self) -> usize {
		self.diff_pixel_position.len()
	}

	/// Returns true if this frame differs from its imprint.
	pub fn has_diff_data(&self) -> bool {
		!self.diff_pixel_position.is_empty()
	}
}
