//! The raster animation asset type.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::elanic::{ElanicData, ElanicError};
use crate::graphics::FrameImage;

use super::sequence::FrameSequence;
use super::{FRAME_PARAGRAPH_LINE_MAX, RASTER_ANIMATION_SUFFIX};

/// A frame-based 2D animation asset.
///
/// An animation names a strip of equally-sized frame images and partitions
/// it into [`FrameSequence`]s. The frame images themselves are either held
/// directly (the authored strip) or decoded on demand from an ELANIC
/// side-car; either way they are runtime data and are not persisted with
/// the asset.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RasterAnimation {
	/// Asset name, conventionally ending in
	/// [`RASTER_ANIMATION_SUFFIX`].
	pub name: String,
	/// Seconds each settled frame is displayed.
	pub seconds_per_frame: f32,
	/// Frame width in pixels; shared by every frame.
	pub width: u32,
	/// Frame height in pixels; shared by every frame.
	pub height: u32,
	/// Whether the animation loops after its last sequence finishes.
	pub loop_enabled: bool,
	/// How many additional times the animation loops; `None` loops
	/// indefinitely.
	pub loop_count: Option<i32>,
	/// Index of the sequence any loop restarts from.
	pub loop_to_sequence: usize,
	sequences: Vec<FrameSequence>,
	#[serde(skip)]
	textures: Vec<FrameImage>,
}

impl RasterAnimation {
	/// Creates an empty animation with the given frame dimensions.
	pub fn new(name: impl Into<String>, width: u32, height: u32, seconds_per_frame: f32) -> Self {
		Self {
			name: name.into(),
			seconds_per_frame,
			width,
			height,
			loop_enabled: true,
			loop_count: None,
			loop_to_sequence: 0,
			sequences: Vec::new(),
			textures: Vec::new(),
		}
	}

	/// Appends a frame sequence.
	pub fn add_sequence(&mut self, sequence: FrameSequence) {
		self.sequences.push(sequence);
	}

	/// Appends a frame sequence, builder style.
	#[must_use]
	pub fn with_sequence(mut self, sequence: FrameSequence) -> Self {
		self.add_sequence(sequence);
		self
	}

	/// Validates the asset: clamps the loop settings and validates every
	/// sequence, compiling their frame lists.
	///
	/// Returns the total number of frame-spec issues found. Must be
	/// called before playback and after deserializing.
	pub fn validate(&mut self) -> usize {
		if let Some(count) = self.loop_count {
			self.loop_count = Some(count.max(1));
		}
		let max = self.sequences.len().saturating_sub(1);
		self.loop_to_sequence = self.loop_to_sequence.min(max);
		let mut issue_count = 0;
		for seq in &mut self.sequences {
			issue_count += seq.validate().len();
		}
		issue_count
	}

	/// Returns all frame sequences.
	pub fn sequences(&self) -> &[FrameSequence] {
		&self.sequences
	}

	/// Returns the sequence at the given index, if in range.
	pub fn sequence(&self, index: usize) -> Option<&FrameSequence> {
		self.sequences.get(index)
	}

	/// Returns the number of frame sequences.
	pub fn frame_sequence_count(&self) -> usize {
		self.sequences.len()
	}

	/// Returns true if any sequence can resolve to a play count of 1 or
	/// more.
	pub fn has_playable_frame_sequences(&self) -> bool {
		self.sequences.iter().any(FrameSequence::is_playable)
	}

	/// Returns whether playback should loop the whole animation.
	///
	/// `loop_index` is the number of animation loops already completed;
	/// reverse playback never exhausts the loop count.
	pub fn does_loop(&self, loop_index: i32, advance: bool) -> bool {
		if !self.loop_enabled {
			return false;
		}
		match self.loop_count {
			None => true,
			Some(count) => {
				if advance {
					loop_index < count
				} else {
					loop_index >= 0
				}
			}
		}
	}

	/// Appends one bare frame sequence per non-empty line of `paragraph`,
	/// up to [`FRAME_PARAGRAPH_LINE_MAX`] lines; each line is both the
	/// sequence name and its frame spec.
	///
	/// A bulk-authoring convenience; call
	/// [`validate`](RasterAnimation::validate) afterwards.
	pub fn parse_frame_paragraph(&mut self, paragraph: &str) {
		for line in paragraph.trim().lines().take(FRAME_PARAGRAPH_LINE_MAX) {
			let line = line.trim();
			if line.is_empty() {
				continue;
			}
			self.sequences.push(FrameSequence::new(line, line));
		}
	}

	/// Returns the loaded frame images.
	pub fn textures(&self) -> &[FrameImage] {
		&self.textures
	}

	/// Returns the frame image for a 1-based frame number.
	pub fn texture(&self, frame_number: u32) -> Option<&FrameImage> {
		let index = (frame_number as usize).checked_sub(1)?;
		self.textures.get(index)
	}

	/// Installs a directly-authored frame strip.
	///
	/// # Panics
	///
	/// Panics if any frame's dimensions don't match the animation's.
	pub fn set_textures(&mut self, textures: Vec<FrameImage>) {
		for (i, tex) in textures.iter().enumerate() {
			assert_eq!(
				(tex.width(), tex.height()),
				(self.width, self.height),
				"Frame {i} dimensions must match the animation"
			);
		}
		self.textures = textures;
	}

	/// Decodes and installs the full frame strip from an ELANIC side-car.
	pub fn load_textures(&mut self, data: &ElanicData) -> Result<(), ElanicError> {
		self.textures = crate::elanic::decode_frames(data)?;
		Ok(())
	}

	/// Drops the loaded frame strip.
	pub fn unload_textures(&mut self) {
		self.textures.clear();
	}

	/// Derives the ELANIC side-car asset name from the animation name:
	/// the [`RASTER_ANIMATION_SUFFIX`] is replaced with `_ElanicData`.
	pub fn elanic_data_name(&self) -> String {
		let base = self.name.replace(RASTER_ANIMATION_SUFFIX, "");
		format!("{base}{}", crate::elanic::ELANIC_DATA_SUFFIX)
	}

	/// Derives an imprint image name from a frame image file name by
	/// inserting `Imprint_` before the trailing `NNN.png`-style suffix,
	/// e.g. `Walk_001.png` becomes `Walk_Imprint_001.png`.
	pub fn imprint_texture_name(texture_name: &str) -> String {
		const TAIL: usize = 7; // "NNN.png"
		if texture_name.len() >= TAIL && texture_name.is_char_boundary(texture_name.len() - TAIL) {
			let (head, tail) = texture_name.split_at(texture_name.len() - TAIL);
			format!("{head}Imprint_{tail}")
		} else {
			format!("Imprint_{texture_name}")
		}
	}
}

impl Display for RasterAnimation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"RasterAnimation `{}`: {}x{} @ {}s/frame, {} sequences",
			self.name,
			self.width,
			self.height,
			self.seconds_per_frame,
			self.sequences.len()
		)
	}
}

#[cfg(test)]
mod tests {
	use crate::anim::PlayCountRange;

	use super::*;

	fn walk_animation() -> RasterAnimation {
		let mut anim = RasterAnimation::new("Hero_Walk_RasterAnimation", 4, 4, 0.05)
			.with_sequence(FrameSequence::new("in", "1-3"))
			.with_sequence(FrameSequence::new("loop", "4-6"));
		anim.validate();
		anim
	}

	#[test]
	fn validate_clamps_loop_settings() {
		let mut anim = walk_animation();
		anim.loop_count = Some(0);
		anim.loop_to_sequence = 99;
		anim.validate();
		assert_eq!(anim.loop_count, Some(1));
		assert_eq!(anim.loop_to_sequence, 1);
	}

	#[test]
	fn does_loop_counts_only_when_advancing() {
		let mut anim = walk_animation();
		anim.loop_count = Some(2);
		assert!(anim.does_loop(0, true));
		assert!(anim.does_loop(1, true));
		assert!(!anim.does_loop(2, true));
		assert!(anim.does_loop(2, false));
		anim.loop_enabled = false;
		assert!(!anim.does_loop(0, true));
	}

	#[test]
	fn playable_detection() {
		let mut anim = RasterAnimation::new("x", 1, 1, 0.1).with_sequence(
			FrameSequence::new("off", "1").with_play_count(PlayCountRange {
				min_value: 0,
				max_value: 0,
				min_inclusive: false,
				max_inclusive: false,
			}),
		);
		anim.validate();
		assert!(!anim.has_playable_frame_sequences());
		anim.add_sequence(FrameSequence::new("on", "1"));
		anim.validate();
		assert!(anim.has_playable_frame_sequences());
	}

	#[test]
	fn frame_paragraph_appends_sequences() {
		let mut anim = RasterAnimation::new("x", 1, 1, 0.1);
		anim.parse_frame_paragraph("1-3\n\n4-6x2\n");
		anim.validate();
		assert_eq!(anim.frame_sequence_count(), 2);
		assert_eq!(anim.sequence(1).map(FrameSequence::frame_list), Some(&[4, 5, 6, 4, 5, 6][..]));
	}

	#[test]
	fn side_car_names() {
		let anim = walk_animation();
		assert_eq!(anim.elanic_data_name(), "Hero_Walk_ElanicData");
		assert_eq!(
			RasterAnimation::imprint_texture_name("Hero_Walk_001.png"),
			"Hero_Walk_Imprint_001.png"
		);
		assert_eq!(RasterAnimation::imprint_texture_name("x.png"), "Imprint_x.png");
	}

	#[test]
	fn texture_lookup_is_one_based() {
		let mut anim = RasterAnimation::new("x", 2, 2, 0.1);
		anim.set_textures(vec![FrameImage::blank(2, 2); 3]);
		assert!(anim.texture(0).is_none());
		assert!(anim.texture(1).is_some());
		assert!(anim.texture(3).is_some());
		assert!(anim.texture(4).is_none());
	}
}
