//! ELANIC decoder.

use crate::graphics::{Color32, FrameImage};

use super::data::ElanicData;
use super::ElanicError;

/// Decodes one animation frame from ELANIC data.
///
/// Frames without diff data are plain copies of their imprint. A run
/// marker (`-1`) fills from the previous diff position (exclusive) up to
/// and including its own position with the previous entry's color; a run
/// marker with no predecessor is corrupt but harmless, so it is skipped
/// with a warning rather than failing the whole frame.
pub fn decode_frame(data: &ElanicData, frame_index: usize) -> Result<FrameImage, ElanicError> {
	let frame = data.frames.get(frame_index).ok_or(ElanicError::FrameIndexOutOfRange {
		index: frame_index,
		count: data.frames.len(),
	})?;
	let imprint =
		data.imprints
			.get(frame.imprint_index)
			.ok_or(ElanicError::ImprintIndexOutOfRange {
				frame_index,
				imprint_index: frame.imprint_index,
				count: data.imprints.len(),
			})?;
	if !frame.has_diff_data() {
		return Ok(imprint.clone());
	}

	let mut pixels = imprint.pixels().to_vec();
	for i in 0..frame.diff_pixel_count() {
		let position = frame.diff_pixel_position[i];
		let color_index = frame.diff_pixel_color_index[i];
		if position as usize >= pixels.len() {
			return Err(ElanicError::DiffPositionOutOfRange {
				frame_index,
				position,
				pixel_count: pixels.len(),
			});
		}
		if color_index == -1 {
			let Some(prev) = i.checked_sub(1) else {
				log::warn!("frame {frame_index}: leading run marker has no predecessor, skipped");
				continue;
			};
			let run_from = frame.diff_pixel_position[prev];
			let color = palette_color(data, frame.diff_pixel_color_index[prev], frame_index)?;
			for p in run_from + 1..=position {
				pixels[p as usize] = color;
			}
		} else {
			pixels[position as usize] = palette_color(data, color_index, frame_index)?;
		}
	}

	Ok(FrameImage::from_pixels(imprint.width(), imprint.height(), pixels))
}

/// Decodes the full frame strip.
pub fn decode_frames(data: &ElanicData) -> Result<Vec<FrameImage>, ElanicError> {
	(0..data.frames.len()).map(|i| decode_frame(data, i)).collect()
}

/// Looks up a palette color, rejecting the run marker and anything out of
/// range.
fn palette_color(data: &ElanicData, color_index: i16, frame_index: usize) -> Result<Color32, ElanicError> {
	usize::try_from(color_index)
		.ok()
		.and_then(|i| data.colors.get(i))
		.copied()
		.ok_or(ElanicError::ColorIndexOutOfRange {
			frame_index,
			color_index,
			count: data.colors.len(),
		})
}
