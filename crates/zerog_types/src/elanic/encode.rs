//! ELANIC encoder.

use std::collections::HashMap;

use crate::anim::RasterAnimation;
use crate::graphics::Color32;

use super::data::{ElanicData, ElanicFrame};
use super::ElanicError;

/// Encodes an animation's loaded frame strip into ELANIC side-car data.
///
/// Frame 0 and the first frame of every sequence become imprints; every
/// other frame is stored as a sparse diff against the most recent
/// imprint. Fully transparent pixels are normalized to the clear color
/// before comparison, so alpha-zero noise never costs diff entries.
///
/// The animation's sequences must be validated (their frame lists drive
/// imprint placement) and its textures loaded.
pub fn encode(animation: &RasterAnimation) -> Result<ElanicData, ElanicError> {
	let mut data = ElanicData::default();
	data.colors.push(Color32::CLEAR); // color index 0
	let mut palette: HashMap<Color32, i16> = HashMap::from([(Color32::CLEAR, 0)]);

	let mut prev: Vec<Color32> = Vec::new();
	for (i, tex) in animation.textures().iter().enumerate() {
		if (tex.width(), tex.height()) != (animation.width, animation.height) {
			return Err(ElanicError::DimensionMismatch {
				frame_index: i,
				expected_width: animation.width,
				expected_height: animation.height,
				actual_width: tex.width(),
				actual_height: tex.height(),
			});
		}

		let frame_number = i as u32 + 1;
		let starts_sequence = animation
			.sequences()
			.iter()
			.any(|seq| seq.frame_list().first() == Some(&frame_number));
		if i == 0 || starts_sequence {
			data.frames.push(ElanicFrame::imprint(data.imprints.len()));
			data.imprints.push(tex.clone());
			prev = tex.pixels().to_vec();
			continue;
		}

		let mut positions: Vec<u32> = Vec::new();
		let mut color_indices: Vec<i16> = Vec::new();
		for (p, &raw) in tex.pixels().iter().enumerate() {
			let color = if raw.is_transparent() {
				Color32::CLEAR
			} else {
				raw
			};
			if color == prev[p] {
				continue;
			}
			let mut color_index = palette_index(&mut data.colors, &mut palette, color)?;
			// Collapse adjacent same-color diffs into a -1 run marker.
			let pvi = color_indices.len();
			if pvi >= 1 && positions[pvi - 1] == p as u32 - 1 {
				if color_indices[pvi - 1] == color_index {
					color_index = -1;
				} else if color_indices[pvi - 1] == -1 && color_indices[pvi - 2] == color_index {
					positions.pop();
					color_indices.pop();
					color_index = -1;
				}
			}
			positions.push(p as u32);
			color_indices.push(color_index);
		}
		data.frames.push(ElanicFrame {
			imprint_index: data.imprints.len() - 1,
			diff_pixel_position: positions,
			diff_pixel_color_index: color_indices,
		});
	}

	Ok(data)
}

/// Finds the palette index for a color, appending it if new.
fn palette_index(
	colors: &mut Vec<Color32>,
	palette: &mut HashMap<Color32, i16>,
	color: Color32,
) -> Result<i16, ElanicError> {
	if let Some(&index) = palette.get(&color) {
		return Ok(index);
	}
	if colors.len() > i16::MAX as usize {
		return Err(ElanicError::PaletteOverflow {
			count: colors.len(),
		});
	}
	let index = colors.len() as i16;
	colors.push(color);
	palette.insert(color, index);
	Ok(index)
}
