//! ELANIC codec round trips through the public facade.

use zerog_rs::prelude::*;
use zerog_rs::zerog_types::elanic;

const W: u32 = 8;
const H: u32 = 4;

/// Transparent frame, an identical copy, a colored frame, then that frame
/// with an isolated change plus a horizontal run.
fn strip() -> Vec<FrameImage> {
	let clear = FrameImage::blank(W, H);
	let mut base = FrameImage::blank(W, H);
	for y in 0..H {
		for x in 0..W {
			base.set_pixel(x, y, Color32::rgb(10 * x as u8, 10 * y as u8, 0));
		}
	}
	let mut edited = base.clone();
	edited.set_pixel(1, 0, Color32::rgb(255, 0, 0));
	for x in 2..7 {
		edited.set_pixel(x, 2, Color32::rgb(0, 255, 0));
	}
	vec![clear.clone(), clear, base, edited]
}

fn animation() -> RasterAnimation {
	let mut anim = RasterAnimation::new("Codec_RasterAnimation", W, H, 0.05)
		.with_sequence(FrameSequence::new("still", "1-2"))
		.with_sequence(FrameSequence::new("move", "3-4"));
	anim.validate();
	anim.set_textures(strip());
	anim
}

#[test]
fn encode_decode_round_trip_is_lossless() {
	let anim = animation();
	let data = elanic::encode(&anim).expect("encode");
	let frames = elanic::decode_frames(&data).expect("decode");
	assert_eq!(frames.len(), 4);
	for (i, (decoded, original)) in frames.iter().zip(anim.textures()).enumerate() {
		assert_eq!(decoded, original, "frame {i} must survive the round trip");
	}
}

#[test]
fn sequence_starts_become_imprints() {
	let anim = animation();
	let data = elanic::encode(&anim).expect("encode");
	// Frame 0 always; frame 2 starts the second sequence ("3-4").
	assert!(!data.frames[0].has_diff_data());
	assert!(!data.frames[2].has_diff_data());
	// Frame 1 equals its imprint: kept as a diff-less reference.
	assert!(!data.frames[1].has_diff_data());
	assert_eq!(data.frames[1].imprint_index, data.frames[0].imprint_index);
	// Frame 3 diffs against the most recent imprint.
	assert!(data.frames[3].has_diff_data());
	assert_eq!(data.frames[3].imprint_index, data.frames[2].imprint_index);
}

#[test]
fn horizontal_run_uses_the_run_marker() {
	let anim = animation();
	let data = elanic::encode(&anim).expect("encode");
	assert!(
		data.frames[3].diff_pixel_color_index.contains(&-1),
		"a 5-pixel run should compress to a run marker"
	);
	// Isolated pixel + run head + run marker: fewer entries than changed
	// pixels.
	assert!(data.frames[3].diff_pixel_count() < 6);
}

#[test]
fn side_car_survives_serde_and_texture_reload() {
	let mut anim = animation();
	let data = elanic::encode(&anim).expect("encode");

	let json = serde_json::to_string(&data).expect("serialize");
	let back: ElanicData = serde_json::from_str(&json).expect("deserialize");
	assert_eq!(back, data);

	let originals = anim.textures().to_vec();
	anim.unload_textures();
	assert!(anim.textures().is_empty());
	anim.load_textures(&back).expect("reload");
	assert_eq!(anim.textures(), originals.as_slice());
}

#[test]
fn side_car_naming_convention() {
	let anim = animation();
	assert_eq!(anim.elanic_data_name(), "Codec_ElanicData");
	assert_eq!(
		RasterAnimation::imprint_texture_name("Codec_002.png"),
		"Codec_Imprint_002.png"
	);
}

#[test]
fn corrupt_side_car_is_rejected() {
	let anim = animation();
	let mut data = elanic::encode(&anim).expect("encode");
	if let Some(index) = data.frames[3].diff_pixel_color_index.iter_mut().find(|c| **c >= 0) {
		*index = i16::MAX;
	}
	assert!(matches!(
		elanic::decode_frames(&data),
		Err(ElanicError::ColorIndexOutOfRange { .. })
	));
}
