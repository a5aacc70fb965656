//! Pixel-level primitives shared by the animation and codec modules.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A 32-bit RGBA color with 8 bits per channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color32 {
	/// Red channel
	pub r: u8,
	/// Green channel
	pub g: u8,
	/// Blue channel
	pub b: u8,
	/// Alpha channel (0 = fully transparent)
	pub a: u8,
}

impl Color32 {
	/// Fully transparent black. Always palette index 0 in ELANIC data.
	pub const CLEAR: Color32 = Color32 {
		r: 0,
		g: 0,
		b: 0,
		a: 0,
	};

	/// Creates a new color from RGBA components.
	pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a new fully opaque color from RGB components.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self::rgba(r, g, b, 0xFF)
	}

	/// Returns true if the alpha channel is zero.
	pub const fn is_transparent(&self) -> bool {
		self.a == 0
	}
}

impl Display for Color32 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
	}
}

/// A single animation frame as a flat pixel buffer in row-major order.
///
/// Frames are the unit the ELANIC codec encodes and decodes. All frames of
/// one animation share the same dimensions.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameImage {
	width: u32,
	height: u32,
	pixels: Vec<Color32>,
}

impl FrameImage {
	/// Creates a frame with every pixel set to [`Color32::CLEAR`].
	pub fn blank(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			pixels: vec![Color32::CLEAR; width as usize * height as usize],
		}
	}

	/// Creates a frame from an existing pixel buffer.
	///
	/// # Panics
	///
	/// Panics if the pixel buffer length doesn't match the frame dimensions.
	pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color32>) -> Self {
		assert_eq!(
			pixels.len(),
			width as usize * height as usize,
			"Pixel data length must match frame dimensions"
		);
		Self {
			width,
			height,
			pixels,
		}
	}

	/// Returns the frame width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Returns the frame height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Returns the total number of pixels.
	pub fn pixel_count(&self) -> usize {
		self.pixels.len()
	}

	/// Returns the pixel at the given flat index, if in range.
	pub fn pixel(&self, index: usize) -> Option<Color32> {
		self.pixels.get(index).copied()
	}

	/// Returns the whole pixel buffer.
	pub fn pixels(&self) -> &[Color32] {
		&self.pixels
	}

	/// Returns the whole pixel buffer mutably.
	pub fn pixels_mut(&mut self) -> &mut [Color32] {
		&mut self.pixels
	}

	/// Sets the pixel at `(x, y)`. Out-of-range coordinates are ignored.
	pub fn set_pixel(&mut self, x: u32, y: u32, color: Color32) {
		if x < self.width && y < self.height {
			self.pixels[(y * self.width + x) as usize] = color;
		}
	}

	/// Converts the frame to a flat RGBA byte buffer, 4 bytes per pixel.
	pub fn to_rgba_bytes(&self) -> Vec<u8> {
		let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
		for px in &self.pixels {
			bytes.extend_from_slice(&[px.r, px.g, px.b, px.a]);
		}
		bytes
	}

	/// Creates a frame from a flat RGBA byte buffer, 4 bytes per pixel.
	///
	/// # Panics
	///
	/// Panics if the byte buffer length doesn't match the frame dimensions.
	pub fn from_rgba_bytes(width: u32, height: u32, bytes: &[u8]) -> Self {
		assert_eq!(
			bytes.len(),
			width as usize * height as usize * 4,
			"Byte buffer length must match frame dimensions"
		);
		let pixels = bytes
			.chunks_exact(4)
			.map(|c| Color32::rgba(c[0], c[1], c[2], c[3]))
			.collect();
		Self::from_pixels(width, height, pixels)
	}
}

impl Display for FrameImage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let opaque = self.pixels.iter().filter(|p| !p.is_transparent()).count();
		write!(
			f,
			"FrameImage: {}x{} ({} opaque pixels)",
			self.width, self.height, opaque
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_frame_is_transparent() {
		let frame = FrameImage::blank(4, 3);
		assert_eq!(frame.pixel_count(), 12);
		assert!(frame.pixels().iter().all(Color32::is_transparent));
	}

	#[test]
	fn rgba_bytes_round_trip() {
		let mut frame = FrameImage::blank(2, 2);
		frame.set_pixel(1, 0, Color32::rgb(0x10, 0x20, 0x30));
		frame.set_pixel(0, 1, Color32::rgba(0xFF, 0x00, 0x00, 0x80));
		let bytes = frame.to_rgba_bytes();
		assert_eq!(bytes.len(), 16);
		assert_eq!(FrameImage::from_rgba_bytes(2, 2, &bytes), frame);
	}

	#[test]
	fn set_pixel_ignores_out_of_range() {
		let mut frame = FrameImage::blank(2, 2);
		frame.set_pixel(2, 0, Color32::rgb(1, 2, 3));
		frame.set_pixel(0, 5, Color32::rgb(1, 2, 3));
		assert!(frame.pixels().iter().all(Color32::is_transparent));
	}
}
