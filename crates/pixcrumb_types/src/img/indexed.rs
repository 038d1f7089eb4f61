//! Paletted pixel access.

use crate::error::{PixCrumbError, Result};

/// A paletted image reduced to the parts the compression pipeline needs:
/// its dimensions, the palette size and one palette index per pixel.
///
/// How the indices were obtained (PNG palette chunk, quantisation, test
/// fixture) is the caller's business; this type is the boundary between
/// image decoding and the codec pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
	width: u64,
	height: u64,
	palette_len: usize,
	indices: Vec<u16>,
}

impl IndexedImage {
	/// Creates an indexed image from row-major palette indices.
	///
	/// Fails if the index buffer does not match the dimensions or if any
	/// index points outside the palette. The palette size itself is only
	/// validated when bitplanes are derived.
	pub fn new(width: u64, height: u64, palette_len: usize, indices: Vec<u16>) -> Result<Self> {
		let expected = (width * height) as usize;
		if indices.len() != expected {
			return Err(PixCrumbError::InvalidImage(format!(
				"index data has {} entries, {}x{} image needs {}",
				indices.len(),
				width,
				height,
				expected
			)));
		}
		if let Some(&bad) = indices.iter().find(|&&i| (i as usize) >= palette_len) {
			return Err(PixCrumbError::InvalidImage(format!(
				"palette index {bad} out of range for palette of {palette_len} colors"
			)));
		}
		Ok(Self {
			width,
			height,
			palette_len,
			indices,
		})
	}

	/// Returns the image width in pixels.
	pub fn width_px(&self) -> u64 {
		self.width
	}

	/// Returns the image height in pixels.
	pub fn height_px(&self) -> u64 {
		self.height
	}

	/// Returns the number of palette entries.
	pub fn palette_len(&self) -> usize {
		self.palette_len
	}

	/// Returns the palette index of the pixel at `(x, y)`.
	pub fn color_index_at(&self, x: u64, y: u64) -> u16 {
		debug_assert!(x < self.width && y < self.height);
		self.indices[(y * self.width + x) as usize]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_accessor() {
		let img = IndexedImage::new(2, 2, 4, vec![0, 1, 2, 3]).unwrap();
		assert_eq!(img.width_px(), 2);
		assert_eq!(img.height_px(), 2);
		assert_eq!(img.palette_len(), 4);
		assert_eq!(img.color_index_at(1, 0), 1);
		assert_eq!(img.color_index_at(0, 1), 2);
	}

	#[test]
	fn test_rejects_size_mismatch() {
		let result = IndexedImage::new(3, 2, 4, vec![0, 1, 2]);
		assert!(matches!(result, Err(PixCrumbError::InvalidImage(_))));
	}

	#[test]
	fn test_rejects_out_of_range_index() {
		let result = IndexedImage::new(2, 1, 2, vec![0, 2]);
		assert!(matches!(result, Err(PixCrumbError::InvalidImage(_))));
	}
}
