//! Paletted image ingestion for the command line tools.
//!
//! The codec pipeline wants palette indices, but the `image` crate expands
//! indexed PNGs to plain RGB on decode. The loader rebuilds an indexed view
//! by scanning for distinct colors and pads the palette up to the next
//! power of two, which is the shape the bitplane decomposition requires.

use std::path::Path;

use anyhow::{Context, Result, bail};
use pixcrumb_types::img::IndexedImage;

/// Maximum number of distinct colors an input image may use.
const MAX_COLORS: usize = 65536;

/// Builds an indexed view of the RGB data by assigning palette slots in
/// order of first appearance.
fn build_indexed(rgb_data: &[u8]) -> Result<(usize, Vec<u16>)> {
	let pixel_count = rgb_data.len() / 3;
	let mut unique_colors: Vec<[u8; 3]> = Vec::new();
	let mut indices = Vec::with_capacity(pixel_count);

	for i in 0..pixel_count {
		let color = [rgb_data[i * 3], rgb_data[i * 3 + 1], rgb_data[i * 3 + 2]];
		let index = match unique_colors.iter().position(|&c| c == color) {
			Some(idx) => idx,
			None => {
				if unique_colors.len() >= MAX_COLORS {
					bail!("image has more than {MAX_COLORS} distinct colors (found at pixel {i})");
				}
				unique_colors.push(color);
				unique_colors.len() - 1
			}
		};
		indices.push(index as u16);
	}

	Ok((unique_colors.len(), indices))
}

/// Loads an image file and reduces it to palette indices.
///
/// The effective palette size is the number of distinct colors rounded up
/// to a power of two (at least 2), so every image that fits the color limit
/// satisfies the pipeline's palette contract.
pub fn load_indexed_image(path: impl AsRef<Path>) -> Result<IndexedImage> {
	let path = path.as_ref();
	let img = image::open(path).with_context(|| format!("could not load image file '{}'", path.display()))?;
	let rgb = img.to_rgb8();
	let (width, height) = rgb.dimensions();

	let (num_colors, indices) = build_indexed(rgb.as_raw())?;
	let palette_len = num_colors.next_power_of_two().max(2);

	IndexedImage::new(u64::from(width), u64::from(height), palette_len, indices)
		.with_context(|| format!("image '{}' failed validation", path.display()))
}
