//! 2×2-pixel crumbs and crumb planes.

use crate::error::{PixCrumbError, Result};

use super::{Bitplane, PlanarImage};

/// A 4-bit symbol packing a 2x2 pixel region of one bitplane.
///
/// The bits are organized as such:
///
/// ```text
/// +---+---+
/// | 3 | 2 |
/// +---+---+
/// | 1 | 0 |
/// +---+---+
/// ```
///
/// i.e. bits 3..0 hold the top-left, top-right, bottom-left and bottom-right
/// pixels. Values range over `0..16`; the extended value 16 is reserved as a
/// stream token by the LZ dictionary and never appears in a crumb plane.
pub type Crumb = u8;

/// A bitplane re-expressed as a matrix of [`Crumb`]s.
///
/// The matrix is `ceil(h/2)` rows of `ceil(w/2)` crumbs; pixels beyond the
/// bitplane bounds read as zero. Once produced the plane is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumbPlane {
	crumbs: Vec<Vec<Crumb>>,
	width: u64,
	height: u64,
}

impl CrumbPlane {
	/// Converts one bitplane into a crumb plane.
	pub fn from_bitplane(bp: &Bitplane) -> Self {
		let crumbs_h = bp.height_px().div_ceil(2) as usize;
		let crumbs_w = bp.width_px().div_ceil(2) as usize;
		let zero_row = vec![0u8; bp.width_bp_bytes() as usize];

		let mut crumbs = Vec::with_capacity(crumbs_h);
		for cy in 0..crumbs_h {
			let top = &bp.rows()[cy * 2];
			let bottom = bp.rows().get(cy * 2 + 1).unwrap_or(&zero_row);
			let mut row = Vec::with_capacity(crumbs_w);
			for cx in 0..crumbs_w {
				let x0 = (cx * 2) as u64;
				let x1 = x0 + 1;
				let crumb = row_bit(top, x0) << 3
					| row_bit(top, x1) << 2
					| row_bit(bottom, x0) << 1
					| row_bit(bottom, x1);
				row.push(crumb);
			}
			crumbs.push(row);
		}

		Self {
			crumbs,
			width: bp.width_px(),
			height: bp.height_px(),
		}
	}

	/// Builds a crumb plane directly from a crumb matrix.
	///
	/// All rows must have the same width. The pixel dimensions are taken to
	/// be twice the crumb dimensions.
	pub fn from_rows(rows: Vec<Vec<Crumb>>) -> Result<Self> {
		let width_crumbs = rows.first().map_or(0, Vec::len);
		if rows.iter().any(|row| row.len() != width_crumbs) {
			return Err(PixCrumbError::CrumbMatrixWidthInconsistent);
		}
		let height_crumbs = rows.len();
		Ok(Self {
			crumbs: rows,
			width: (width_crumbs * 2) as u64,
			height: (height_crumbs * 2) as u64,
		})
	}

	/// Returns the width in pixels.
	pub fn width_px(&self) -> u64 {
		self.width
	}

	/// Returns the width in crumbs.
	pub fn width_crumbs(&self) -> u64 {
		self.width.div_ceil(2)
	}

	/// Returns the width of the underlying bitplane in bytes.
	pub fn width_bp_bytes(&self) -> u64 {
		self.width.div_ceil(8)
	}

	/// Returns the height in pixels.
	pub fn height_px(&self) -> u64 {
		self.height
	}

	/// Returns the height in crumbs.
	pub fn height_crumbs(&self) -> u64 {
		self.height.div_ceil(2)
	}

	/// Returns the crumb matrix.
	pub fn crumbs(&self) -> &[Vec<Crumb>] {
		&self.crumbs
	}
}

/// Reads pixel `x` of a packed bitplane row; bits beyond the row read as 0.
fn row_bit(row: &[u8], x: u64) -> u8 {
	let byte = (x / 8) as usize;
	if byte >= row.len() {
		return 0;
	}
	(row[byte] >> (7 - (x % 8))) & 1
}

/// All crumb planes of an image, one per bitplane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrumbImage {
	planes: Vec<CrumbPlane>,
	width: u64,
	height: u64,
}

impl CrumbImage {
	/// Converts every bitplane of a planar image into a crumb plane.
	pub fn from_planar(pi: &PlanarImage) -> Self {
		Self {
			planes: pi.bitplanes().iter().map(CrumbPlane::from_bitplane).collect(),
			width: pi.width_px(),
			height: pi.height_px(),
		}
	}

	/// Returns the crumb planes.
	pub fn planes(&self) -> &[CrumbPlane] {
		&self.planes
	}

	/// Returns the image width in pixels.
	pub fn width_px(&self) -> u64 {
		self.width
	}

	/// Returns the image height in pixels.
	pub fn height_px(&self) -> u64 {
		self.height
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::img::IndexedImage;

	fn plane_of(indices: Vec<u16>, w: u64, h: u64) -> CrumbPlane {
		let im = IndexedImage::new(w, h, 2, indices).unwrap();
		let planar = PlanarImage::new(&im).unwrap();
		CrumbPlane::from_bitplane(&planar.bitplanes()[0])
	}

	#[test]
	fn test_crumb_packing() {
		// 4x2: pixel block (0..2, 0..2) = [1,0 / 0,1], block (2..4, 0..2) =
		// [1,1 / 0,0].
		let crp = plane_of(vec![1, 0, 1, 1, 0, 1, 0, 0], 4, 2);
		assert_eq!(crp.crumbs(), &[vec![0b1001, 0b1100]]);
	}

	#[test]
	fn test_crumb_packing_covers_every_column_of_a_byte() {
		// 8 pixels of alternating 1,0 in a single row: every crumb is 0b10xx
		// with an all-zero bottom row, including the fourth crumb of the
		// byte.
		let crp = plane_of(vec![1, 0, 1, 0, 1, 0, 1, 0], 8, 1);
		assert_eq!(crp.crumbs(), &[vec![0b1000, 0b1000, 0b1000, 0b1000]]);
	}

	#[test]
	fn test_odd_dimensions_pad_with_zero() {
		// 3x3 all-ones: right column and bottom row of the crumb grid are
		// padded.
		let crp = plane_of(vec![1; 9], 3, 3);
		assert_eq!(crp.width_crumbs(), 2);
		assert_eq!(crp.height_crumbs(), 2);
		assert_eq!(
			crp.crumbs(),
			&[vec![0b1111, 0b1010], vec![0b1100, 0b1000]]
		);
	}

	#[test]
	fn test_wide_row_delta_example() {
		// 16x2 image entirely of palette index 1: after the vertical delta
		// the bottom bitplane row zeroes out and every crumb keeps only its
		// top two bits.
		let im = IndexedImage::new(16, 2, 2, vec![1; 32]).unwrap();
		let mut planar = PlanarImage::new(&im).unwrap();
		planar.bitplanes_mut()[0].delta_encode();
		let crp = CrumbPlane::from_bitplane(&planar.bitplanes()[0]);
		assert_eq!(crp.crumbs(), &[vec![0b1100; 8]]);
	}

	#[test]
	fn test_from_rows_rejects_ragged_matrix() {
		let result = CrumbPlane::from_rows(vec![vec![1, 2], vec![3]]);
		assert!(matches!(
			result,
			Err(PixCrumbError::CrumbMatrixWidthInconsistent)
		));
	}
}
