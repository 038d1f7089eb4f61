//! The codec state machines of the crumb compression family.
//!
//! Every codec drives a serpentine [`crate::coding::CrumbReader`] to
//! exhaustion, alternately invoking coding units and writing into one or two
//! bit streams, and hands back a blob. Only the RLE codec defines both
//! directions and an on-disk layout; the remaining variants are encode-only
//! format studies.

mod lz;
mod pc2;
mod pc2i;
mod pc3;
mod rle;
mod vlc_lz;
mod vlc_rle;

use std::any::Any;

use crate::error::{PixCrumbError, Result};
use crate::img::CrumbPlane;

pub use lz::{PixCrumbLz, PixCrumbLzBlob};
pub use pc2::{PixCrumb2, PixCrumb2Blob};
pub use pc2i::{PixCrumb2i, PixCrumb2iBlob};
pub use pc3::{PixCrumb3, PixCrumb3Blob};
pub use rle::{PixCrumbRle, RleBlob};
pub use vlc_lz::{PixCrumbVlcLz, PixCrumbVlcLzBlob};
pub use vlc_rle::{PixCrumbVlcRle, PixCrumbVlcRleBlob};

/// A compressed representation of one crumb plane.
pub trait PixCrumbBlob: Any {
	/// Returns the total blob size in bytes, header included.
	fn total_size(&self) -> u64;

	/// Upcast used by decoders to recover their concrete blob type.
	fn as_any(&self) -> &dyn Any;
}

/// A codec that can compress a crumb plane into a blob.
pub trait PixCrumbEncoder {
	/// Returns the codec's full name.
	fn name(&self) -> &'static str;

	/// Returns the codec's abbreviated name.
	fn abbrev_name(&self) -> &'static str;

	/// Compresses one crumb plane.
	fn compress(&mut self, crp: &CrumbPlane) -> Result<Box<dyn PixCrumbBlob>>;
}

/// A codec that can reconstruct a crumb plane from its blob.
pub trait PixCrumbDecoder {
	/// Decompresses the blob the decoder was constructed with.
	fn decompress(&mut self) -> Result<CrumbPlane>;
}

/// Validates the blob header dimension limits for a plane and returns its
/// `(height_crumbs, width_tiles)` header fields.
fn check_dimensions(crp: &CrumbPlane) -> Result<(u8, u8)> {
	let width_tiles = crp.width_bp_bytes();
	let height_crumbs = crp.height_crumbs();
	if width_tiles > 255 || height_crumbs > 255 {
		return Err(PixCrumbError::ImageTooLarge {
			width_px: width_tiles * 8,
			height_px: height_crumbs * 2,
		});
	}
	Ok((height_crumbs as u8, width_tiles as u8))
}

/// Returns one instance of every registered encoder.
pub fn all_encoders() -> Vec<Box<dyn PixCrumbEncoder>> {
	vec![
		Box::new(PixCrumbRle::new()),
		Box::new(PixCrumb2::new()),
		Box::new(PixCrumb2i::new()),
		Box::new(PixCrumb3::new()),
		Box::new(PixCrumbLz::new()),
		Box::new(PixCrumbVlcLz::new()),
		Box::new(PixCrumbVlcRle::new()),
	]
}

/// Looks an encoder up by its full or abbreviated name.
pub fn encoder_by_name(name: &str) -> Option<Box<dyn PixCrumbEncoder>> {
	all_encoders()
		.into_iter()
		.find(|enc| enc.name() == name || enc.abbrev_name() == name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_registry_lookup() {
		assert!(encoder_by_name("pixcrumb-rle").is_some());
		assert!(encoder_by_name("pcrle").is_some());
		assert!(encoder_by_name("pc2i").is_some());
		assert!(encoder_by_name("pclz2").is_some());
		assert!(encoder_by_name("no-such-codec").is_none());
	}

	#[test]
	fn test_registry_names_are_unique() {
		let encoders = all_encoders();
		for (i, a) in encoders.iter().enumerate() {
			for b in encoders.iter().skip(i + 1) {
				assert_ne!(a.abbrev_name(), b.abbrev_name());
			}
		}
	}

	#[test]
	fn test_dimension_limits() {
		let wide = CrumbPlane::from_rows(vec![vec![0; 1024]]).unwrap();
		assert!(matches!(
			check_dimensions(&wide),
			Err(PixCrumbError::ImageTooLarge { .. })
		));

		let tall = CrumbPlane::from_rows(vec![vec![0]; 256]).unwrap();
		assert!(matches!(
			check_dimensions(&tall),
			Err(PixCrumbError::ImageTooLarge { .. })
		));

		let ok = CrumbPlane::from_rows(vec![vec![0; 1020]; 255]).unwrap();
		assert_eq!(check_dimensions(&ok).unwrap(), (255, 255));
	}
}
