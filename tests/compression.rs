//! End-to-end tests of the image-to-blob pipeline.

use pixcrumb_rs::prelude::*;

/// Builds a 4-color test card: solid quadrants with a one-pixel grid
/// between them, the kind of art the format targets.
fn test_card(width: u64, height: u64) -> IndexedImage {
	let mut indices = Vec::with_capacity((width * height) as usize);
	for y in 0..height {
		for x in 0..width {
			let index = if x == width / 2 || y == height / 2 {
				3
			} else if (x < width / 2) == (y < height / 2) {
				0
			} else {
				1
			};
			indices.push(index);
		}
	}
	IndexedImage::new(width, height, 4, indices).unwrap()
}

fn crumb_planes(image: &IndexedImage) -> CrumbImage {
	let mut planar = PlanarImage::new(image).unwrap();
	for plane in planar.bitplanes_mut() {
		plane.delta_encode();
	}
	CrumbImage::from_planar(&planar)
}

#[test]
fn every_codec_compresses_every_plane() {
	let crumbs = crumb_planes(&test_card(32, 16));
	assert_eq!(crumbs.planes().len(), 2);

	for mut encoder in all_encoders() {
		for plane in crumbs.planes() {
			let blob = encoder.compress(plane).unwrap();
			// Two-stream blobs carry a 4-byte header, single-stream blobs 2.
			assert!(blob.total_size() >= 2, "codec {}", encoder.name());
		}
	}
}

#[test]
fn rle_roundtrips_a_full_image() {
	let crumbs = crumb_planes(&test_card(48, 32));
	for plane in crumbs.planes() {
		let blob = PixCrumbRle::new().compress(plane).unwrap();
		let mut decoder = PixCrumbRle::decoder_for(blob.as_ref()).unwrap();
		let decoded = decoder.decompress().unwrap();
		assert_eq!(decoded.crumbs(), plane.crumbs());
	}
}

#[test]
fn rle_roundtrips_through_the_serialised_blob() {
	// Tile-aligned width, so the on-disk header describes the matrix
	// exactly.
	let crumbs = crumb_planes(&test_card(64, 24));
	for plane in crumbs.planes() {
		let blob = PixCrumbRle::new().compress(plane).unwrap();
		let rle_blob = blob.as_any().downcast_ref::<RleBlob>().unwrap();
		let bytes = rle_blob.to_bytes();
		assert_eq!(bytes.len() as u64, blob.total_size());

		let parsed = RleBlob::from_bytes(&bytes).unwrap();
		let decoded = PixCrumbRle::decoder(parsed).decompress().unwrap();
		assert_eq!(decoded.crumbs(), plane.crumbs());
	}
}

#[test]
fn rle_roundtrips_odd_dimensions_in_memory() {
	// 15x9 pixels: neither dimension is crumb- or tile-aligned.
	let crumbs = crumb_planes(&test_card(15, 9));
	for plane in crumbs.planes() {
		let blob = PixCrumbRle::new().compress(plane).unwrap();
		let mut decoder = PixCrumbRle::decoder_for(blob.as_ref()).unwrap();
		assert_eq!(decoder.decompress().unwrap().crumbs(), plane.crumbs());
	}
}

#[test]
fn oversized_image_is_rejected_before_encoding() {
	let image = IndexedImage::new(2048, 2, 2, vec![0; 4096]).unwrap();
	let crumbs = crumb_planes(&image);
	for mut encoder in all_encoders() {
		assert!(
			matches!(
				encoder.compress(&crumbs.planes()[0]),
				Err(PixCrumbError::ImageTooLarge { .. })
			),
			"codec {}",
			encoder.name()
		);
	}
}
