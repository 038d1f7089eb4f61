//! The RLE codec: alternating literal runs and exp-Golomb zero runs.
//!
//! ## Stream grammar
//!
//! The encoder alternates two units with no mode bits in between:
//!
//! 1. a zero-terminated literal run into the data stream,
//! 2. an order-2 exp-Golomb zero run into the RLE stream, whose run
//!    includes the literal unit's terminator.
//!
//! The decoder replays the same alternation and stops as soon as the
//! reconstructed matrix has `height_crumbs` complete rows.
//!
//! ## Blob layout
//!
//! | Offset | Size | Field |
//! |--------|------|----------------------------------------------|
//! | 0      | 1    | `height_crumbs` (number of crumb rows)       |
//! | 1      | 1    | `width_tiles` (bitplane row width in bytes)  |
//! | 2      | 2 LE | offset of the data stream from blob start    |
//! | 4      | ...  | RLE stream                                   |
//! | ...    | rest | data stream                                  |

use std::any::Any;
use std::fmt::Display;

use crate::coding::{
	BitReader, BitWriter, CrumbReader, CrumbWriter, decode_literal_run, decode_zero_run,
	encode_literal_run, encode_zero_run,
};
use crate::error::{PixCrumbError, Result};
use crate::img::CrumbPlane;

use super::{PixCrumbBlob, PixCrumbDecoder, PixCrumbEncoder, check_dimensions};

const NAME: &str = "pixcrumb-rle";
const ABBREV_NAME: &str = "pcrle";

/// Golomb order of the zero-run codes.
const GOLOMB_ORDER: u32 = 2;

/// Compressed form of one crumb plane: header plus RLE and data streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RleBlob {
	height_crumbs: u8,
	width_tiles: u8,
	/// Exact matrix width in crumbs. Not stored on disk (the header only
	/// carries whole tiles); kept so in-memory round trips reconstruct
	/// planes whose width is not tile-aligned.
	width_crumbs: u64,
	rle_stream: Vec<u8>,
	data_stream: Vec<u8>,
}

impl RleBlob {
	/// Size of the serialised header in bytes.
	pub const HEADER_SIZE: usize = 4;

	/// Returns the number of crumb rows.
	pub fn height_crumbs(&self) -> u8 {
		self.height_crumbs
	}

	/// Returns the plane width in 8-pixel tiles.
	pub fn width_tiles(&self) -> u8 {
		self.width_tiles
	}

	/// Returns the zero-run stream.
	pub fn rle_stream(&self) -> &[u8] {
		&self.rle_stream
	}

	/// Returns the literal stream.
	pub fn data_stream(&self) -> &[u8] {
		&self.data_stream
	}

	/// Serialises the blob into its on-disk layout.
	pub fn to_bytes(&self) -> Vec<u8> {
		let data_offset = Self::HEADER_SIZE + self.rle_stream.len();
		assert!(
			data_offset <= u16::MAX as usize,
			"RLE stream too long for the 16-bit data stream offset"
		);
		let mut bytes = Vec::with_capacity(self.total_size() as usize);
		bytes.push(self.height_crumbs);
		bytes.push(self.width_tiles);
		bytes.extend_from_slice(&(data_offset as u16).to_le_bytes());
		bytes.extend_from_slice(&self.rle_stream);
		bytes.extend_from_slice(&self.data_stream);
		bytes
	}

	/// Parses a blob from its on-disk layout.
	///
	/// The matrix width is recovered as `4 * width_tiles`, so planes whose
	/// pixel width is not a whole number of tiles decode with their rows
	/// padded up to the tile boundary.
	pub fn from_bytes(data: &[u8]) -> Result<Self> {
		if data.len() < Self::HEADER_SIZE {
			return Err(PixCrumbError::BlobInvalid {
				expected: Self::HEADER_SIZE,
				actual: data.len(),
			});
		}
		let height_crumbs = data[0];
		let width_tiles = data[1];
		let data_offset = u16::from_le_bytes([data[2], data[3]]) as usize;
		if data_offset < Self::HEADER_SIZE || data_offset > data.len() {
			return Err(PixCrumbError::BlobInconsistent {
				offset: data_offset,
				length: data.len(),
			});
		}
		if height_crumbs == 0 || width_tiles == 0 {
			return Err(PixCrumbError::BlobInconsistent {
				offset: data_offset,
				length: data.len(),
			});
		}
		Ok(Self {
			height_crumbs,
			width_tiles,
			width_crumbs: u64::from(width_tiles) * 4,
			rle_stream: data[Self::HEADER_SIZE..data_offset].to_vec(),
			data_stream: data[data_offset..].to_vec(),
		})
	}
}

impl PixCrumbBlob for RleBlob {
	fn total_size(&self) -> u64 {
		(self.rle_stream.len() + self.data_stream.len() + Self::HEADER_SIZE) as u64
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl Display for RleBlob {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"pixcrumb-rle blob: {} crumb rows x {} tiles, {} B rle + {} B data ({} B total)",
			self.height_crumbs,
			self.width_tiles,
			self.rle_stream.len(),
			self.data_stream.len(),
			self.total_size(),
		)
	}
}

/// The RLE codec state machine.
#[derive(Debug, Default)]
pub struct PixCrumbRle {
	blob: Option<RleBlob>,
}

impl PixCrumbRle {
	/// Creates an encoder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a decoder over a parsed blob.
	pub fn decoder(blob: RleBlob) -> Self {
		Self {
			blob: Some(blob),
		}
	}

	/// Creates a decoder from a type-erased blob, rejecting blobs produced
	/// by other codecs.
	pub fn decoder_for(blob: &dyn PixCrumbBlob) -> Result<Self> {
		let blob = blob
			.as_any()
			.downcast_ref::<RleBlob>()
			.ok_or(PixCrumbError::WrongBlobType {
				codec: NAME,
			})?;
		Ok(Self::decoder(blob.clone()))
	}
}

impl PixCrumbEncoder for PixCrumbRle {
	fn name(&self) -> &'static str {
		NAME
	}

	fn abbrev_name(&self) -> &'static str {
		ABBREV_NAME
	}

	fn compress(&mut self, crp: &CrumbPlane) -> Result<Box<dyn PixCrumbBlob>> {
		let (height_crumbs, width_tiles) = check_dimensions(crp)?;
		let mut rle_enc = BitWriter::new();
		let mut data_enc = BitWriter::new();
		let mut reader = CrumbReader::new(crp.crumbs())?;

		// Both units run per iteration, so the stream always ends with a
		// run code and the decoder never starves mid-alternation.
		while !reader.is_at_end() {
			encode_literal_run(&mut reader, &mut data_enc)?;
			encode_zero_run(&mut reader, &mut rle_enc, GOLOMB_ORDER)?;
		}

		Ok(Box::new(RleBlob {
			height_crumbs,
			width_tiles,
			width_crumbs: crp.width_crumbs(),
			rle_stream: rle_enc.into_bytes(),
			data_stream: data_enc.into_bytes(),
		}))
	}
}

impl PixCrumbDecoder for PixCrumbRle {
	fn decompress(&mut self) -> Result<CrumbPlane> {
		let blob = self.blob.as_ref().expect("decompress called on an encoder without a blob");
		let target_rows = blob.height_crumbs as usize;
		let mut rle_dec = BitReader::new(&blob.rle_stream);
		let mut data_dec = BitReader::new(&blob.data_stream);
		let mut writer = CrumbWriter::new(blob.width_crumbs);

		loop {
			decode_literal_run(&mut data_dec, &mut writer)?;
			if writer.height_crumbs() >= target_rows && writer.is_length_aligned() {
				break;
			}
			decode_zero_run(&mut rle_dec, &mut writer, GOLOMB_ORDER)?;
			if writer.height_crumbs() >= target_rows && writer.is_length_aligned() {
				break;
			}
		}

		CrumbPlane::from_rows(writer.into_rows()?)
	}
}
