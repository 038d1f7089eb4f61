//! The single-stream VLC-RLE codec.
//!
//! The alternation of the RLE codec, collapsed into one stream: literal runs
//! are emitted through the RLE dictionary (terminator included), zero runs
//! as order-0 exp-Golomb numbers counted from the consumed terminator.

use std::any::Any;

use crate::coding::{BitWriter, CrumbReader, DICT_RLE, encode_zero_run};
use crate::error::Result;
use crate::img::{Crumb, CrumbPlane};

use super::{PixCrumbBlob, PixCrumbEncoder, check_dimensions};

const NAME: &str = "pixcrumb-vlc-rle";
const ABBREV_NAME: &str = "pcrle2";

/// Compressed form of one crumb plane: 2-byte header plus one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCrumbVlcRleBlob {
	height_crumbs: u8,
	width_tiles: u8,
	data_stream: Vec<u8>,
}

impl PixCrumbVlcRleBlob {
	/// Returns the combined literal/run stream.
	pub fn data_stream(&self) -> &[u8] {
		&self.data_stream
	}
}

impl PixCrumbBlob for PixCrumbVlcRleBlob {
	fn total_size(&self) -> u64 {
		(self.data_stream.len() + 2) as u64
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// The VLC-RLE codec state machine (encode only).
#[derive(Debug, Default)]
pub struct PixCrumbVlcRle;

impl PixCrumbVlcRle {
	/// Creates an encoder.
	pub fn new() -> Self {
		Self
	}
}

impl PixCrumbEncoder for PixCrumbVlcRle {
	fn name(&self) -> &'static str {
		NAME
	}

	fn abbrev_name(&self) -> &'static str {
		ABBREV_NAME
	}

	fn compress(&mut self, crp: &CrumbPlane) -> Result<Box<dyn PixCrumbBlob>> {
		let (height_crumbs, width_tiles) = check_dimensions(crp)?;
		let mut data_enc = BitWriter::new();
		let mut reader = CrumbReader::new(crp.crumbs())?;
		let mut rle_mode = false;

		while !reader.is_at_end() {
			if !rle_mode {
				let mut crumbs: Vec<Crumb> = Vec::new();
				while !reader.is_at_end() {
					let c = reader.read_crumb()?;
					crumbs.push(c);
					if c == 0 {
						break;
					}
				}
				data_enc.write_dict_coded_crumbs(&crumbs, &DICT_RLE);
				rle_mode = true;
			} else {
				encode_zero_run(&mut reader, &mut data_enc, 0)?;
				rle_mode = false;
			}
		}

		Ok(Box::new(PixCrumbVlcRleBlob {
			height_crumbs,
			width_tiles,
			data_stream: data_enc.into_bytes(),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compress(rows: Vec<Vec<u8>>) -> PixCrumbVlcRleBlob {
		let crp = CrumbPlane::from_rows(rows).unwrap();
		let blob = PixCrumbVlcRle::new().compress(&crp).unwrap();
		blob.as_any()
			.downcast_ref::<PixCrumbVlcRleBlob>()
			.unwrap()
			.clone()
	}

	#[test]
	fn test_literal_and_run_share_one_stream() {
		// Stream 5,0,0,0: dict codes "1101" "00", then golomb(run-1=2) =
		// "011".
		let blob = compress(vec![vec![5, 0, 0, 0]]);
		assert_eq!(blob.data_stream(), &[0b1101_0001, 0b1000_0000]);
		assert_eq!(blob.total_size(), 4);
	}

	#[test]
	fn test_literal_only_stream_omits_final_run() {
		// Stream 5,F: no zero ever terminates the literal run, so no run
		// code is emitted after the end of input.
		let blob = compress(vec![vec![5, 0xF]]);
		// "1101" "01".
		assert_eq!(blob.data_stream(), &[0b1101_0100]);
		assert_eq!(blob.total_size(), 3);
	}

	#[test]
	fn test_terminator_gets_dict_coded() {
		// Stream 0,0: the lone terminator is itself dict-coded ("00"), the
		// remaining zero becomes golomb(1) = "010".
		let blob = compress(vec![vec![0, 0]]);
		assert_eq!(blob.data_stream(), &[0b0001_0000]);
	}
}
