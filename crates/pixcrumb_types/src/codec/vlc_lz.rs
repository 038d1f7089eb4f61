//! The single-stream VLC-LZ codec.
//!
//! Literals are buffered and emitted through the LZ dictionary; a match is
//! only taken when its coded size beats dict-coding the crumbs it would
//! copy. Each flush is closed by the `END_OF_LITERALS` token, after which
//! the two exp-Golomb numbers `length - 1` and `offset - 1` follow.

use std::any::Any;
use std::io::SeekFrom;

use crate::coding::{
	BitWriter, CrumbReader, DICT_LZ, TOKEN_END_OF_LITERALS, dict_coded_len, exp_golomb16_len,
};
use crate::error::Result;
use crate::img::{Crumb, CrumbPlane};

use super::lz::{find_lz_match, lz_copied_crumbs};
use super::{PixCrumbBlob, PixCrumbEncoder, check_dimensions};

const NAME: &str = "pixcrumb-vlc-lz";
const ABBREV_NAME: &str = "pclz2";

/// Match window of the VLC-LZ codec.
const WINDOW_SIZE: u64 = 64;

/// Compressed form of one crumb plane: 2-byte header plus one stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCrumbVlcLzBlob {
	height_crumbs: u8,
	width_tiles: u8,
	data_stream: Vec<u8>,
}

impl PixCrumbVlcLzBlob {
	/// Returns the combined literal/match stream.
	pub fn data_stream(&self) -> &[u8] {
		&self.data_stream
	}
}

impl PixCrumbBlob for PixCrumbVlcLzBlob {
	fn total_size(&self) -> u64 {
		(self.data_stream.len() + 2) as u64
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// The VLC-LZ codec state machine (encode only).
#[derive(Debug, Default)]
pub struct PixCrumbVlcLz;

impl PixCrumbVlcLz {
	/// Creates an encoder.
	pub fn new() -> Self {
		Self
	}
}

impl PixCrumbEncoder for PixCrumbVlcLz {
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
		let token_len = u64::from(DICT_LZ[TOKEN_END_OF_LITERALS as usize].length);
		let mut buffered: Vec<Crumb> = Vec::new();

		while !reader.is_at_end() {
			let (length, offset) = find_lz_match(&reader, WINDOW_SIZE);
			if length > 0 {
				let length = length.min(0xFFFF);
				let copied = lz_copied_crumbs(&reader, length, offset);
				let literal_cost =
					dict_coded_len(&buffered, &DICT_LZ) + dict_coded_len(&copied, &DICT_LZ) + token_len;
				let lz_cost = token_len
					+ exp_golomb16_len((length - 1) as u16, 0)
					+ exp_golomb16_len((offset - 1) as u16, 0);
				if lz_cost < literal_cost {
					buffered.push(TOKEN_END_OF_LITERALS);
					data_enc.write_dict_coded_crumbs(&buffered, &DICT_LZ);
					data_enc.write_exp_golomb16((length - 1) as u16, 0);
					data_enc.write_exp_golomb16((offset - 1) as u16, 0);
					buffered.clear();
				} else {
					buffered.extend_from_slice(&copied);
				}
				reader.seek(SeekFrom::Current(length as i64))?;
				continue;
			}
			buffered.push(reader.read_crumb()?);
		}

		buffered.push(TOKEN_END_OF_LITERALS);
		data_enc.write_dict_coded_crumbs(&buffered, &DICT_LZ);

		Ok(Box::new(PixCrumbVlcLzBlob {
			height_crumbs,
			width_tiles,
			data_stream: data_enc.into_bytes(),
		}))
	}
}
