//! The LZ codec: literal runs alternating with short-window back references.
//!
//! The match scan allows self-overlapping copies: a candidate at offset `o`
//! matches position `i` against the crumb at relative `-o + (i mod o)`, so a
//! one-crumb offset can reproduce an arbitrarily long run.

use std::any::Any;
use std::io::SeekFrom;

use crate::coding::{BitWriter, CrumbReader, encode_literal_run};
use crate::error::Result;
use crate::img::{Crumb, CrumbPlane};

use super::{PixCrumbBlob, PixCrumbEncoder, check_dimensions};

const NAME: &str = "pixcrumb-lz";
const ABBREV_NAME: &str = "pclz";

/// Match window of the two-stream LZ codec.
const WINDOW_SIZE: u64 = 16;

/// Finds the longest self-overlapping match at the reader's position within
/// `window`. Returns `(length, offset)`; a zero length means no match.
pub(super) fn find_lz_match(reader: &CrumbReader<'_>, window: u64) -> (u64, u64) {
	let mut best_length = 0u64;
	let mut best_offset = 0u64;
	for offset in 1..window as i64 {
		let mut length = 0i64;
		loop {
			let dest = reader.peek_crumb_at(length, true);
			let src = reader.peek_crumb_at(-offset + length % offset, true);
			match (dest, src) {
				(Ok(d), Ok(s)) if d == s => length += 1,
				_ => break,
			}
		}
		if length as u64 > best_length {
			best_length = length as u64;
			best_offset = offset as u64;
		}
	}
	(best_length, best_offset)
}

/// Returns the crumbs a match of `(length, offset)` would copy.
pub(super) fn lz_copied_crumbs(reader: &CrumbReader<'_>, length: u64, offset: u64) -> Vec<Crumb> {
	let mut crumbs = Vec::with_capacity(length as usize);
	for i in 0..length as i64 {
		match reader.peek_crumb_at(-(offset as i64) + i % offset as i64, true) {
			Ok(c) => crumbs.push(c),
			Err(_) => break,
		}
	}
	crumbs
}

/// Compressed form of one crumb plane: header plus LZ and data streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCrumbLzBlob {
	height_crumbs: u8,
	width_tiles: u8,
	lz_stream: Vec<u8>,
	data_stream: Vec<u8>,
}

impl PixCrumbLzBlob {
	/// Returns the match stream (lengths and offsets).
	pub fn lz_stream(&self) -> &[u8] {
		&self.lz_stream
	}

	/// Returns the literal stream.
	pub fn data_stream(&self) -> &[u8] {
		&self.data_stream
	}
}

impl PixCrumbBlob for PixCrumbLzBlob {
	fn total_size(&self) -> u64 {
		(self.lz_stream.len() + self.data_stream.len() + 4) as u64
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// The LZ codec state machine (encode only).
#[derive(Debug, Default)]
pub struct PixCrumbLz;

impl PixCrumbLz {
	/// Creates an encoder.
	pub fn new() -> Self {
		Self
	}
}

impl PixCrumbEncoder for PixCrumbLz {
	fn name(&self) -> &'static str {
		NAME
	}

	fn abbrev_name(&self) -> &'static str {
		ABBREV_NAME
	}

	fn compress(&mut self, crp: &CrumbPlane) -> Result<Box<dyn PixCrumbBlob>> {
		let (height_crumbs, width_tiles) = check_dimensions(crp)?;
		let mut lz_enc = BitWriter::new();
		let mut data_enc = BitWriter::new();
		let mut reader = CrumbReader::new(crp.crumbs())?;
		let mut lz_mode = false;

		while !reader.is_at_end() {
			if !lz_mode {
				encode_literal_run(&mut reader, &mut data_enc)?;
				lz_mode = true;
			} else {
				let (length, offset) = find_lz_match(&reader, WINDOW_SIZE);
				let length = length.min(0xFFFF);
				lz_enc.write_exp_golomb16(length as u16, 0);
				if length > 0 {
					lz_enc.write_exp_golomb16((offset - 1) as u16, 0);
					reader.seek(SeekFrom::Current(length as i64))?;
				}
				lz_mode = false;
			}
		}

		Ok(Box::new(PixCrumbLzBlob {
			height_crumbs,
			width_tiles,
			lz_stream: lz_enc.into_bytes(),
			data_stream: data_enc.into_bytes(),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compress(rows: Vec<Vec<u8>>) -> PixCrumbLzBlob {
		let crp = CrumbPlane::from_rows(rows).unwrap();
		let blob = PixCrumbLz::new().compress(&crp).unwrap();
		blob.as_any().downcast_ref::<PixCrumbLzBlob>().unwrap().clone()
	}

	#[test]
	fn test_match_scan_prefers_longest() {
		let rows = vec![vec![1, 0, 1, 0, 1, 0]];
		let mut reader = CrumbReader::new(&rows).unwrap();
		reader.seek(SeekFrom::Start(2)).unwrap();
		let (length, offset) = find_lz_match(&reader, 16);
		// Offset 2 reproduces the whole remaining 1,0,1,0 tail.
		assert_eq!((length, offset), (4, 2));
		assert_eq!(lz_copied_crumbs(&reader, length, offset), vec![1, 0, 1, 0]);
	}

	#[test]
	fn test_no_match_at_start() {
		let rows = vec![vec![1, 2, 3, 4]];
		let reader = CrumbReader::new(&rows).unwrap();
		assert_eq!(find_lz_match(&reader, 16).0, 0);
	}

	#[test]
	fn test_self_overlapping_run_copy() {
		let rows = vec![vec![7, 7, 7, 7, 7, 7, 7, 7]];
		let mut reader = CrumbReader::new(&rows).unwrap();
		reader.seek(SeekFrom::Start(1)).unwrap();
		let (length, offset) = find_lz_match(&reader, 16);
		assert_eq!((length, offset), (7, 1));
	}

	#[test]
	fn test_alternating_literal_and_match_phases() {
		// Stream 1,0,1,0: literal [1,0], then a length-2 match at offset 2.
		let blob = compress(vec![vec![1, 0, 1, 0]]);
		assert_eq!(blob.data_stream(), &[0x10]);
		// golomb(2) = "011", golomb(offset-1=1) = "010".
		assert_eq!(blob.lz_stream(), &[0b0110_1000]);
		assert_eq!(blob.total_size(), 6);
	}

	#[test]
	fn test_empty_match_emits_length_zero() {
		// Stream 1,0,9: after the literal the only remaining crumb has no
		// prior occurrence at a usable offset.
		let blob = compress(vec![vec![1, 0, 9]]);
		// LZ phase: golomb(0) = "1"; then a second literal [9].
		assert_eq!(blob.lz_stream(), &[0b1000_0000]);
		assert_eq!(blob.data_stream(), &[0x10, 0x90]);
	}
}
