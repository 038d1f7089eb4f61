//! Exp-Golomb coded zero runs.
//!
//! The run implicitly includes the terminating zero crumb consumed by the
//! literal unit that precedes it, so a run code always stands for at least
//! one zero. Runs are capped at 65535 crumbs; longer stretches of zeros are
//! simply split across further literal/run unit pairs.

use std::io::SeekFrom;

use crate::error::Result;

use super::bitstream::{BitReader, BitWriter, exp_golomb16_len};
use super::iterator::{CrumbReader, CrumbWriter};

/// Encodes one zero-run unit from `src` into `dst`.
///
/// Counts consecutive zero crumbs at the cursor, rewinding one position when
/// stopped by a non-zero, and emits `exp_golomb16(run - 1, order)` where the
/// run includes the already-consumed terminator. Returns
/// `(crumbs_processed, bits_written)`.
pub fn encode_zero_run(
	src: &mut CrumbReader<'_>,
	dst: &mut BitWriter,
	order: u32,
) -> Result<(u64, u64)> {
	let mut run: u64 = 1;
	while !src.is_at_end() && run < 0xFFFF {
		let c = src.read_crumb()?;
		if c != 0 {
			src.seek(SeekFrom::Current(-1))?;
			break;
		}
		run += 1;
	}
	let coded = (run - 1) as u16;
	dst.write_exp_golomb16(coded, order);
	Ok((run - 1, exp_golomb16_len(coded, order)))
}

/// Decodes one zero-run unit from `src` into `dst`, writing `value + 1`
/// zero crumbs. Returns `(crumbs_written, bits_read)`.
pub fn decode_zero_run(
	src: &mut BitReader<'_>,
	dst: &mut CrumbWriter,
	order: u32,
) -> Result<(u64, u64)> {
	let value = src.read_exp_golomb16(order)?;
	let run = u64::from(value) + 1;
	dst.write_crumbs(&vec![0; run as usize]);
	Ok((run, exp_golomb16_len(value, order)))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_encode_counts_zeros_and_rewinds() {
		let rows = vec![vec![0, 0, 0, 7]];
		let mut reader = CrumbReader::new(&rows).unwrap();
		let mut writer = BitWriter::new();
		let (crumbs, bits) = encode_zero_run(&mut reader, &mut writer, 2).unwrap();
		assert_eq!(crumbs, 3);
		assert_eq!(reader.tell(), 3);
		// run = 4, coded value 3, order 2: "1" + "11".
		assert_eq!(bits, 3);
		assert_eq!(writer.into_bytes(), vec![0b1110_0000]);
	}

	#[test]
	fn test_empty_run_still_emits_a_code() {
		let rows = vec![vec![7, 7]];
		let mut reader = CrumbReader::new(&rows).unwrap();
		let mut writer = BitWriter::new();
		let (crumbs, _) = encode_zero_run(&mut reader, &mut writer, 2).unwrap();
		assert_eq!(crumbs, 0);
		assert_eq!(reader.tell(), 0);
		// Coded value 0: "1" + "00".
		assert_eq!(writer.into_bytes(), vec![0b1000_0000]);
	}

	#[test]
	fn test_unit_pair_roundtrip() {
		let rows = vec![vec![0, 0, 0, 0]];
		let mut reader = CrumbReader::new(&rows).unwrap();
		let mut enc = BitWriter::new();
		// Simulate the preceding literal unit consuming the terminator.
		reader.read_crumb().unwrap();
		encode_zero_run(&mut reader, &mut enc, 2).unwrap();
		assert!(reader.is_at_end());

		let data = enc.into_bytes();
		let mut dec = BitReader::new(&data);
		let mut writer = CrumbWriter::new(4);
		let (run, _) = decode_zero_run(&mut dec, &mut writer, 2).unwrap();
		assert_eq!(run, 4);
		assert_eq!(writer.into_rows().unwrap(), rows);
	}
}
