//! Zero-terminated literal runs.
//!
//! A literal unit is a sequence of 4-bit crumbs ending at the first `0x0`
//! (inclusive) or at the end of the input. On decode the terminator is
//! consumed but not emitted: the zero-run unit that follows re-creates it as
//! part of its run, so the two unit types always alternate cleanly.

use crate::error::Result;
use crate::img::Crumb;

use super::bitstream::{BitReader, BitWriter};
use super::iterator::{CrumbReader, CrumbWriter};

/// Encodes one literal unit from `src` into `dst`.
///
/// Returns `(crumbs_processed, bits_written)`; the trailing terminator is
/// not counted as processed.
pub fn encode_literal_run(src: &mut CrumbReader<'_>, dst: &mut BitWriter) -> Result<(u64, u64)> {
	let mut crumbs: Vec<Crumb> = Vec::new();
	while !src.is_at_end() {
		let c = src.read_crumb()?;
		crumbs.push(c);
		if c == 0 {
			break;
		}
	}
	dst.write_crumbs(&crumbs);
	Ok(((crumbs.len() as u64).saturating_sub(1), crumbs.len() as u64 * 4))
}

/// Decodes one literal unit from `src` into `dst`.
///
/// Reads nibbles while at least one whole crumb remains, stopping at a
/// terminator (consumed, not emitted). Returns `(crumbs_written,
/// bits_read)`.
pub fn decode_literal_run(src: &mut BitReader<'_>, dst: &mut CrumbWriter) -> Result<(u64, u64)> {
	let mut crumbs: Vec<Crumb> = Vec::new();
	let mut bits_read = 0u64;
	while src.bits_left() >= 4 {
		let c = src.read_bits(4)? as Crumb;
		bits_read += 4;
		if c == 0 {
			break;
		}
		crumbs.push(c);
	}
	dst.write_crumbs(&crumbs);
	Ok((crumbs.len() as u64, bits_read))
}
