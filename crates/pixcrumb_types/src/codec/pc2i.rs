//! The 3-mode codec with implicit mode signalling.
//!
//! Instead of a fixed-width tag, the next mode is coded against the current
//! one, spending at most one bit:
//!
//! | from         | next (signal bit)                      |
//! |--------------|----------------------------------------|
//! | `SingleZero` | `SingleZero` (0), `Literal` (1)        |
//! | `ZeroRle`    | `Literal`, forced — no bit emitted     |
//! | `Literal`    | `ZeroRle` (0), `Literal` (1)           |
//!
//! The initial mode is `Literal`. Selection peeks two crumbs: `SingleZero`
//! needs `c0=0`, `ZeroRle` needs `c0=c1=0`; anything else (including a
//! lookahead cut short by the end of input) stays `Literal`.

use std::any::Any;
use std::io::SeekFrom;

use log::debug;

use crate::coding::{BitWriter, CrumbReader};
use crate::error::{PixCrumbError, Result};
use crate::img::{Crumb, CrumbPlane};

use super::{PixCrumbBlob, PixCrumbEncoder, check_dimensions};

const NAME: &str = "pixcrumb2i";
const ABBREV_NAME: &str = "pc2i";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	SingleZero = 0,
	ZeroRle = 1,
	Literal = 2,
}

/// Compressed form of one crumb plane: header plus command and data streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCrumb2iBlob {
	height_crumbs: u8,
	width_tiles: u8,
	command_stream: Vec<u8>,
	data_stream: Vec<u8>,
}

impl PixCrumb2iBlob {
	/// Returns the command stream (signal bits and run codes).
	pub fn command_stream(&self) -> &[u8] {
		&self.command_stream
	}

	/// Returns the literal stream.
	pub fn data_stream(&self) -> &[u8] {
		&self.data_stream
	}
}

impl PixCrumbBlob for PixCrumb2iBlob {
	fn total_size(&self) -> u64 {
		(self.command_stream.len() + self.data_stream.len() + 4) as u64
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// The 3-mode codec state machine (encode only).
#[derive(Debug, Default)]
pub struct PixCrumb2i {
	mode_usage: [u64; 3],
	mode_switches: [[u64; 3]; 3],
}

impl PixCrumb2i {
	/// Creates an encoder.
	pub fn new() -> Self {
		Self::default()
	}

	fn determine_next_mode(
		&mut self,
		reader: &CrumbReader<'_>,
		command_enc: &mut BitWriter,
		old_mode: Mode,
	) -> Result<Mode> {
		if old_mode == Mode::ZeroRle {
			// A run is always followed by literals; nothing to signal.
			self.mode_switches[old_mode as usize][Mode::Literal as usize] += 1;
			self.mode_usage[Mode::Literal as usize] += 1;
			return Ok(Mode::Literal);
		}

		let mode = match reader.peek_n_crumbs(2) {
			Ok(c) => match old_mode {
				Mode::SingleZero => {
					if c[0] == 0 {
						Mode::SingleZero
					} else {
						Mode::Literal
					}
				}
				Mode::Literal => {
					if c[0] == 0 && c[1] == 0 {
						Mode::ZeroRle
					} else {
						Mode::Literal
					}
				}
				Mode::ZeroRle => unreachable!(),
			},
			Err(PixCrumbError::UnexpectedEof) => Mode::Literal,
			Err(e) => return Err(e),
		};

		let signal_bit = match (old_mode, mode) {
			(Mode::SingleZero, Mode::SingleZero) | (Mode::Literal, Mode::ZeroRle) => 0,
			(Mode::SingleZero, Mode::Literal) | (Mode::Literal, Mode::Literal) => 1,
			(from, to) => unreachable!("invalid mode transition: {from:?} -> {to:?}"),
		};
		command_enc.write_bit(signal_bit);
		self.mode_switches[old_mode as usize][mode as usize] += 1;
		self.mode_usage[mode as usize] += 1;
		Ok(mode)
	}

	fn execute_mode(
		mode: Mode,
		reader: &mut CrumbReader<'_>,
		command_enc: &mut BitWriter,
		data_enc: &mut BitWriter,
	) -> Result<()> {
		match mode {
			Mode::SingleZero => {
				reader.seek(SeekFrom::Current(1))?;
			}
			Mode::ZeroRle => {
				let mut run: u64 = 0;
				while !reader.is_at_end() && run < 0xFFFF {
					if reader.read_crumb()? != 0 {
						reader.seek(SeekFrom::Current(-1))?;
						break;
					}
					run += 1;
				}
				assert!(run >= 2, "zero-RLE mode invoked with less than 2 consecutive zero values");
				command_enc.write_exp_golomb16((run - 2) as u16, 2);
			}
			Mode::Literal => {
				let mut crumbs: Vec<Crumb> = Vec::new();
				while !reader.is_at_end() {
					let c = reader.read_crumb()?;
					crumbs.push(c);
					if c == 0 {
						break;
					}
				}
				data_enc.write_crumbs(&crumbs);
			}
		}
		Ok(())
	}
}

impl PixCrumbEncoder for PixCrumb2i {
	fn name(&self) -> &'static str {
		NAME
	}

	fn abbrev_name(&self) -> &'static str {
		ABBREV_NAME
	}

	fn compress(&mut self, crp: &CrumbPlane) -> Result<Box<dyn PixCrumbBlob>> {
		let (height_crumbs, width_tiles) = check_dimensions(crp)?;
		let mut command_enc = BitWriter::new();
		let mut data_enc = BitWriter::new();
		let mut reader = CrumbReader::new(crp.crumbs())?;
		let mut mode = Mode::Literal;

		while !reader.is_at_end() {
			mode = self.determine_next_mode(&reader, &mut command_enc, mode)?;
			Self::execute_mode(mode, &mut reader, &mut command_enc, &mut data_enc)?;
		}

		debug!(
			"{NAME}: mode usage {:?}, transitions {:?}",
			self.mode_usage, self.mode_switches
		);

		Ok(Box::new(PixCrumb2iBlob {
			height_crumbs,
			width_tiles,
			command_stream: command_enc.into_bytes(),
			data_stream: data_enc.into_bytes(),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compress(rows: Vec<Vec<u8>>) -> PixCrumb2iBlob {
		let crp = CrumbPlane::from_rows(rows).unwrap();
		let blob = PixCrumb2i::new().compress(&crp).unwrap();
		blob.as_any().downcast_ref::<PixCrumb2iBlob>().unwrap().clone()
	}

	#[test]
	fn test_literal_then_zero_run() {
		// Stream 1,0,0,0: literal [1,0], then a run of the two remaining
		// zeros.
		let blob = compress(vec![vec![1, 0], vec![0, 0]]);
		// Signal bits: literal->literal "1", literal->zero-rle "0"; then
		// golomb_k2(0) = "100".
		assert_eq!(blob.command_stream(), &[0b1010_0000]);
		assert_eq!(blob.data_stream(), &[0b0001_0000]);
	}

	#[test]
	fn test_single_zero_chain() {
		// Stream 5,0,7,0,1: literals keep interleaving with lone zeros, so
		// no run mode ever fires.
		let blob = compress(vec![vec![5, 0, 7, 0, 1]]);
		// literal->literal [5,0] "1"; literal->literal [7,0] "1";
		// literal->literal [1] "1".
		assert_eq!(blob.command_stream(), &[0b1110_0000]);
		assert_eq!(blob.data_stream(), &[0x50, 0x70, 0x10]);
	}

	#[test]
	fn test_forced_literal_after_run_emits_no_bit() {
		// Stream 1,0,0,0,2: after the zero run the literal mode is forced
		// and costs no signal bit.
		let blob = compress(vec![vec![1, 0, 0, 0, 2]]);
		// "1" (L->L), "0" (L->RLE), golomb_k2(0) = "100", then nothing for
		// the forced literal.
		assert_eq!(blob.command_stream(), &[0b1010_0000]);
		assert_eq!(blob.data_stream(), &[0x10, 0x20]);
	}
}
