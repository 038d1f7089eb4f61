//! The 4-mode predictive codec.
//!
//! Every unit is announced by a 2-bit mode tag in the command stream; the
//! mode is chosen by peeking up to three crumbs ahead:
//!
//! | lookahead (3 crumbs)            | mode             |
//! |---------------------------------|------------------|
//! | `c0=0` and not `c1=c2=0`        | `SingleZero`     |
//! | `c0=c1=c2=0`                    | `ZeroRle`        |
//! | `c0!=0` and (`c1=0` or `c2=0`)  | `SingleLiteral`  |
//! | `c0!=0`, `c1!=0`, `c2!=0`       | `Literal`        |
//!
//! With fewer than three crumbs left the single-value modes win.

use std::any::Any;
use std::io::SeekFrom;

use log::debug;

use crate::coding::{BitWriter, CrumbReader};
use crate::error::{PixCrumbError, Result};
use crate::img::{Crumb, CrumbPlane};

use super::{PixCrumbBlob, PixCrumbEncoder, check_dimensions};

const NAME: &str = "pixcrumb2";
const ABBREV_NAME: &str = "pc2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
	SingleZero = 0,
	ZeroRle = 1,
	SingleLiteral = 2,
	Literal = 3,
}

/// Compressed form of one crumb plane: header plus command and data streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixCrumb2Blob {
	height_crumbs: u8,
	width_tiles: u8,
	command_stream: Vec<u8>,
	data_stream: Vec<u8>,
}

impl PixCrumb2Blob {
	/// Returns the command stream (mode tags and run codes).
	pub fn command_stream(&self) -> &[u8] {
		&self.command_stream
	}

	/// Returns the literal stream.
	pub fn data_stream(&self) -> &[u8] {
		&self.data_stream
	}
}

impl PixCrumbBlob for PixCrumb2Blob {
	fn total_size(&self) -> u64 {
		(self.command_stream.len() + self.data_stream.len() + 4) as u64
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

/// The 4-mode codec state machine (encode only).
#[derive(Debug, Default)]
pub struct PixCrumb2 {
	mode_usage: [u64; 4],
	mode_switches: [[u64; 4]; 4],
}

impl PixCrumb2 {
	/// Creates an encoder.
	pub fn new() -> Self {
		Self::default()
	}

	fn determine_next_mode(
		&mut self,
		reader: &CrumbReader<'_>,
		command_enc: &mut BitWriter,
		old_mode: Option<Mode>,
	) -> Result<Mode> {
		let mode = match reader.peek_n_crumbs(3) {
			Ok(c) => {
				if c[0] == 0 && (c[1] != 0 || c[2] != 0) {
					// One or two zeroes in sequence; a single zero is cheaper
					// than a run code.
					Mode::SingleZero
				} else if c[0] == 0 && c[1] == 0 && c[2] == 0 {
					Mode::ZeroRle
				} else if c[0] != 0 && (c[1] == 0 || c[2] == 0) {
					Mode::SingleLiteral
				} else {
					Mode::Literal
				}
			}
			Err(PixCrumbError::UnexpectedEof) => {
				// Only one or two crumbs left; the single value modes are
				// more efficient here.
				if reader.peek_crumb()? == 0 {
					Mode::SingleZero
				} else {
					Mode::SingleLiteral
				}
			}
			Err(e) => return Err(e),
		};
		command_enc.write_bits(mode as u64, 2);
		if let Some(old) = old_mode {
			self.mode_switches[old as usize][mode as usize] += 1;
		}
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
				assert!(run >= 3, "zero-RLE mode invoked with less than 3 consecutive zero values");
				command_enc.write_exp_golomb16((run - 3) as u16, 1);
			}
			Mode::SingleLiteral => {
				let c = reader.read_crumb()?;
				data_enc.write_bits(u64::from(c), 4);
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

impl PixCrumbEncoder for PixCrumb2 {
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
		let mut mode: Option<Mode> = None;

		while !reader.is_at_end() {
			let next = self.determine_next_mode(&reader, &mut command_enc, mode)?;
			Self::execute_mode(next, &mut reader, &mut command_enc, &mut data_enc)?;
			mode = Some(next);
		}

		debug!(
			"{NAME}: mode usage {:?}, transitions {:?}",
			self.mode_usage, self.mode_switches
		);

		Ok(Box::new(PixCrumb2Blob {
			height_crumbs,
			width_tiles,
			command_stream: command_enc.into_bytes(),
			data_stream: data_enc.into_bytes(),
		}))
	}
}
