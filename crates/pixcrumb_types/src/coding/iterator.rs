//! Serpentine (boustrophedon) crumb matrix iteration.
//!
//! All cursor arithmetic is linear; the physical matrix position is derived
//! on every access, so rows are traversed left-to-right and right-to-left
//! alternately. This keeps delta-filtered residues adjacent across row wraps
//! and lets the run-length coders see longer zero runs.

use std::io::SeekFrom;

use crate::error::{PixCrumbError, Result};
use crate::img::Crumb;

/// Maps a linear index to its `(y, x)` matrix position for a serpentine
/// traversal of the given row width.
pub fn serpentine(index: u64, width: u64) -> (usize, usize) {
	let y = index / width;
	let x_offs = index % width;
	let x = if y & 1 == 0 { x_offs } else { width - x_offs - 1 };
	(y as usize, x as usize)
}

/// A read cursor over a borrowed crumb matrix in serpentine order.
#[derive(Debug)]
pub struct CrumbReader<'a> {
	rows: &'a [Vec<Crumb>],
	index: i64,
	total: u64,
	width: u64,
}

impl<'a> CrumbReader<'a> {
	/// Creates a reader over a rectangular crumb matrix.
	pub fn new(rows: &'a [Vec<Crumb>]) -> Result<Self> {
		let width = rows.first().map_or(0, Vec::len) as u64;
		if rows.iter().any(|row| row.len() as u64 != width) {
			return Err(PixCrumbError::CrumbMatrixWidthInconsistent);
		}
		Ok(Self {
			rows,
			index: 0,
			total: rows.len() as u64 * width,
			width,
		})
	}

	/// Returns the total number of crumbs.
	pub fn len(&self) -> u64 {
		self.total
	}

	/// Returns `true` for an empty matrix.
	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// Returns the linear cursor position.
	pub fn tell(&self) -> u64 {
		self.index as u64
	}

	/// Returns `true` once the cursor has passed the last crumb.
	pub fn is_at_end(&self) -> bool {
		self.index >= self.total as i64
	}

	/// Moves the linear cursor. Positions outside `0..=len` are rejected and
	/// leave the cursor unchanged.
	pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
		let target = match pos {
			SeekFrom::Start(offset) => offset as i64,
			SeekFrom::Current(offset) => self.index + offset,
			SeekFrom::End(offset) => self.total as i64 + offset,
		};
		if target < 0 || target > self.total as i64 {
			return Err(PixCrumbError::SeekOutOfRange { offset: target });
		}
		self.index = target;
		Ok(target as u64)
	}

	/// Reads the crumb at `offset` (relative to the cursor, or absolute)
	/// without moving the cursor.
	pub fn peek_crumb_at(&self, offset: i64, relative: bool) -> Result<Crumb> {
		let index = if relative { self.index + offset } else { offset };
		if index < 0 || index >= self.total as i64 {
			return Err(PixCrumbError::CrumbIndexOutOfBounds {
				index,
				length: self.total,
			});
		}
		let (y, x) = serpentine(index as u64, self.width);
		Ok(self.rows[y][x])
	}

	/// Reads the crumb under the cursor without moving it.
	pub fn peek_crumb(&self) -> Result<Crumb> {
		self.peek_crumb_at(0, true)
	}

	/// Reads `n` crumbs starting at `offset` without moving the cursor.
	///
	/// An invalid starting position yields `CrumbIndexOutOfBounds`; running
	/// off the end partway yields `UnexpectedEof` — never a silently short
	/// result.
	pub fn peek_n_crumbs_at(&self, n: u64, offset: i64, relative: bool) -> Result<Vec<Crumb>> {
		self.peek_crumb_at(offset, relative)?;
		let mut crumbs = Vec::with_capacity(n as usize);
		for idx in 0..n as i64 {
			match self.peek_crumb_at(offset + idx, relative) {
				Ok(c) => crumbs.push(c),
				Err(PixCrumbError::CrumbIndexOutOfBounds { .. }) => {
					return Err(PixCrumbError::UnexpectedEof);
				}
				Err(e) => return Err(e),
			}
		}
		Ok(crumbs)
	}

	/// Reads `n` crumbs at the cursor without moving it.
	pub fn peek_n_crumbs(&self, n: u64) -> Result<Vec<Crumb>> {
		self.peek_n_crumbs_at(n, 0, true)
	}

	/// Reads the crumb under the cursor and advances.
	pub fn read_crumb(&mut self) -> Result<Crumb> {
		let c = self.peek_crumb().map_err(|_| PixCrumbError::UnexpectedEof)?;
		self.index += 1;
		Ok(c)
	}

	/// Reads `n` crumbs, advancing the cursor.
	pub fn read_crumbs(&mut self, n: u64) -> Result<Vec<Crumb>> {
		let mut crumbs = Vec::with_capacity(n as usize);
		for _ in 0..n {
			crumbs.push(self.read_crumb()?);
		}
		Ok(crumbs)
	}
}

/// A write cursor producing a crumb matrix in serpentine order.
///
/// The matrix grows by one zero-filled row of the configured width whenever
/// the linear cursor advances into a new row.
#[derive(Debug)]
pub struct CrumbWriter {
	rows: Vec<Vec<Crumb>>,
	index: u64,
	width: u64,
}

impl CrumbWriter {
	/// Creates a writer for a matrix of the given crumb width.
	pub fn new(width: u64) -> Self {
		Self {
			rows: Vec::new(),
			index: 0,
			width,
		}
	}

	/// Returns the number of crumbs written.
	pub fn len(&self) -> u64 {
		self.index
	}

	/// Returns `true` if nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.index == 0
	}

	/// Returns the number of rows materialised so far.
	pub fn height_crumbs(&self) -> usize {
		self.rows.len()
	}

	/// Returns `true` when the written data fills the last row exactly.
	pub fn is_length_aligned(&self) -> bool {
		self.width > 0 && self.index % self.width == 0
	}

	/// Appends one crumb at the cursor position.
	pub fn write_crumb(&mut self, c: Crumb) {
		let (y, x) = serpentine(self.index, self.width);
		if y >= self.rows.len() {
			self.rows.push(vec![0; self.width as usize]);
		}
		self.rows[y][x] = c;
		self.index += 1;
	}

	/// Appends a sequence of crumbs.
	pub fn write_crumbs(&mut self, crumbs: &[Crumb]) {
		for &c in crumbs {
			self.write_crumb(c);
		}
	}

	/// Consumes the writer and returns the matrix; fails with
	/// `CrumbDataNotAlignedToMatrix` if the data does not fill the last row.
	pub fn into_rows(self) -> Result<Vec<Vec<Crumb>>> {
		if !self.is_length_aligned() {
			return Err(PixCrumbError::CrumbDataNotAlignedToMatrix);
		}
		Ok(self.rows)
	}
}
