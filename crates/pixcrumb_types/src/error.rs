//! Error types for the crumb compression pipeline.

use thiserror::Error;

/// Errors that can occur while preparing, compressing or decompressing
/// crumb data.
#[derive(Debug, Error)]
pub enum PixCrumbError {
	/// Image exceeds the blob header's dimension fields
	#[error(
		"image too big: rounded pixel dimensions {width_px}x{height_px} exceed max dimensions of 2040x510"
	)]
	ImageTooLarge {
		/// Width in pixels, rounded up to whole tiles
		width_px: u64,
		/// Height in pixels, rounded up to whole crumbs
		height_px: u64,
	},

	/// Blob is shorter than its fixed header
	#[error("blob too short for header: expected at least {expected} bytes, got {actual} bytes")]
	BlobInvalid {
		/// Minimum number of bytes required by the header
		expected: usize,
		/// Actual number of bytes supplied
		actual: usize,
	},

	/// Blob header offsets disagree with the buffer length
	#[error("blob data stream offset {offset} is inconsistent with blob length {length}")]
	BlobInconsistent {
		/// Data stream offset read from the header
		offset: usize,
		/// Total blob length in bytes
		length: usize,
	},

	/// Blob was handed to a codec that does not recognise it
	#[error("blob is not a {codec} blob")]
	WrongBlobType {
		/// Name of the codec that rejected the blob
		codec: &'static str,
	},

	/// Negative or beyond-length crumb iterator access
	#[error("crumb index {index} out of bounds (crumb data has length {length})")]
	CrumbIndexOutOfBounds {
		/// Index that was accessed
		index: i64,
		/// Length of the crumb data
		length: u64,
	},

	/// Crumb matrix rows have differing widths
	#[error("crumb matrix has inconsistent line widths")]
	CrumbMatrixWidthInconsistent,

	/// Crumb data does not fill the last line of the matrix
	#[error("crumb data does not fill the last line of the matrix")]
	CrumbDataNotAlignedToMatrix,

	/// Partial crumb or bit read
	#[error("unexpected end of stream")]
	UnexpectedEof,

	/// Seek target lies before the start or past the end of the stream
	#[error("seek to bit/crumb position {offset} is out of range")]
	SeekOutOfRange {
		/// Requested absolute position
		offset: i64,
	},

	/// Input image failed validation
	#[error("invalid image: {0}")]
	InvalidImage(String),
}

/// A specialised `Result` type for crumb compression operations.
pub type Result<T> = std::result::Result<T, PixCrumbError>;
