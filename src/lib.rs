//! `pixcrumb-rs` — bit-packed crumb compression for paletted 2D art assets.
//!
//! The codec pipeline lives in [`pixcrumb_types`] and is re-exported here;
//! this crate adds the paletted-image ingestion used by the command line
//! tools.

pub use pixcrumb_types::*;

pub mod loader;
