//! Core data types and codecs for the `pixcrumb-rs` project.
//!
//! PixCrumb is an experimental compression family for paletted 2D art
//! assets on severely constrained targets. An input image is decomposed
//! into one bitplane per bit of palette index, each bitplane is vertically
//! delta-filtered and subdivided into 2×2-pixel "crumbs" (4-bit symbols),
//! and the crumb matrix is traversed in serpentine order before being fed
//! to one of several interchangeable entropy coders.
//!
//! # Pipeline
//!
//! ```rust
//! use pixcrumb_types::codec::{PixCrumbEncoder, PixCrumbRle};
//! use pixcrumb_types::img::{CrumbImage, IndexedImage, PlanarImage};
//!
//! # fn main() -> pixcrumb_types::Result<()> {
//! let image = IndexedImage::new(4, 4, 2, vec![1; 16])?;
//! let mut planar = PlanarImage::new(&image)?;
//! for plane in planar.bitplanes_mut() {
//! 	plane.delta_encode();
//! }
//! let crumbs = CrumbImage::from_planar(&planar);
//!
//! let mut codec = PixCrumbRle::new();
//! let blob = codec.compress(&crumbs.planes()[0])?;
//! assert!(blob.total_size() >= 4);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod coding;
pub mod error;
pub mod img;
pub mod prelude;

pub use error::{PixCrumbError, Result};
