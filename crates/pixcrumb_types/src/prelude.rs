//! Prelude module for `pixcrumb_types`.
//!
//! Provides a convenient way to import the commonly used types in one line.
//!
//! # Examples
//!
//! ```no_run
//! use pixcrumb_types::prelude::*;
//!
//! let encoders = all_encoders();
//! assert!(encoder_by_name("pcrle").is_some());
//! ```

// Error types
#[doc(inline)]
pub use crate::error::{PixCrumbError, Result};

// Image pipeline types
#[doc(inline)]
pub use crate::img::{Bitplane, Crumb, CrumbImage, CrumbPlane, IndexedImage, PlanarImage};

// Codec traits and registry
#[doc(inline)]
pub use crate::codec::{
	PixCrumbBlob, PixCrumbDecoder, PixCrumbEncoder, all_encoders, encoder_by_name,
};

// Codec implementations
#[doc(inline)]
pub use crate::codec::{
	PixCrumb2, PixCrumb2i, PixCrumb3, PixCrumbLz, PixCrumbRle, PixCrumbVlcLz, PixCrumbVlcRle,
	RleBlob,
};

// Re-export the coding module for advanced usage
#[doc(inline)]
pub use crate::coding;
