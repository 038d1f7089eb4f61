//! Image preprocessing: paletted pixels to bitplanes to crumb planes.

mod crumb;
mod indexed;
mod planar;

pub use crumb::{Crumb, CrumbImage, CrumbPlane};
pub use indexed::IndexedImage;
pub use planar::{Bitplane, PlanarImage};
