//! Reusable coding primitives shared by the codec state machines: bit-level
//! I/O, the serpentine crumb iterator, fixed prefix dictionaries and the
//! literal-run / zero-run coding units.

mod bitstream;
mod entropy;
mod iterator;
mod literals;
mod runs;

pub use bitstream::{BitReader, BitWriter, dict_coded_len, exp_golomb16_len};
pub use entropy::{CRUMB_HISTOGRAM, DICT_LZ, DICT_RLE, DictWord, TOKEN_END_OF_LITERALS};
pub use iterator::{CrumbReader, CrumbWriter, serpentine};
pub use literals::{decode_literal_run, encode_literal_run};
pub use runs::{decode_zero_run, encode_zero_run};
