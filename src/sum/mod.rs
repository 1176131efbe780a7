//! Checksum state and digest types.
//!
//! - [`Accumulator`] - Running Adler sums with pack/unpack
//! - [`Digest`] - 8-byte lowercase hex rendering of a packed value

mod accumulator;
mod digest;

pub use accumulator::{ADLER_MODULUS, Accumulator, SEED};
pub use digest::{DIGEST_LEN, Digest};
