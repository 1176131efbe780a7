//! Transfer channels between a caller's memory and the service.
//!
//! The service never touches caller memory directly. Every byte crosses
//! through one of two traits:
//!
//! - [`TransferSource`] - copies a range of caller bytes into a local buffer
//! - [`TransferSink`] - copies a local buffer into the caller's range
//!
//! Both are synchronous: a call either completes the whole range or fails.
//! Implementations for in-memory buffers (`[u8]`, `Vec<u8>`, [`Bytes`],
//! [`BytesMut`]) and for std I/O streams ([`ReadSource`], [`WriteSink`]) are
//! provided.
//!
//! [`Bytes`]: bytes::Bytes
//! [`BytesMut`]: bytes::BytesMut

mod memory;
mod stream;

pub use stream::{ReadSource, WriteSink};

use crate::error::TransferError;

/// A caller-described byte range the service can copy from.
pub trait TransferSource {
    /// Copies `buf.len()` bytes starting at `offset` into `buf`.
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError>;
}

/// A caller-described byte range the service can copy into.
pub trait TransferSink {
    /// Copies all of `buf` to the destination starting at `offset`.
    fn copy_out_of(&mut self, offset: u64, buf: &[u8]) -> Result<(), TransferError>;
}

impl<T: TransferSource + ?Sized> TransferSource for &mut T {
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
        (**self).copy_into(offset, buf)
    }
}

impl<T: TransferSink + ?Sized> TransferSink for &mut T {
    fn copy_out_of(&mut self, offset: u64, buf: &[u8]) -> Result<(), TransferError> {
        (**self).copy_out_of(offset, buf)
    }
}
