//! Transfer channels backed by std I/O streams.
//!
//! Streams cannot seek, so both adapters track their position and reject any
//! copy that does not start exactly where the previous one ended.

use std::io::{Read, Write};

use super::{TransferSink, TransferSource};
use crate::error::TransferError;

/// A [`TransferSource`] reading sequentially from a [`Read`] implementor.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use adlersum::{ChecksumService, ReadSource};
///
/// let mut service = ChecksumService::default();
/// let mut source = ReadSource::new(Cursor::new(b"abc"));
/// assert_eq!(service.write(&mut source, 3)?, 3);
/// # Ok::<(), adlersum::ServiceError>(())
/// ```
#[derive(Debug)]
pub struct ReadSource<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ReadSource<R> {
    /// Wraps a reader positioned at offset 0.
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> TransferSource for ReadSource<R> {
    fn copy_into(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), TransferError> {
        if offset != self.position {
            return Err(TransferError::Seek {
                position: self.position,
                requested: offset,
            });
        }
        self.inner.read_exact(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }
}

/// A [`TransferSink`] writing sequentially to a [`Write`] implementor.
#[derive(Debug)]
pub struct WriteSink<W> {
    inner: W,
    position: u64,
}

impl<W: Write> WriteSink<W> {
    /// Wraps a writer positioned at offset 0.
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> TransferSink for WriteSink<W> {
    fn copy_out_of(&mut self, offset: u64, buf: &[u8]) -> Result<(), TransferError> {
        if offset != self.position {
            return Err(TransferError::Seek {
                position: self.position,
                requested: offset,
            });
        }
        self.inner.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(())
    }
}
