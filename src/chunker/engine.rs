//! Bounded chunked transfer into an accumulator.
//!
//! A write of `size` bytes never needs the whole payload in local memory.
//! [`TransferChunker`] repeatedly copies at most one working buffer's worth
//! of bytes from the source, folds them into the [`Accumulator`], and moves
//! on to the next offset until `size` bytes have been consumed.
//!
//! # Partial writes
//!
//! A transfer failure aborts at the failing chunk. Chunks copied before it
//! have already been folded in and are not rolled back.
//!
//! # Example
//!
//! ```
//! use adlersum::{Accumulator, TransferChunker};
//!
//! let mut acc = Accumulator::new();
//! let mut chunker = TransferChunker::new(2);
//! let mut source = b"abc".to_vec();
//!
//! assert_eq!(chunker.feed(&mut source, 3, &mut acc)?, 3);
//! assert_eq!(acc.pack(), 0x024d_0127);
//! # Ok::<(), adlersum::TransferError>(())
//! ```

use crate::config::MAX_CHUNK_SIZE;
use crate::error::TransferError;
use crate::sum::Accumulator;
use crate::transfer::TransferSource;

/// Drives bounded copies from a [`TransferSource`] into an [`Accumulator`].
///
/// Holds a fixed working buffer of [`MAX_CHUNK_SIZE`] bytes, of which the
/// first `chunk_size` are used per copy.
#[derive(Debug, Clone)]
pub struct TransferChunker {
    chunk_size: usize,
    buffer: [u8; MAX_CHUNK_SIZE],
}

impl TransferChunker {
    /// Creates a chunker copying at most `chunk_size` bytes at a time.
    ///
    /// `chunk_size` is clamped to `1..=MAX_CHUNK_SIZE`.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.clamp(1, MAX_CHUNK_SIZE),
            buffer: [0u8; MAX_CHUNK_SIZE],
        }
    }

    /// Returns the per-copy chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Copies `size` bytes from `source` and folds them into `acc`.
    ///
    /// Returns the number of bytes consumed, which is always `size` on
    /// success. A `size` of zero issues no copy at all.
    ///
    /// # Errors
    ///
    /// The first [`TransferError`] reported by `source`, unchanged. `acc`
    /// keeps every byte from the chunks copied before the failure.
    pub fn feed<S>(
        &mut self,
        source: &mut S,
        size: usize,
        acc: &mut Accumulator,
    ) -> Result<usize, TransferError>
    where
        S: TransferSource + ?Sized,
    {
        let mut consumed = 0usize;

        while consumed < size {
            let len = (size - consumed).min(self.chunk_size);
            let chunk = &mut self.buffer[..len];

            source.copy_into(consumed as u64, chunk)?;
            acc.update_slice(chunk);
            consumed += len;
        }

        Ok(consumed)
    }
}

impl Default for TransferChunker {
    fn default() -> Self {
        Self::new(MAX_CHUNK_SIZE)
    }
}
