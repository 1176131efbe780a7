//! The request-handling checksum service.
//!
//! [`ChecksumService`] owns the only [`Accumulator`] of a service instance
//! and answers the open/close/read/write requests of its endpoint:
//!
//! - `write` streams bytes in through a [`TransferChunker`]
//! - `read` delivers the 8-byte [`Digest`] and resets the state once the
//!   copy to the caller succeeded
//!
//! Requests run one at a time to completion through `&mut self`.
//!
//! # Example
//!
//! ```
//! use adlersum::{ChecksumService, MemoryCheckpointStore, StartReason};
//!
//! let mut store = MemoryCheckpointStore::new();
//! let mut service = ChecksumService::default();
//! service.start(StartReason::Fresh, &mut store)?;
//!
//! service.write(&mut b"abc".to_vec(), 3)?;
//!
//! let mut out = [0u8; 8];
//! assert_eq!(service.read(&mut out[..], 8)?, 8);
//! assert_eq!(&out, b"024d0127");
//!
//! service.read(&mut out[..], 8)?;
//! assert_eq!(&out, b"00000001");
//! # Ok::<(), adlersum::ServiceError>(())
//! ```

use tracing::{debug, warn};

use crate::chunker::TransferChunker;
use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::lifecycle::{CheckpointStore, LifecycleController, LifecycleState, StartReason};
use crate::sum::{Accumulator, DIGEST_LEN, Digest};
use crate::transfer::{TransferSink, TransferSource};

/// A stateful checksum endpoint.
#[derive(Debug, Clone)]
pub struct ChecksumService {
    accumulator: Accumulator,
    chunker: TransferChunker,
    lifecycle: LifecycleController,
    config: ServiceConfig,
}

impl ChecksumService {
    /// Creates a service with the given configuration.
    ///
    /// The accumulator starts at the seed; call [`start`](Self::start) to
    /// apply the host's start reason.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;
        Ok(Self {
            accumulator: Accumulator::new(),
            chunker: TransferChunker::new(config.chunk_size()),
            lifecycle: LifecycleController::new(config.checkpoint_key()),
            config,
        })
    }

    /// Applies a start reason; see [`LifecycleController::start`].
    pub fn start<S>(&mut self, reason: StartReason, store: &mut S) -> Result<(), ServiceError>
    where
        S: CheckpointStore + ?Sized,
    {
        self.lifecycle.start(reason, &mut self.accumulator, store)
    }

    /// Answers a live-update prepare request.
    pub fn prepare_update(&mut self) -> bool {
        self.lifecycle.prepare_update()
    }

    /// Publishes the current state for a successor instance.
    pub fn save_state<S>(&mut self, store: &mut S) -> Result<u32, ServiceError>
    where
        S: CheckpointStore + ?Sized,
    {
        self.lifecycle.save_state(&self.accumulator, store)
    }

    /// Returns the checkpoint word for the current state.
    pub fn serialize_checkpoint(&self) -> u32 {
        LifecycleController::serialize_checkpoint(&self.accumulator)
    }

    /// Replaces the current state with a checkpoint word.
    pub fn restore_from_checkpoint(&mut self, value: u32) {
        self.lifecycle
            .restore_from_checkpoint(&mut self.accumulator, value);
    }

    /// Opens the endpoint. Stateless; always succeeds.
    pub fn open(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Closes the endpoint. Stateless; always succeeds.
    pub fn close(&mut self) -> Result<(), ServiceError> {
        Ok(())
    }

    /// Delivers the current digest into `sink` and resets the state.
    ///
    /// Exactly [`DIGEST_LEN`] bytes are copied to offset 0 of the
    /// destination; the reset happens only after that copy succeeds.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidArgument`] if `destination_size < 8`
    /// - [`ServiceError::Transfer`] if the copy fails
    ///
    /// The state is untouched in both cases.
    pub fn read<S>(&mut self, sink: &mut S, destination_size: usize) -> Result<usize, ServiceError>
    where
        S: TransferSink + ?Sized,
    {
        if destination_size < DIGEST_LEN {
            return Err(ServiceError::InvalidArgument {
                actual: destination_size,
                required: DIGEST_LEN,
            });
        }

        let digest = self.digest();
        if let Err(err) = sink.copy_out_of(0, digest.as_bytes()) {
            warn!(error = %err, "digest delivery failed");
            return Err(err.into());
        }

        debug!(%digest, "digest delivered");
        self.accumulator.reset();
        Ok(DIGEST_LEN)
    }

    /// Folds `size` bytes from `source` into the state.
    ///
    /// Returns `size`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Transfer`] if any chunk copy fails. Chunks copied
    /// before the failure remain folded in.
    pub fn write<S>(&mut self, source: &mut S, size: usize) -> Result<usize, ServiceError>
    where
        S: TransferSource + ?Sized,
    {
        match self.chunker.feed(source, size, &mut self.accumulator) {
            Ok(written) => {
                debug!(written, "bytes folded in");
                Ok(written)
            }
            Err(err) => {
                warn!(size, error = %err, "write aborted");
                Err(err.into())
            }
        }
    }

    /// Returns the digest of the current state without resetting it.
    pub fn digest(&self) -> Digest {
        Digest::from_packed(self.accumulator.pack())
    }

    /// Returns the accumulator.
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    /// Returns the configuration used by this service.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

impl Default for ChecksumService {
    fn default() -> Self {
        let config = ServiceConfig::default();
        Self {
            accumulator: Accumulator::new(),
            chunker: TransferChunker::new(config.chunk_size()),
            lifecycle: LifecycleController::new(config.checkpoint_key()),
            config,
        }
    }
}
