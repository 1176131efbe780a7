//! adlersum
//!
//! A stateful Adler-style checksum service.
//!
//! Callers stream bytes in with `write`, and `read` hands back the current
//! digest as 8 lowercase hex bytes, after which the running sums reset. The
//! state survives a live replacement of the service instance as a single
//! packed 32-bit checkpoint word.
//!
//! The crate intentionally:
//! - does NOT move bytes across address spaces itself (see [`TransferSource`]
//!   and [`TransferSink`])
//! - does NOT manage concurrency
//! - does NOT persist anything beyond the checkpoint word (see
//!   [`CheckpointStore`])
//! - is NOT a general hashing library
//!
//! # Requests
//!
//! ```
//! use adlersum::{ChecksumService, ServiceError};
//!
//! fn main() -> Result<(), ServiceError> {
//!     let mut service = ChecksumService::default();
//!
//!     service.write(&mut b"abc".to_vec(), 3)?;
//!
//!     let mut out = [0u8; 8];
//!     service.read(&mut out[..], 8)?;
//!     assert_eq!(&out, b"024d0127");
//!     Ok(())
//! }
//! ```
//!
//! # Live update
//!
//! ```
//! use adlersum::{ChecksumService, MemoryCheckpointStore, StartReason};
//!
//! let mut store = MemoryCheckpointStore::new();
//!
//! let mut old = ChecksumService::default();
//! old.start(StartReason::Fresh, &mut store)?;
//! old.write(&mut b"ab".to_vec(), 2)?;
//! assert!(old.prepare_update());
//! old.save_state(&mut store)?;
//! drop(old);
//!
//! let mut new = ChecksumService::default();
//! new.start(StartReason::LiveUpdate, &mut store)?;
//! new.write(&mut b"c".to_vec(), 1)?;
//! assert_eq!(new.digest().as_bytes(), b"024d0127");
//! # Ok::<(), adlersum::ServiceError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunker;
mod config;
mod error;
mod lifecycle;
mod service;
mod sum;
mod transfer;

//
// Public surface
//

pub use chunker::TransferChunker;
pub use config::{DEFAULT_CHECKPOINT_KEY, DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, ServiceConfig};
pub use error::{CheckpointError, ServiceError, TransferError};
pub use lifecycle::{
    CheckpointStore, LifecycleController, LifecycleState, MemoryCheckpointStore, StartReason,
};
pub use service::ChecksumService;
pub use sum::{ADLER_MODULUS, Accumulator, DIGEST_LEN, Digest, SEED};
pub use transfer::{ReadSource, TransferSink, TransferSource, WriteSink};
