//! Error types for adlersum.

use thiserror::Error;

/// Errors returned by the checksum service.
///
/// None of these are fatal: the service keeps answering requests after any
/// of them.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A read asked for fewer bytes than a digest occupies.
    #[error("invalid argument: destination holds {actual} bytes, digest needs {required}")]
    InvalidArgument {
        /// The destination size supplied by the caller.
        actual: usize,
        /// The digest length.
        required: usize,
    },

    /// The copy primitive failed; the error is passed through unchanged.
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// The checkpoint store rejected a publish, retrieve or delete.
    #[error("checkpoint store: {0}")]
    Checkpoint(#[from] CheckpointError),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

/// Failure reported by a transfer channel while copying a chunk.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The requested range lies outside the caller's buffer.
    #[error("range {offset}+{len} outside buffer of {available} bytes")]
    OutOfRange {
        /// Offset of the rejected copy.
        offset: u64,
        /// Length of the rejected copy.
        len: usize,
        /// Bytes the channel can address.
        available: u64,
    },

    /// A stream-backed channel was asked for a non-sequential offset.
    #[error("stream at position {position} cannot seek to {requested}")]
    Seek {
        /// Current stream position.
        position: u64,
        /// Offset that was requested.
        requested: u64,
    },

    /// The peer refused the copy with an opaque status code.
    #[error("copy refused with status {0}")]
    Refused(i32),

    /// An I/O error from a stream-backed channel.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from a [`CheckpointStore`](crate::CheckpointStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    /// No value is published under the key.
    #[error("no checkpoint under key {key:?}")]
    NotFound {
        /// The missing key.
        key: String,
    },

    /// A value exists and overwriting was not requested.
    #[error("checkpoint key {key:?} already published")]
    AlreadyExists {
        /// The occupied key.
        key: String,
    },
}
