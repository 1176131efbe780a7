//! Configuration for the checksum service.
//!
//! - [`ServiceConfig`] - Transfer chunk size and checkpoint key

use crate::error::ServiceError;

/// Largest working buffer a single transfer chunk may use (1 KiB).
pub const MAX_CHUNK_SIZE: usize = 1024;

/// Default transfer chunk size (1 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = MAX_CHUNK_SIZE;

/// Default key the packed accumulator is published under.
pub const DEFAULT_CHECKPOINT_KEY: &str = "adler_sum";

/// Configuration for a [`ChecksumService`](crate::ChecksumService).
///
/// Constraints: `1 <= chunk_size <= MAX_CHUNK_SIZE`, non-empty checkpoint key.
///
/// # Example
///
/// ```
/// use adlersum::ServiceConfig;
///
/// let config = ServiceConfig::new(256, "adler_sum")?;
/// assert_eq!(config.chunk_size(), 256);
/// # Ok::<(), adlersum::ServiceError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceConfig {
    chunk_size: usize,
    checkpoint_key: &'static str,
}

impl ServiceConfig {
    /// Creates a new configuration.
    ///
    /// Returns error if the chunk size is zero or above [`MAX_CHUNK_SIZE`],
    /// or the key is empty.
    pub fn new(chunk_size: usize, checkpoint_key: &'static str) -> Result<Self, ServiceError> {
        if chunk_size == 0 {
            return Err(ServiceError::InvalidConfig {
                message: "chunk_size must be non-zero",
            });
        }

        if chunk_size > MAX_CHUNK_SIZE {
            return Err(ServiceError::InvalidConfig {
                message: "chunk_size cannot exceed MAX_CHUNK_SIZE",
            });
        }

        if checkpoint_key.is_empty() {
            return Err(ServiceError::InvalidConfig {
                message: "checkpoint_key must be non-empty",
            });
        }

        Ok(Self {
            chunk_size,
            checkpoint_key,
        })
    }

    /// Sets the transfer chunk size.
    ///
    /// Does not validate; see [`ServiceConfig::validate`].
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Sets the checkpoint key.
    pub fn with_checkpoint_key(mut self, key: &'static str) -> Self {
        self.checkpoint_key = key;
        self
    }

    /// Returns the transfer chunk size.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Returns the checkpoint key.
    pub fn checkpoint_key(&self) -> &'static str {
        self.checkpoint_key
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), ServiceError> {
        Self::new(self.chunk_size, self.checkpoint_key).map(|_| ())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            checkpoint_key: DEFAULT_CHECKPOINT_KEY,
        }
    }
}
