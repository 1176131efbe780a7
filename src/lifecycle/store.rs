//! Checkpoint store for live-update handoff.

use std::collections::HashMap;

use crate::error::CheckpointError;

/// Key/value store that outlives a single service instance.
///
/// The service only ever uses one key, holding the packed accumulator.
pub trait CheckpointStore {
    /// Publishes `value` under `key`.
    ///
    /// Fails with [`CheckpointError::AlreadyExists`] if the key is taken and
    /// `overwrite` is false.
    fn publish(&mut self, key: &str, value: u32, overwrite: bool) -> Result<(), CheckpointError>;

    /// Returns the value under `key`.
    fn retrieve(&self, key: &str) -> Result<u32, CheckpointError>;

    /// Removes `key`.
    fn delete(&mut self, key: &str) -> Result<(), CheckpointError>;
}

/// A [`CheckpointStore`] held in process memory.
///
/// # Example
///
/// ```
/// use adlersum::{CheckpointStore, MemoryCheckpointStore};
///
/// let mut store = MemoryCheckpointStore::new();
/// store.publish("adler_sum", 0x024d_0127, true)?;
/// assert_eq!(store.retrieve("adler_sum")?, 0x024d_0127);
/// # Ok::<(), adlersum::CheckpointError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCheckpointStore {
    values: HashMap<String, u32>,
}

impl MemoryCheckpointStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if a value is published under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the number of published keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing is published.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl CheckpointStore for MemoryCheckpointStore {
    fn publish(&mut self, key: &str, value: u32, overwrite: bool) -> Result<(), CheckpointError> {
        if !overwrite && self.values.contains_key(key) {
            return Err(CheckpointError::AlreadyExists { key: key.into() });
        }
        self.values.insert(key.into(), value);
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<u32, CheckpointError> {
        self.values
            .get(key)
            .copied()
            .ok_or_else(|| CheckpointError::NotFound { key: key.into() })
    }

    fn delete(&mut self, key: &str) -> Result<(), CheckpointError> {
        self.values
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CheckpointError::NotFound { key: key.into() })
    }
}
