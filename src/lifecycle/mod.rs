//! Service lifecycle and live-update handoff.
//!
//! - [`LifecycleController`] - Reset or restore on start, publish on handoff
//! - [`CheckpointStore`] - External store the checkpoint word travels through
//! - [`MemoryCheckpointStore`] - In-process store implementation

mod controller;
mod store;

pub use controller::{LifecycleController, LifecycleState, StartReason};
pub use store::{CheckpointStore, MemoryCheckpointStore};
