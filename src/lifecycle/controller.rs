//! Start-up and live-update state machine.

use std::fmt;

use tracing::{debug, info, warn};

use super::CheckpointStore;
use crate::error::ServiceError;
use crate::sum::Accumulator;

/// Why the host is (re)starting the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartReason {
    /// First start; no prior state.
    Fresh,
    /// Restart after a crash; prior state is discarded.
    Restarting,
    /// A new instance taking over from a predecessor's checkpoint.
    LiveUpdate,
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    /// Starting with no prior state.
    Fresh,
    /// Starting after a crash.
    Restarting,
    /// Starting from a predecessor's checkpoint.
    LiveUpdateInit,
    /// Asked whether a handoff may begin.
    LiveUpdatePrepare,
    /// Serving requests.
    Running,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Fresh => "fresh",
            LifecycleState::Restarting => "restarting",
            LifecycleState::LiveUpdateInit => "live-update-init",
            LifecycleState::LiveUpdatePrepare => "live-update-prepare",
            LifecycleState::Running => "running",
        };
        f.write_str(name)
    }
}

impl From<StartReason> for LifecycleState {
    fn from(reason: StartReason) -> Self {
        match reason {
            StartReason::Fresh => LifecycleState::Fresh,
            StartReason::Restarting => LifecycleState::Restarting,
            StartReason::LiveUpdate => LifecycleState::LiveUpdateInit,
        }
    }
}

/// Decides how the accumulator is initialized and handed off.
///
/// The controller owns no checksum state itself; it acts on the
/// [`Accumulator`] held by the service and on an external
/// [`CheckpointStore`]. Every successful transition ends in
/// [`LifecycleState::Running`].
#[derive(Debug, Clone)]
pub struct LifecycleController {
    checkpoint_key: &'static str,
    state: LifecycleState,
}

impl LifecycleController {
    /// Creates a controller publishing under `checkpoint_key`.
    pub fn new(checkpoint_key: &'static str) -> Self {
        Self {
            checkpoint_key,
            state: LifecycleState::Fresh,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns the key the checkpoint is published under.
    pub fn checkpoint_key(&self) -> &'static str {
        self.checkpoint_key
    }

    /// Initializes `acc` for the given start reason.
    ///
    /// `Fresh` and `Restarting` reset to the seed. `LiveUpdate` retrieves
    /// the checkpoint, deletes it from the store, and restores from it.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Checkpoint`] if a live update finds no checkpoint.
    /// The accumulator is then left at the seed and the controller does not
    /// reach `Running`. A failed delete of the consumed key is only logged.
    pub fn start<S>(
        &mut self,
        reason: StartReason,
        acc: &mut Accumulator,
        store: &mut S,
    ) -> Result<(), ServiceError>
    where
        S: CheckpointStore + ?Sized,
    {
        self.state = reason.into();
        info!(state = %self.state, "starting checksum service");

        match reason {
            StartReason::Fresh | StartReason::Restarting => acc.reset(),
            StartReason::LiveUpdate => {
                let value = match store.retrieve(self.checkpoint_key) {
                    Ok(value) => value,
                    Err(err) => {
                        acc.reset();
                        warn!(key = self.checkpoint_key, error = %err, "checkpoint unavailable");
                        return Err(err.into());
                    }
                };
                if let Err(err) = store.delete(self.checkpoint_key) {
                    warn!(key = self.checkpoint_key, error = %err, "failed to delete consumed checkpoint");
                }
                self.restore_from_checkpoint(acc, value);
            }
        }

        self.state = LifecycleState::Running;
        Ok(())
    }

    /// Answers a live-update prepare request.
    ///
    /// Always ready while running: the accumulator is consistent between
    /// requests and nothing is in flight. Returns `false` before the first
    /// successful start.
    pub fn prepare_update(&mut self) -> bool {
        if self.state != LifecycleState::Running {
            debug!(state = %self.state, "live update prepare refused");
            return false;
        }
        self.state = LifecycleState::LiveUpdatePrepare;
        debug!("live update prepare acknowledged");
        self.state = LifecycleState::Running;
        true
    }

    /// Publishes the packed accumulator under the checkpoint key,
    /// overwriting any earlier value. Must run before teardown.
    ///
    /// Returns the published value.
    pub fn save_state<S>(&mut self, acc: &Accumulator, store: &mut S) -> Result<u32, ServiceError>
    where
        S: CheckpointStore + ?Sized,
    {
        let value = Self::serialize_checkpoint(acc);
        store.publish(self.checkpoint_key, value, true)?;
        info!(key = self.checkpoint_key, checkpoint = value, "checkpoint published");
        Ok(value)
    }

    /// Packs `acc` into a checkpoint word.
    pub fn serialize_checkpoint(acc: &Accumulator) -> u32 {
        acc.pack()
    }

    /// Restores `acc` from a checkpoint word and marks the controller running.
    pub fn restore_from_checkpoint(&mut self, acc: &mut Accumulator, value: u32) {
        acc.unpack(value);
        if !acc.is_canonical() {
            warn!(checkpoint = value, "restored checkpoint has out-of-range sums");
        }
        info!(key = self.checkpoint_key, checkpoint = value, "checkpoint restored");
        self.state = LifecycleState::Running;
    }
}
