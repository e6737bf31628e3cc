use std::sync::atomic::{AtomicU8, Ordering};

/// Where an asset is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum LifecycleState {
    /// No live resources.
    Unloaded,
    /// Resources are being allocated and the worker started.
    Launching,
    /// The worker is loading or rendering frames.
    Running,
    /// The worker is idling because the widget is hidden.
    Paused,
    /// The worker finished on its own; resources are still live.
    ///
    /// Reached after a one-shot animation completes, when the source failed to decode or has no
    /// usable frame range, and when `auto_start` is off.
    Idle,
    /// A stop was requested and the owner is waiting for the worker.
    Stopping,
    /// The worker is stopped; resources await release.
    Stopped,
}

impl LifecycleState {
    const ALL: [LifecycleState; 7] = [
        LifecycleState::Unloaded,
        LifecycleState::Launching,
        LifecycleState::Running,
        LifecycleState::Paused,
        LifecycleState::Idle,
        LifecycleState::Stopping,
        LifecycleState::Stopped,
    ];

    fn to_u8(self) -> u8 {
        self as u8
    }

    fn from_u8(v: u8) -> Self {
        Self::ALL
            .get(usize::from(v))
            .copied()
            .unwrap_or(LifecycleState::Unloaded)
    }

    /// `true` while a worker may be executing.
    pub fn worker_active(self) -> bool {
        matches!(
            self,
            LifecycleState::Launching
                | LifecycleState::Running
                | LifecycleState::Paused
                | LifecycleState::Stopping
        )
    }
}

/// Lifecycle state readable from both the UI thread and the worker.
#[derive(Debug)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub(crate) fn new(state: LifecycleState) -> Self {
        Self(AtomicU8::new(state.to_u8()))
    }

    pub(crate) fn get(&self) -> LifecycleState {
        LifecycleState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub(crate) fn set(&self, state: LifecycleState) {
        self.0.store(state.to_u8(), Ordering::SeqCst);
    }

    /// Move to `to` only if currently in `from`.
    pub(crate) fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.0
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/state.rs"]
mod tests;
