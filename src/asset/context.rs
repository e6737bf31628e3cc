use crate::asset::config::AssetConfig;
use crate::engine::AnimationParams;
use crate::foundation::core::WidgetId;
use crate::foundation::sync::lock;
use crate::lifecycle::state::{LifecycleState, StateCell};
use crate::memory::region::RegionBlock;
use std::sync::{Mutex, OnceLock};

/// Result of the first load of an asset, recorded once by its worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The engine decoded the source and reported animation parameters.
    ///
    /// The parameters may still be degenerate; the scheduler re-checks them.
    Parsed(AnimationParams),
    /// Decode failed or the engine produced no animation.
    Failed(String),
}

/// Region blocks held while an asset is live.
#[derive(Debug)]
pub(crate) struct LiveBlocks {
    pub(crate) pixels: RegionBlock,
    pub(crate) stack: RegionBlock,
    pub(crate) control: RegionBlock,
}

impl LiveBlocks {
    pub(crate) fn total_bytes(&self) -> usize {
        self.pixels.len() + self.stack.len() + self.control.len()
    }
}

/// State shared between an asset's owner and its worker.
///
/// The pixel buffer is only lent out, and the live slot only emptied, while the engine lock is
/// held (engine first, then slot). Whoever empties the slot therefore knows no engine call is
/// using the buffer.
#[derive(Debug)]
pub(crate) struct AssetContext {
    pub(crate) widget: WidgetId,
    pub(crate) config: AssetConfig,
    pub(crate) start_hidden: bool,
    outcome: OnceLock<LoadOutcome>,
    live: Mutex<Option<LiveBlocks>>,
    state: StateCell,
}

impl AssetContext {
    pub(crate) fn new(widget: WidgetId, config: AssetConfig, start_hidden: bool) -> Self {
        Self {
            widget,
            config,
            start_hidden,
            outcome: OnceLock::new(),
            live: Mutex::new(None),
            state: StateCell::new(LifecycleState::Unloaded),
        }
    }

    pub(crate) fn outcome(&self) -> Option<&LoadOutcome> {
        self.outcome.get()
    }

    /// Record the first-load outcome. Later calls are ignored.
    pub(crate) fn record_outcome(&self, outcome: LoadOutcome) -> bool {
        self.outcome.set(outcome).is_ok()
    }

    pub(crate) fn is_parsed(&self) -> bool {
        matches!(self.outcome.get(), Some(LoadOutcome::Parsed(_)))
    }

    pub(crate) fn params(&self) -> Option<AnimationParams> {
        match self.outcome.get() {
            Some(LoadOutcome::Parsed(p)) => Some(*p),
            _ => None,
        }
    }

    pub(crate) fn state(&self) -> LifecycleState {
        self.state.get()
    }

    pub(crate) fn set_state(&self, state: LifecycleState) {
        self.state.set(state);
    }

    pub(crate) fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.state.transition(from, to)
    }

    pub(crate) fn has_live(&self) -> bool {
        lock(&self.live).is_some()
    }

    /// Install all live blocks at once. Fails (returning them) if the slot is occupied.
    pub(crate) fn install(&self, blocks: LiveBlocks) -> Result<(), LiveBlocks> {
        let mut slot = lock(&self.live);
        if slot.is_some() {
            return Err(blocks);
        }
        *slot = Some(blocks);
        Ok(())
    }

    /// Empty the slot. Callers hold the engine lock.
    pub(crate) fn take_live(&self) -> Option<LiveBlocks> {
        lock(&self.live).take()
    }

    /// Run `f` on the pixel buffer if the asset is still live. Callers hold the engine lock.
    pub(crate) fn with_pixels<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> Option<R> {
        let mut slot = lock(&self.live);
        slot.as_mut().map(|blocks| f(blocks.pixels.as_mut_slice()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/asset/context.rs"]
mod tests;
