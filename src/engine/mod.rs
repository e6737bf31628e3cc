//! Contract with the vector rendering engine.
//!
//! The engine is a black box shared by every asset on a display and by the UI loop. All calls go
//! through [`EngineLock`], the single global lock of this crate.

pub(crate) mod header;
pub(crate) mod probe;

use crate::asset::source::AssetSource;
use crate::foundation::core::{Dimensions, WidgetId};
use crate::foundation::error::{LottieError, LottieResult};
use crate::foundation::sync::lock;
use std::sync::{Mutex, MutexGuard};

/// Engine-provided function that renders one frame of an animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameCallback(pub u64);

/// Opaque animation variable passed back to the [`FrameCallback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimVar(pub u64);

/// Animation parameters reported by the engine after a successful decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationParams {
    /// Frame-update callback; `None` when the engine produced no animation driver.
    pub callback: Option<FrameCallback>,
    /// Variable handed to `callback`.
    pub var: AnimVar,
    /// First frame index.
    pub start_frame: i32,
    /// Last frame index.
    pub end_frame: i32,
    /// Length of one pass over `start_frame..=end_frame` in milliseconds.
    pub duration_ms: u32,
}

impl AnimationParams {
    /// Check that the parameters can drive the frame scheduler.
    ///
    /// A source can decode cleanly and still report a zero duration or an empty frame range.
    pub fn validate(&self) -> LottieResult<FrameCallback> {
        let Some(callback) = self.callback else {
            return Err(LottieError::degenerate("frame callback missing"));
        };
        if self.duration_ms == 0 {
            return Err(LottieError::degenerate("duration is zero"));
        }
        if self.end_frame <= self.start_frame {
            return Err(LottieError::degenerate(format!(
                "frame range {}..{} is empty",
                self.start_frame, self.end_frame
            )));
        }
        Ok(callback)
    }
}

/// Operations the lifecycle needs from the rendering engine.
///
/// Every method is invoked with the [`EngineLock`] held. Implementations must not retain
/// `buffer` slices past the call that received them: the pixel buffer is re-lent on each call
/// and may be freed between calls.
pub trait RenderEngine: Send {
    /// Point the widget's draw target at `buffer` (`dims`, 4 bytes per pixel).
    ///
    /// The engine may paint into `buffer` before returning.
    fn attach_buffer(
        &mut self,
        widget: WidgetId,
        dims: Dimensions,
        buffer: &mut [u8],
    ) -> LottieResult<()>;

    /// Decode `source` into the engine's internal animation object for `widget`.
    fn decode(&mut self, widget: WidgetId, source: &AssetSource) -> LottieResult<()>;

    /// Parameters of the decoded animation, if any.
    fn animation_params(&mut self, widget: WidgetId) -> Option<AnimationParams>;

    /// Delete the engine's internal animation driver for `params`.
    ///
    /// After this returns, re-attaching a buffer must not touch the old driver.
    fn detach_animation(&mut self, widget: WidgetId, params: &AnimationParams);

    /// Render `frame` into `buffer` through `params.callback`.
    fn render_frame(
        &mut self,
        widget: WidgetId,
        params: &AnimationParams,
        frame: i32,
        buffer: &mut [u8],
    ) -> LottieResult<()>;

    /// Effective visibility: `true` when the widget or any ancestor is hidden or scrolled away.
    fn is_widget_hidden(&self, widget: WidgetId) -> bool;

    /// Set the widget's own hidden flag.
    fn set_widget_hidden(&mut self, widget: WidgetId, hidden: bool);

    /// Remove any previous paint from the widget's draw target without deleting it.
    fn clear_canvas(&mut self, widget: WidgetId);
}

/// The global rendering-engine lock.
///
/// Hold it for single engine calls only; never across a sleep. The guard is released on every
/// exit path, including a worker unwinding out of a panicking engine call.
#[derive(Debug)]
pub struct EngineLock<E> {
    engine: Mutex<E>,
}

impl<E: RenderEngine> EngineLock<E> {
    /// Wrap `engine`.
    pub fn new(engine: E) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Acquire the lock.
    pub fn lock(&self) -> MutexGuard<'_, E> {
        lock(&self.engine)
    }

    /// Run `f` with the lock held.
    pub fn with<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
        let mut engine = self.lock();
        f(&mut engine)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/params.rs"]
mod tests;
