use crate::asset::source::AssetSource;
use crate::engine::probe::{LottieHeader, probe_header};
use crate::engine::{AnimVar, AnimationParams, FrameCallback, RenderEngine};
use crate::foundation::core::{Dimensions, WidgetId};
use crate::foundation::error::{LottieError, LottieResult};
use std::collections::HashMap;

/// Per-widget counters kept by [`HeaderEngine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct WidgetStats {
    /// Times a buffer was attached.
    pub attaches: u32,
    /// Times the source was decoded.
    pub decodes: u32,
    /// Times the canvas was cleared before a re-attach.
    pub clears: u32,
    /// Frames rendered.
    pub frames_rendered: u64,
    /// Most recent rendered frame.
    pub last_frame: Option<i32>,
}

#[derive(Debug, Default)]
struct WidgetSlot {
    hidden: bool,
    ancestor_hidden: bool,
    dims: Option<Dimensions>,
    header: Option<LottieHeader>,
    callback: Option<FrameCallback>,
    driver_live: bool,
    stats: WidgetStats,
}

/// Metadata-only [`RenderEngine`].
///
/// Decoding reads the Lottie header; rendering paints the whole buffer with a color that
/// tracks playback progress. Useful for dry runs of the lifecycle without a vector rasterizer.
#[derive(Debug, Default)]
pub struct HeaderEngine {
    widgets: HashMap<WidgetId, WidgetSlot>,
    next_callback: u64,
}

impl HeaderEngine {
    /// Create an engine with no widgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide or show an ancestor of `widget` (for example a scroll container moving it away).
    pub fn set_ancestor_hidden(&mut self, widget: WidgetId, hidden: bool) {
        self.slot(widget).ancestor_hidden = hidden;
    }

    /// Counters for `widget`.
    pub fn stats(&self, widget: WidgetId) -> WidgetStats {
        self.widgets
            .get(&widget)
            .map(|w| w.stats)
            .unwrap_or_default()
    }

    /// Header decoded for `widget`, if any.
    pub fn header(&self, widget: WidgetId) -> Option<LottieHeader> {
        self.widgets.get(&widget).and_then(|w| w.header)
    }

    fn slot(&mut self, widget: WidgetId) -> &mut WidgetSlot {
        self.widgets.entry(widget).or_default()
    }
}

/// RGBA color for `frame` within `start..=end`.
pub fn progress_color(start: i32, end: i32, frame: i32) -> [u8; 4] {
    let span = (i64::from(end) - i64::from(start)).max(1);
    let pos = (i64::from(frame) - i64::from(start)).clamp(0, span);
    let r = (pos * 255 / span) as u8;
    [r, 96, 255 - r, 255]
}

impl RenderEngine for HeaderEngine {
    fn attach_buffer(
        &mut self,
        widget: WidgetId,
        dims: Dimensions,
        buffer: &mut [u8],
    ) -> LottieResult<()> {
        let expected = dims.byte_len(4);
        if buffer.len() != expected {
            return Err(LottieError::validation(format!(
                "buffer for {dims} must be {expected} bytes, got {}",
                buffer.len()
            )));
        }
        let slot = self.slot(widget);
        slot.dims = Some(dims);
        slot.stats.attaches += 1;
        buffer.fill(0);
        Ok(())
    }

    fn decode(&mut self, widget: WidgetId, source: &AssetSource) -> LottieResult<()> {
        let bytes = source.read_bytes()?;
        let header = probe_header(&bytes)?;
        self.next_callback += 1;
        let callback = FrameCallback(self.next_callback);

        let slot = self.slot(widget);
        slot.header = Some(header);
        slot.callback = Some(callback);
        slot.driver_live = true;
        slot.stats.decodes += 1;
        tracing::debug!(%widget, w = header.width, h = header.height, "header decoded");
        Ok(())
    }

    fn animation_params(&mut self, widget: WidgetId) -> Option<AnimationParams> {
        let slot = self.widgets.get(&widget)?;
        if !slot.driver_live {
            return None;
        }
        let header = slot.header?;
        let (start_frame, end_frame) = header.frame_range()?;
        let duration_ms = header.duration_ms()?;
        Some(AnimationParams {
            callback: slot.callback,
            var: AnimVar(widget.0),
            start_frame,
            end_frame,
            duration_ms,
        })
    }

    fn detach_animation(&mut self, widget: WidgetId, _params: &AnimationParams) {
        if let Some(slot) = self.widgets.get_mut(&widget) {
            slot.driver_live = false;
        }
    }

    fn render_frame(
        &mut self,
        widget: WidgetId,
        params: &AnimationParams,
        frame: i32,
        buffer: &mut [u8],
    ) -> LottieResult<()> {
        let slot = self
            .widgets
            .get_mut(&widget)
            .ok_or_else(|| LottieError::validation(format!("{widget} has no buffer attached")))?;
        if params.callback.is_none() || params.callback != slot.callback {
            return Err(LottieError::validation(format!(
                "{widget}: frame callback does not belong to this widget"
            )));
        }
        let Some(dims) = slot.dims else {
            return Err(LottieError::validation(format!(
                "{widget} has no buffer attached"
            )));
        };
        if buffer.len() != dims.byte_len(4) {
            return Err(LottieError::validation(format!(
                "{widget}: buffer size changed since attach"
            )));
        }

        let color = progress_color(params.start_frame, params.end_frame, frame);
        for px in buffer.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
        slot.stats.frames_rendered += 1;
        slot.stats.last_frame = Some(frame);
        Ok(())
    }

    fn is_widget_hidden(&self, widget: WidgetId) -> bool {
        self.widgets
            .get(&widget)
            .is_some_and(|w| w.hidden || w.ancestor_hidden)
    }

    fn set_widget_hidden(&mut self, widget: WidgetId, hidden: bool) {
        self.slot(widget).hidden = hidden;
    }

    fn clear_canvas(&mut self, widget: WidgetId) {
        self.slot(widget).stats.clears += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/header.rs"]
mod tests;
