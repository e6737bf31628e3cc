use crate::engine::AnimationParams;
use crate::foundation::error::{LottieError, LottieResult};
use std::time::Duration;

/// What the worker should do for one loop iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStep {
    /// Render this frame and keep going.
    Render(i32),
    /// Render this frame, then stop: the one-shot animation is complete.
    Final(i32),
}

impl FrameStep {
    /// Frame index to render.
    pub fn frame(self) -> i32 {
        match self {
            FrameStep::Render(f) | FrameStep::Final(f) => f,
        }
    }

    /// `true` for the last step of a one-shot animation.
    pub fn is_final(self) -> bool {
        matches!(self, FrameStep::Final(_))
    }
}

/// Maps elapsed playback time to frame indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePlan {
    start: i32,
    end: i32,
    duration_ms: u32,
    looping: bool,
}

impl FramePlan {
    /// Build a plan from engine parameters, rejecting degenerate metadata.
    pub fn new(params: &AnimationParams, looping: bool) -> LottieResult<Self> {
        params.validate()?;
        Self::from_range(
            params.start_frame,
            params.end_frame,
            params.duration_ms,
            looping,
        )
    }

    /// Build a plan from a raw frame range and duration.
    pub fn from_range(start: i32, end: i32, duration_ms: u32, looping: bool) -> LottieResult<Self> {
        if duration_ms == 0 {
            return Err(LottieError::degenerate("duration is zero"));
        }
        if end <= start {
            return Err(LottieError::degenerate(format!(
                "frame range {start}..{end} is empty"
            )));
        }
        Ok(Self {
            start,
            end,
            duration_ms,
            looping,
        })
    }

    /// `end - start`.
    pub fn total_frames(&self) -> i64 {
        i64::from(self.end) - i64::from(self.start)
    }

    /// Whether playback cycles.
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Delay between frames: `duration / total_frames`, clamped to `[min, max]`.
    pub fn frame_delay(&self, min: Duration, max: Duration) -> Duration {
        let per_frame = u64::from(self.duration_ms) / self.total_frames() as u64;
        Duration::from_millis(per_frame).max(min).min(max)
    }

    /// Frame for `elapsed_ms` of playback.
    pub fn step(&self, elapsed_ms: u64) -> FrameStep {
        let duration = u64::from(self.duration_ms);
        let t = if self.looping {
            elapsed_ms % duration
        } else if elapsed_ms >= duration {
            return FrameStep::Final(self.end);
        } else {
            elapsed_ms
        };
        // t < duration, so offset < total_frames and start + offset < end.
        let offset = i128::from(self.total_frames()) * i128::from(t) / i128::from(duration);
        FrameStep::Render((i128::from(self.start) + offset) as i32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/frame.rs"]
mod tests;
