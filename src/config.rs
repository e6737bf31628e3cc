use crate::foundation::error::{LottieError, LottieResult};
use std::path::Path;
use std::time::Duration;

/// Timing, sizing and placement knobs shared by every asset on a host.
///
/// All fields have defaults; a JSON file only needs the fields
/// it overrides.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleOpts {
    /// Delay before the worker first touches the engine after launch.
    pub settle_delay_ms: u64,
    /// How long a lazily loaded asset may stay hidden before releasing its buffers.
    pub hidden_grace_ms: u64,
    /// Re-check interval while hidden.
    pub hidden_poll_ms: u64,
    /// Lower bound of the per-frame delay (caps the frame rate near 60 fps).
    pub min_frame_delay_ms: u64,
    /// Upper bound of the per-frame delay (keeps at least 10 fps).
    pub max_frame_delay_ms: u64,
    /// How long a stop request may take before the worker is terminated.
    pub stop_timeout_ms: u64,
    /// Longest uninterrupted worker sleep; a stop request is seen within one slice.
    pub stop_poll_ms: u64,
    /// Worker stack size in bytes, reserved in region A.
    pub worker_stack_bytes: usize,
    /// Worker priority hint, below the UI loop.
    pub worker_priority: u8,
    /// Bytes per pixel of the draw target.
    pub bytes_per_pixel: usize,
    /// Capacity of region A in bytes.
    pub region_a_bytes: usize,
    /// Capacity of region B in bytes.
    pub region_b_bytes: usize,
}

impl Default for LifecycleOpts {
    fn default() -> Self {
        Self {
            settle_delay_ms: 1000,
            hidden_grace_ms: 2000,
            hidden_poll_ms: 100,
            min_frame_delay_ms: 16,
            max_frame_delay_ms: 100,
            stop_timeout_ms: 500,
            stop_poll_ms: 10,
            worker_stack_bytes: 64 * 1024,
            worker_priority: 5,
            bytes_per_pixel: 4,
            region_a_bytes: 8 * 1024 * 1024,
            region_b_bytes: 64 * 1024,
        }
    }
}

impl LifecycleOpts {
    /// Parse options from a JSON document.
    pub fn from_json_str(json: &str) -> LottieResult<Self> {
        let opts: Self = serde_json::from_str(json)
            .map_err(|e| LottieError::validation(format!("invalid lifecycle options: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read and parse options from a JSON file.
    pub fn from_json_path(path: &Path) -> LottieResult<Self> {
        use anyhow::Context as _;
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read lifecycle options '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Reject combinations the scheduler cannot honor.
    pub fn validate(&self) -> LottieResult<()> {
        if self.min_frame_delay_ms == 0 {
            return Err(LottieError::validation("min_frame_delay_ms must be > 0"));
        }
        if self.min_frame_delay_ms > self.max_frame_delay_ms {
            return Err(LottieError::validation(
                "min_frame_delay_ms must be <= max_frame_delay_ms",
            ));
        }
        if self.hidden_poll_ms == 0 || self.stop_poll_ms == 0 {
            return Err(LottieError::validation(
                "hidden_poll_ms and stop_poll_ms must be > 0",
            ));
        }
        if self.worker_stack_bytes == 0 || self.bytes_per_pixel == 0 {
            return Err(LottieError::validation(
                "worker_stack_bytes and bytes_per_pixel must be > 0",
            ));
        }
        Ok(())
    }

    pub(crate) fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub(crate) fn hidden_grace(&self) -> Duration {
        Duration::from_millis(self.hidden_grace_ms)
    }

    pub(crate) fn hidden_poll(&self) -> Duration {
        Duration::from_millis(self.hidden_poll_ms)
    }

    pub(crate) fn frame_delay_bounds(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.min_frame_delay_ms),
            Duration::from_millis(self.max_frame_delay_ms),
        )
    }

    pub(crate) fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    pub(crate) fn stop_poll(&self) -> Duration {
        Duration::from_millis(self.stop_poll_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
