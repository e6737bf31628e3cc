use crate::scheduler::clock::as_millis_u64;
use std::time::Duration;

/// Playback time origin with pause compensation.
///
/// While paused, elapsed time is frozen at the pause instant. Resuming shifts the origin forward
/// by the pause length, so playback continues where it stopped instead of jumping ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Playhead {
    start_tick: Duration,
    paused_at: Option<Duration>,
}

impl Playhead {
    /// Start playback at `now`.
    pub fn start(now: Duration) -> Self {
        Self {
            start_tick: now,
            paused_at: None,
        }
    }

    /// `true` while paused.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Pause at `now`. Returns `true` on the running-to-paused transition.
    pub fn pause(&mut self, now: Duration) -> bool {
        if self.paused_at.is_some() {
            return false;
        }
        self.paused_at = Some(now);
        true
    }

    /// Resume at `now`. Returns the pause length, or `None` if not paused.
    pub fn resume(&mut self, now: Duration) -> Option<Duration> {
        let paused_at = self.paused_at.take()?;
        let paused_for = now.saturating_sub(paused_at);
        self.start_tick += paused_for;
        Some(paused_for)
    }

    /// How long the current pause has lasted at `now`.
    pub fn paused_for(&self, now: Duration) -> Duration {
        self.paused_at
            .map(|at| now.saturating_sub(at))
            .unwrap_or_default()
    }

    /// Playback time at `now` in whole milliseconds.
    pub fn elapsed_ms(&self, now: Duration) -> u64 {
        let reference = self.paused_at.unwrap_or(now);
        as_millis_u64(reference.saturating_sub(self.start_tick))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/playhead.rs"]
mod tests;
