//! Dedicated execution context for one live asset.
//!
//! Workers are created and destroyed explicitly rather than pooled: each one gets a stack of a
//! configured size, reserved in region A by the caller.

use crate::foundation::error::{LottieError, LottieResult};
use crate::scheduler::clock::Clock;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Thread name used for asset workers.
pub const WORKER_NAME: &str = "lottie_anim";

/// Bytes reserved in region B for one worker control block.
pub const CONTROL_BLOCK_BYTES: usize = 512;

/// How a worker should be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerSpec {
    /// Thread name.
    pub name: String,
    /// Stack size in bytes.
    pub stack_bytes: usize,
    /// Scheduling priority hint, lower than the UI loop.
    pub priority: u8,
}

/// Flags shared between a worker and its owner.
#[derive(Debug, Default)]
pub struct WorkerControl {
    stop: AtomicBool,
    killed: AtomicBool,
    paused: AtomicBool,
}

impl WorkerControl {
    /// Ask the worker to stop at its next check.
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// `true` once a stop was requested or the worker was terminated.
    pub fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::SeqCst) || self.killed.load(Ordering::SeqCst)
    }

    /// `true` once the owner gave up on the worker.
    pub fn is_killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }

    /// `true` while the worker is paused because its widget is hidden.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    pub(crate) fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::SeqCst);
    }

    fn kill(&self) {
        self.killed.store(true, Ordering::SeqCst);
    }

    /// Sleep for `d` in slices of at most `slice`, checking for stop before and after each one.
    ///
    /// Returns `false` if a stop was requested.
    pub fn sleep(&self, clock: &dyn Clock, d: Duration, slice: Duration) -> bool {
        let mut remaining = d;
        loop {
            if self.stop_requested() {
                return false;
            }
            if remaining.is_zero() {
                return true;
            }
            let step = remaining.min(slice.max(Duration::from_millis(1)));
            clock.sleep(step);
            remaining -= step;
        }
    }
}

/// Body run by a worker.
pub type WorkerEntry = Box<dyn FnOnce() + Send + 'static>;

/// Creates worker execution contexts.
pub trait WorkerSpawner: Send + Sync {
    /// Start `entry` on a new execution context described by `spec`.
    fn spawn(&self, spec: &WorkerSpec, entry: WorkerEntry) -> LottieResult<JoinHandle<()>>;
}

/// [`WorkerSpawner`] backed by OS threads.
///
/// `std` threads carry no portable priority, so `spec.priority` is only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSpawner;

impl WorkerSpawner for ThreadSpawner {
    fn spawn(&self, spec: &WorkerSpec, entry: WorkerEntry) -> LottieResult<JoinHandle<()>> {
        tracing::debug!(
            name = %spec.name,
            stack_bytes = spec.stack_bytes,
            priority = spec.priority,
            "spawning worker thread"
        );
        std::thread::Builder::new()
            .name(spec.name.clone())
            .stack_size(spec.stack_bytes)
            .spawn(entry)
            .map_err(|e| LottieError::worker_spawn(format!("failed to spawn '{}': {e}", spec.name)))
    }
}

/// Owner's side of a running worker.
#[derive(Debug)]
pub struct WorkerHandle {
    control: Arc<WorkerControl>,
    join: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Spawn `entry` through `spawner`.
    pub fn spawn(
        spawner: &dyn WorkerSpawner,
        spec: &WorkerSpec,
        control: Arc<WorkerControl>,
        entry: WorkerEntry,
    ) -> LottieResult<Self> {
        let join = spawner.spawn(spec, entry)?;
        Ok(Self {
            control,
            join: Some(join),
        })
    }

    /// Shared control flags.
    pub fn control(&self) -> &Arc<WorkerControl> {
        &self.control
    }

    /// Ask the worker to stop cooperatively.
    pub fn request_stop(&self) {
        self.control.request_stop();
    }

    /// `true` once the worker body has returned.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait up to `timeout` (wall-clock) for the worker to finish.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_finished() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// Reap a finished worker. Returns `false` if the body panicked.
    pub fn join(mut self) -> bool {
        match self.join.take() {
            Some(j) => match j.join() {
                Ok(()) => true,
                Err(_) => {
                    tracing::error!("asset worker panicked");
                    false
                }
            },
            None => true,
        }
    }

    /// Forcibly abandon the worker.
    ///
    /// The thread is detached and flagged killed; it exits at its next check without touching
    /// resources the owner frees afterwards.
    pub fn terminate(mut self) {
        self.control.kill();
        if let Some(j) = self.join.take() {
            drop(j);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/worker/worker.rs"]
mod tests;
