//! lottie-host manages the lifecycle of vector animation assets on a memory-constrained display.
//!
//! Rendering is delegated to an external engine behind [`RenderEngine`]. This crate owns the hard
//! part around it: one background worker per on-screen asset, its large buffers placed in the
//! right memory region, and a sequence of screen and visibility events that must never let the
//! worker touch memory after it has been released.
//!
//! # Lifecycle overview
//!
//! 1. **Launch**: allocate the pixel buffer and worker stack in region A and the control block
//!    in region B, hide the widget, spawn the worker.
//! 2. **Load**: after a settle delay the worker attaches the buffer, decodes the source once and
//!    captures the animation parameters. Later launches re-attach without re-parsing.
//! 3. **Play**: the worker maps elapsed time to frames, pausing while the widget is hidden and
//!    resuming where it stopped.
//! 4. **Unload**: screen teardown stops the worker first and releases buffers second.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One engine lock**: every engine call goes through [`EngineLock`], never held across a
//!   sleep.
//! - **All or nothing**: an asset's region blocks are installed and released together.
//!
//! # Getting started
//!
//! Build an [`AssetHost`] around your engine, then create one [`AssetLifecycle`] per widget and
//! forward the widget system's screen events to it. [`HeaderEngine`] is a metadata-only engine
//! for dry runs.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod asset;
mod config;
mod engine;
mod foundation;
mod lifecycle;
mod memory;
mod scheduler;
mod worker;

pub use asset::config::{AssetConfig, AssetSpec};
pub use asset::context::LoadOutcome;
pub use asset::source::AssetSource;
pub use config::LifecycleOpts;
pub use engine::header::{HeaderEngine, WidgetStats, progress_color};
pub use engine::probe::{LottieHeader, probe_header};
pub use engine::{AnimVar, AnimationParams, EngineLock, FrameCallback, RenderEngine};
pub use foundation::core::{Dimensions, WidgetId};
pub use foundation::error::{LottieError, LottieResult};
pub use lifecycle::manager::{AssetHost, AssetLifecycle};
pub use lifecycle::state::LifecycleState;
pub use memory::dual_pool::{DualPool, PoolUsage, ResourceClass};
pub use memory::region::{Region, RegionBlock, RegionPool, RegionStats};
pub use scheduler::clock::{Clock, ManualClock, SystemClock};
pub use scheduler::frame::{FramePlan, FrameStep};
pub use scheduler::playhead::Playhead;
pub use worker::{
    CONTROL_BLOCK_BYTES, ThreadSpawner, WORKER_NAME, WorkerControl, WorkerEntry, WorkerHandle,
    WorkerSpawner, WorkerSpec,
};
