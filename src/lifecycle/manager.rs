use crate::asset::config::AssetConfig;
use crate::asset::context::{AssetContext, LiveBlocks, LoadOutcome};
use crate::config::LifecycleOpts;
use crate::engine::{AnimationParams, EngineLock, RenderEngine};
use crate::foundation::core::{WidgetId, kib};
use crate::foundation::error::{LottieError, LottieResult};
use crate::lifecycle::state::LifecycleState;
use crate::lifecycle::task::{self, TaskEnv};
use crate::memory::dual_pool::{DualPool, ResourceClass};
use crate::scheduler::clock::{Clock, SystemClock, as_millis_u64};
use crate::worker::{
    CONTROL_BLOCK_BYTES, ThreadSpawner, WORKER_NAME, WorkerControl, WorkerHandle, WorkerSpawner,
    WorkerSpec,
};
use std::sync::Arc;

/// Collaborators shared by every asset on one display.
pub struct AssetHost<E> {
    engine: Arc<EngineLock<E>>,
    pools: DualPool,
    spawner: Arc<dyn WorkerSpawner>,
    clock: Arc<dyn Clock>,
    opts: LifecycleOpts,
}

impl<E> Clone for AssetHost<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            pools: self.pools.clone(),
            spawner: Arc::clone(&self.spawner),
            clock: Arc::clone(&self.clock),
            opts: self.opts.clone(),
        }
    }
}

impl<E: RenderEngine + 'static> AssetHost<E> {
    /// Wrap `engine` in the global lock and size both memory regions from `opts`.
    ///
    /// Workers run on OS threads and use wall-clock time until replaced with
    /// [`AssetHost::with_spawner`] / [`AssetHost::with_clock`].
    pub fn new(engine: E, opts: LifecycleOpts) -> LottieResult<Self> {
        opts.validate()?;
        Ok(Self {
            engine: Arc::new(EngineLock::new(engine)),
            pools: DualPool::new(opts.region_a_bytes, opts.region_b_bytes),
            spawner: Arc::new(ThreadSpawner),
            clock: Arc::new(SystemClock::new()),
            opts,
        })
    }

    /// Use `spawner` to create workers.
    pub fn with_spawner(mut self, spawner: Arc<dyn WorkerSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Use `clock` for worker timing.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The global engine lock.
    pub fn engine(&self) -> &Arc<EngineLock<E>> {
        &self.engine
    }

    /// Both memory regions.
    pub fn pools(&self) -> &DualPool {
        &self.pools
    }

    /// Options applied to every asset.
    pub fn opts(&self) -> &LifecycleOpts {
        &self.opts
    }
}

/// Owner of one animated asset instance.
///
/// Event methods are called from the UI loop. Each one leaves the asset in a consistent state:
/// the worker and its region blocks are either all live or all released, and the pixel buffer is
/// never released while an engine call may be using it.
pub struct AssetLifecycle<E: RenderEngine + 'static> {
    host: AssetHost<E>,
    ctx: Arc<AssetContext>,
    worker: Option<WorkerHandle>,
}

impl<E: RenderEngine + 'static> AssetLifecycle<E> {
    /// Create the asset for `widget` and launch it, unless the widget starts hidden.
    ///
    /// A hidden widget is loaded lazily by [`AssetLifecycle::on_widget_visible`]. Allocation
    /// and spawn failures are returned after everything acquired so far has been released.
    #[tracing::instrument(skip(host, config))]
    pub fn init(host: &AssetHost<E>, widget: WidgetId, config: AssetConfig) -> LottieResult<Self> {
        let start_hidden = host.engine.lock().is_widget_hidden(widget);
        let mut this = Self {
            host: host.clone(),
            ctx: Arc::new(AssetContext::new(widget, config, start_hidden)),
            worker: None,
        };
        if start_hidden {
            tracing::info!("widget starts hidden, load deferred until visible");
        } else {
            this.launch()?;
        }
        Ok(this)
    }

    /// Screen transition away started: stop the worker and hide the widget, keep the buffers.
    #[tracing::instrument(skip(self), fields(widget = %self.ctx.widget))]
    pub fn on_screen_unload_start(&mut self) {
        self.reap_finished();
        if self.worker.is_none() && !self.ctx.has_live() {
            tracing::debug!("nothing live");
            return;
        }
        self.stop_worker();
        self.host
            .engine
            .with(|e| e.set_widget_hidden(self.ctx.widget, true));
        self.settle_stopped();
        tracing::info!("worker stopped, widget hidden (transition starting)");
    }

    /// Screen no longer drawn: release every live resource.
    #[tracing::instrument(skip(self), fields(widget = %self.ctx.widget))]
    pub fn on_screen_unloaded(&mut self) {
        self.free_resources();
    }

    /// Screen shown: relaunch a non-lazy asset whose buffers were released.
    ///
    /// Does nothing while the asset is live, and nothing for assets that start hidden.
    #[tracing::instrument(skip(self), fields(widget = %self.ctx.widget))]
    pub fn on_screen_loaded(&mut self) -> LottieResult<()> {
        self.reap_finished();
        if self.ctx.start_hidden {
            tracing::debug!("lazy asset, waiting for visibility");
            return Ok(());
        }
        self.relaunch_if_needed()
    }

    /// The widget became visible: first launch of a lazily loaded asset.
    #[tracing::instrument(skip(self), fields(widget = %self.ctx.widget))]
    pub fn on_widget_visible(&mut self) -> LottieResult<()> {
        self.reap_finished();
        if !self.ctx.start_hidden {
            return Ok(());
        }
        self.relaunch_if_needed()
    }

    /// Stop and release everything. Safe to call repeatedly; also run on drop.
    #[tracing::instrument(skip(self), fields(widget = %self.ctx.widget))]
    pub fn destroy(&mut self) {
        self.free_resources();
    }

    /// Reap a worker that finished on its own.
    ///
    /// Picks up hidden-timeout self-unloads, one-shot completions and failed loads.
    pub fn poll(&mut self) {
        self.reap_finished();
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.ctx.state()
    }

    /// `true` once the source was decoded successfully.
    pub fn is_parsed(&self) -> bool {
        self.ctx.is_parsed()
    }

    /// Parameters captured on first load.
    pub fn params(&self) -> Option<AnimationParams> {
        self.ctx.params()
    }

    /// Outcome of the first load, once the worker has recorded it.
    pub fn load_outcome(&self) -> Option<LoadOutcome> {
        self.ctx.outcome().cloned()
    }

    /// `true` while the pixel buffer, worker stack and control block are allocated.
    pub fn has_live_resources(&self) -> bool {
        self.ctx.has_live()
    }

    /// `true` while the worker is idling on a hidden widget.
    pub fn is_paused(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|w| w.control().is_paused())
    }

    /// Widget this asset draws into.
    pub fn widget(&self) -> WidgetId {
        self.ctx.widget
    }

    /// Whether the widget was hidden when the asset was created.
    pub fn starts_hidden(&self) -> bool {
        self.ctx.start_hidden
    }

    fn relaunch_if_needed(&mut self) -> LottieResult<()> {
        if self.ctx.has_live() {
            if self.ctx.state() != LifecycleState::Stopped {
                tracing::debug!("already live");
                return Ok(());
            }
            // Unload was started but never completed.
            self.free_resources();
        }
        self.launch()
    }

    fn launch(&mut self) -> LottieResult<()> {
        // A worker that released its buffers may still be on its way out.
        self.stop_worker();
        self.ctx.set_state(LifecycleState::Launching);
        match self.try_launch() {
            Ok(()) => Ok(()),
            Err(e) => {
                self.ctx.set_state(LifecycleState::Unloaded);
                tracing::error!(error = %e, "launch failed, asset unloaded");
                Err(e)
            }
        }
    }

    fn try_launch(&mut self) -> LottieResult<()> {
        let opts = &self.host.opts;
        let pools = &self.host.pools;
        let ctx = &self.ctx;
        let buffer_bytes = ctx.config.dimensions.byte_len(opts.bytes_per_pixel);

        let mut pixels = pools.allocate(ResourceClass::PixelBuffer, buffer_bytes)?;
        pixels.zero();
        self.host
            .engine
            .with(|e| e.set_widget_hidden(ctx.widget, true));

        // Earlier blocks are released on drop if a later allocation fails.
        let stack = pools.allocate(ResourceClass::WorkerStack, opts.worker_stack_bytes)?;
        let control_block = pools.allocate(ResourceClass::ControlBlock, CONTROL_BLOCK_BYTES)?;
        ctx.install(LiveBlocks {
            pixels,
            stack,
            control: control_block,
        })
        .map_err(|_| LottieError::validation("asset already has live resources"))?;

        let control = Arc::new(WorkerControl::default());
        let env = TaskEnv {
            engine: Arc::clone(&self.host.engine),
            ctx: Arc::clone(ctx),
            control: Arc::clone(&control),
            clock: Arc::clone(&self.host.clock),
            opts: opts.clone(),
        };
        let spec = WorkerSpec {
            name: WORKER_NAME.to_owned(),
            stack_bytes: opts.worker_stack_bytes,
            priority: opts.worker_priority,
        };
        let spawned = WorkerHandle::spawn(
            self.host.spawner.as_ref(),
            &spec,
            control,
            Box::new(move || task::run(env)),
        );
        match spawned {
            Ok(handle) => self.worker = Some(handle),
            Err(e) => {
                let released = self.host.engine.with(|_| ctx.take_live());
                drop(released);
                return Err(e);
            }
        }

        ctx.transition(LifecycleState::Launching, LifecycleState::Running);
        tracing::info!(
            buffer_kib = kib(buffer_bytes),
            stack_kib = kib(opts.worker_stack_bytes),
            "worker launched"
        );
        Ok(())
    }

    /// Drive the worker terminal: cooperative stop, bounded wait, then forced termination.
    fn stop_worker(&mut self) {
        let Some(handle) = self.worker.take() else {
            return;
        };
        if handle.is_finished() {
            handle.join();
            return;
        }

        self.ctx.set_state(LifecycleState::Stopping);
        handle.request_stop();
        let timeout = self.host.opts.stop_timeout();
        if handle.wait(timeout) {
            handle.join();
            tracing::debug!("worker stopped");
        } else {
            let err = LottieError::stop_timeout(format!(
                "worker did not stop within {} ms",
                as_millis_u64(timeout)
            ));
            tracing::warn!(error = %err, "terminating worker");
            handle.terminate();
        }
    }

    /// Stop the worker, then empty the live slot under the engine lock.
    fn free_resources(&mut self) {
        self.stop_worker();
        let released = self.host.engine.with(|_| self.ctx.take_live());
        self.ctx.set_state(LifecycleState::Unloaded);

        let Some(blocks) = released else {
            tracing::debug!("nothing to free");
            return;
        };
        let buffer_bytes = blocks.pixels.len();
        let stack_bytes = blocks.stack.len();
        drop(blocks);
        tracing::info!(
            dims = %self.ctx.config.dimensions,
            buffer_kib = kib(buffer_bytes),
            stack_kib = kib(stack_bytes),
            "buffers freed"
        );
    }

    fn settle_stopped(&self) {
        let state = if self.ctx.has_live() {
            LifecycleState::Stopped
        } else {
            LifecycleState::Unloaded
        };
        self.ctx.set_state(state);
    }

    fn reap_finished(&mut self) {
        if !self.worker.as_ref().is_some_and(WorkerHandle::is_finished) {
            return;
        }
        if let Some(handle) = self.worker.take() {
            handle.join();
        }
        if !self.ctx.has_live() {
            if self.ctx.state() != LifecycleState::Unloaded {
                tracing::info!(widget = %self.ctx.widget, "asset released its buffers");
            }
            self.ctx.set_state(LifecycleState::Unloaded);
        } else if self.ctx.state().worker_active() {
            self.ctx.set_state(LifecycleState::Idle);
        }
    }
}

impl<E: RenderEngine + 'static> Drop for AssetLifecycle<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}
