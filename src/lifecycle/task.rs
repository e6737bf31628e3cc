use crate::asset::context::{AssetContext, LoadOutcome};
use crate::config::LifecycleOpts;
use crate::engine::{AnimationParams, EngineLock, RenderEngine};
use crate::foundation::core::kib;
use crate::foundation::error::LottieResult;
use crate::lifecycle::state::LifecycleState;
use crate::scheduler::clock::{Clock, as_millis_u64};
use crate::scheduler::frame::FramePlan;
use crate::scheduler::playhead::Playhead;
use crate::worker::WorkerControl;
use std::sync::Arc;

/// Everything a worker needs, moved into its thread.
pub(crate) struct TaskEnv<E> {
    pub(crate) engine: Arc<EngineLock<E>>,
    pub(crate) ctx: Arc<AssetContext>,
    pub(crate) control: Arc<WorkerControl>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) opts: LifecycleOpts,
}

enum Loaded {
    Ready(FramePlan, AnimationParams),
    Idle,
    Aborted,
}

/// Worker entry point: settle, load, then drive frames until told to stop.
pub(crate) fn run<E: RenderEngine>(env: TaskEnv<E>) {
    let _span = tracing::info_span!("lottie_anim", widget = %env.ctx.widget).entered();
    env.ctx
        .transition(LifecycleState::Launching, LifecycleState::Running);

    if !env
        .control
        .sleep(env.clock.as_ref(), env.opts.settle_delay(), env.opts.stop_poll())
    {
        tracing::debug!("stopped during settle delay");
        return;
    }

    match load(&env) {
        Loaded::Ready(plan, params) => render_loop(&env, plan, params),
        Loaded::Idle => finish_idle(&env),
        Loaded::Aborted => tracing::debug!("load aborted, asset no longer live"),
    }
}

fn load<E: RenderEngine>(env: &TaskEnv<E>) -> Loaded {
    let ctx = env.ctx.as_ref();
    let widget = ctx.widget;
    let dims = ctx.config.dimensions;

    {
        let mut engine = env.engine.lock();
        if env.control.stop_requested() {
            return Loaded::Aborted;
        }

        let first_load = ctx.outcome().is_none();
        if !first_load {
            tracing::info!("re-load: updating buffer (no re-parse)");
            engine.clear_canvas(widget);
        } else {
            tracing::info!(source = %ctx.config.source, "first load: parsing animation");
        }

        let attached = ctx.with_pixels(|px| engine.attach_buffer(widget, dims, px));
        match attached {
            None => return Loaded::Aborted,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "engine rejected the pixel buffer");
                engine.set_widget_hidden(widget, false);
                return Loaded::Idle;
            }
            Some(Ok(())) => {}
        }

        if first_load {
            let outcome = match engine.decode(widget, &ctx.config.source) {
                Err(e) => LoadOutcome::Failed(e.to_string()),
                Ok(()) => match engine.animation_params(widget) {
                    None => LoadOutcome::Failed("engine produced no animation".to_owned()),
                    Some(params) => {
                        tracing::info!(
                            start = params.start_frame,
                            end = params.end_frame,
                            duration_ms = params.duration_ms,
                            "animation parameters captured"
                        );
                        engine.detach_animation(widget, &params);
                        LoadOutcome::Parsed(params)
                    }
                },
            };
            ctx.record_outcome(outcome);
        }

        engine.set_widget_hidden(widget, false);
    }

    let params = match ctx.outcome() {
        Some(LoadOutcome::Parsed(params)) => *params,
        Some(LoadOutcome::Failed(reason)) => {
            tracing::warn!(%reason, "no valid animation, worker idle");
            return Loaded::Idle;
        }
        None => return Loaded::Idle,
    };
    let plan = match FramePlan::new(&params, ctx.config.looping) {
        Ok(plan) => plan,
        Err(e) => {
            tracing::warn!(error = %e, "no valid animation, worker idle");
            return Loaded::Idle;
        }
    };
    if !ctx.config.auto_start {
        tracing::info!("auto_start=false, worker idle");
        return Loaded::Idle;
    }
    Loaded::Ready(plan, params)
}

fn render_loop<E: RenderEngine>(env: &TaskEnv<E>, plan: FramePlan, params: AnimationParams) {
    let ctx = env.ctx.as_ref();
    let clock = env.clock.as_ref();
    let (min, max) = env.opts.frame_delay_bounds();
    let delay = plan.frame_delay(min, max);
    let slice = env.opts.stop_poll();
    tracing::info!(
        frame_delay_ms = as_millis_u64(delay),
        looping = plan.is_looping(),
        "render loop started"
    );

    let mut playhead = Playhead::start(clock.now());
    loop {
        if env.control.stop_requested() {
            tracing::info!("stop requested, worker exiting");
            return;
        }

        let hidden = env.engine.lock().is_widget_hidden(ctx.widget);
        let now = clock.now();

        if hidden {
            if playhead.pause(now) {
                env.control.set_paused(true);
                playback_transition(env, LifecycleState::Running, LifecycleState::Paused);
                tracing::debug!("widget hidden, playback paused");
            }
            if ctx.start_hidden && playhead.paused_for(now) > env.opts.hidden_grace() {
                release_hidden(env);
                return;
            }
            if !env.control.sleep(clock, env.opts.hidden_poll(), slice) {
                tracing::info!("stop requested while hidden, worker exiting");
                return;
            }
            continue;
        }

        if let Some(paused_for) = playhead.resume(now) {
            env.control.set_paused(false);
            playback_transition(env, LifecycleState::Paused, LifecycleState::Running);
            tracing::debug!(paused_ms = as_millis_u64(paused_for), "playback resumed");
        }

        let step = plan.step(playhead.elapsed_ms(now));
        match render(env, &params, step.frame()) {
            None => {
                tracing::debug!("asset released during render, worker exiting");
                return;
            }
            Some(Err(e)) => {
                tracing::warn!(frame = step.frame(), error = %e, "frame render failed, worker idle");
                finish_idle(env);
                return;
            }
            Some(Ok(())) => {}
        }
        if step.is_final() {
            tracing::info!(frame = step.frame(), "animation complete");
            finish_idle(env);
            return;
        }

        if !env.control.sleep(clock, delay, slice) {
            tracing::info!("stop requested, worker exiting");
            return;
        }
    }
}

/// Render `frame` with the engine lock held. `None` when stopped or no longer live.
fn render<E: RenderEngine>(
    env: &TaskEnv<E>,
    params: &AnimationParams,
    frame: i32,
) -> Option<LottieResult<()>> {
    let mut engine = env.engine.lock();
    if env.control.stop_requested() {
        return None;
    }
    let widget = env.ctx.widget;
    env.ctx
        .with_pixels(|px| engine.render_frame(widget, params, frame, px))
}

/// Self-stop of a lazily loaded asset that stayed hidden past the grace window.
fn release_hidden<E: RenderEngine>(env: &TaskEnv<E>) {
    let released = {
        let _engine = env.engine.lock();
        if env.control.stop_requested() {
            return;
        }
        env.ctx.take_live()
    };
    env.control.set_paused(false);
    let Some(blocks) = released else {
        return;
    };
    let bytes = blocks.total_bytes();
    drop(blocks);
    env.ctx
        .transition(LifecycleState::Paused, LifecycleState::Unloaded);
    tracing::info!(
        freed_kib = kib(bytes),
        "hidden past grace window, buffers released"
    );
}

/// Pause/resume state change, skipped once this worker was stopped.
///
/// Checked under the engine lock: a relaunch cannot install its buffers in between.
fn playback_transition<E: RenderEngine>(
    env: &TaskEnv<E>,
    from: LifecycleState,
    to: LifecycleState,
) -> bool {
    let _engine = env.engine.lock();
    !env.control.stop_requested() && env.ctx.transition(from, to)
}

fn finish_idle<E>(env: &TaskEnv<E>) {
    if env.control.stop_requested() {
        return;
    }
    if !env
        .ctx
        .transition(LifecycleState::Running, LifecycleState::Idle)
    {
        env.ctx
            .transition(LifecycleState::Launching, LifecycleState::Idle);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/task.rs"]
mod tests;
