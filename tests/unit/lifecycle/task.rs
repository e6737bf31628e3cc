use super::*;
use crate::asset::config::AssetConfig;
use crate::asset::source::AssetSource;
use crate::engine::header::HeaderEngine;
use crate::foundation::core::{Dimensions, WidgetId};
use crate::scheduler::clock::ManualClock;

fn env(state: LifecycleState) -> TaskEnv<HeaderEngine> {
    let config = AssetConfig::new(
        AssetSource::embedded(b"{}".to_vec()),
        Dimensions::new(4, 4).unwrap(),
    );
    let ctx = AssetContext::new(WidgetId(3), config, false);
    ctx.set_state(state);
    TaskEnv {
        engine: Arc::new(EngineLock::new(HeaderEngine::new())),
        ctx: Arc::new(ctx),
        control: Arc::new(WorkerControl::default()),
        clock: Arc::new(ManualClock::new()),
        opts: LifecycleOpts::default(),
    }
}

#[test]
fn live_worker_moves_between_running_and_paused() {
    let env = env(LifecycleState::Running);
    assert!(playback_transition(&env, LifecycleState::Running, LifecycleState::Paused));
    assert_eq!(env.ctx.state(), LifecycleState::Paused);
    assert!(playback_transition(&env, LifecycleState::Paused, LifecycleState::Running));
    assert_eq!(env.ctx.state(), LifecycleState::Running);
}

#[test]
fn stopped_worker_cannot_pause_a_relaunched_asset() {
    let env = env(LifecycleState::Running);
    env.control.request_stop();

    assert!(!playback_transition(&env, LifecycleState::Running, LifecycleState::Paused));
    assert_eq!(env.ctx.state(), LifecycleState::Running);
}

#[test]
fn stopped_worker_cannot_resume_a_paused_asset() {
    let env = env(LifecycleState::Paused);
    env.control.request_stop();

    assert!(!playback_transition(&env, LifecycleState::Paused, LifecycleState::Running));
    assert_eq!(env.ctx.state(), LifecycleState::Paused);
}
