use super::*;
use crate::scheduler::frame::FramePlan;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn elapsed_counts_from_start() {
    let p = Playhead::start(ms(1_000));
    assert_eq!(p.elapsed_ms(ms(1_000)), 0);
    assert_eq!(p.elapsed_ms(ms(1_250)), 250);
}

#[test]
fn resume_shifts_origin_by_pause_length() {
    let mut p = Playhead::start(ms(0));
    assert!(p.pause(ms(400)));
    assert!(!p.pause(ms(900)), "second pause must not move the pause instant");
    assert_eq!(p.elapsed_ms(ms(3_000)), 400, "elapsed is frozen while paused");
    assert_eq!(p.paused_for(ms(3_000)), ms(2_600));

    assert_eq!(p.resume(ms(3_000)), Some(ms(2_600)));
    assert!(!p.is_paused());
    assert_eq!(p.elapsed_ms(ms(3_000)), 400);
    assert_eq!(p.elapsed_ms(ms(3_100)), 500);
}

#[test]
fn frame_after_resume_equals_frame_at_pause() {
    let plan = FramePlan::from_range(0, 50, 1000, true).unwrap();
    let mut p = Playhead::start(ms(10));
    let pause_at = ms(10 + 730);
    let at_pause = plan.step(p.elapsed_ms(pause_at));

    p.pause(pause_at);
    p.resume(pause_at + ms(5_321));
    let after = plan.step(p.elapsed_ms(pause_at + ms(5_321)));
    assert_eq!(at_pause, after);
}

#[test]
fn resume_without_pause_is_a_no_op() {
    let mut p = Playhead::start(ms(5));
    assert_eq!(p.resume(ms(50)), None);
    assert_eq!(p.elapsed_ms(ms(50)), 45);
    assert_eq!(p.paused_for(ms(50)), Duration::ZERO);
}
