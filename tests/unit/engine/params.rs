use super::*;

fn params(start: i32, end: i32, duration_ms: u32) -> AnimationParams {
    AnimationParams {
        callback: Some(FrameCallback(1)),
        var: AnimVar(1),
        start_frame: start,
        end_frame: end,
        duration_ms,
    }
}

#[test]
fn valid_params_yield_callback() {
    assert_eq!(params(0, 50, 1000).validate().unwrap(), FrameCallback(1));
}

#[test]
fn degenerate_params_are_rejected() {
    assert!(matches!(
        params(0, 50, 0).validate(),
        Err(LottieError::DegenerateMetadata(_))
    ));
    assert!(matches!(
        params(10, 10, 1000).validate(),
        Err(LottieError::DegenerateMetadata(_))
    ));
    assert!(matches!(
        params(10, 3, 1000).validate(),
        Err(LottieError::DegenerateMetadata(_))
    ));

    let mut missing = params(0, 50, 1000);
    missing.callback = None;
    assert!(missing.validate().is_err());
}
