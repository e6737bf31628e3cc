use super::*;

#[test]
fn defaults_cover_every_knob() {
    let o = LifecycleOpts::default();
    assert_eq!(o.hidden_grace(), Duration::from_millis(2000));
    assert_eq!(o.hidden_poll(), Duration::from_millis(100));
    assert_eq!(
        o.frame_delay_bounds(),
        (Duration::from_millis(16), Duration::from_millis(100))
    );
    assert_eq!(o.worker_stack_bytes, 65_536);
    assert_eq!(o.worker_priority, 5);
    o.validate().unwrap();
}

#[test]
fn partial_json_keeps_other_defaults() {
    let o = LifecycleOpts::from_json_str(r#"{"hidden_grace_ms":500,"settle_delay_ms":0}"#).unwrap();
    assert_eq!(o.hidden_grace_ms, 500);
    assert_eq!(o.settle_delay_ms, 0);
    assert_eq!(o.stop_timeout_ms, LifecycleOpts::default().stop_timeout_ms);
}

#[test]
fn unknown_fields_and_bad_bounds_are_rejected() {
    assert!(LifecycleOpts::from_json_str(r#"{"fps":60}"#).is_err());

    let err = LifecycleOpts::from_json_str(r#"{"min_frame_delay_ms":200}"#).unwrap_err();
    assert!(err.to_string().contains("min_frame_delay_ms"));

    let err = LifecycleOpts::from_json_str(r#"{"stop_poll_ms":0}"#).unwrap_err();
    assert!(matches!(err, LottieError::Validation(_)));
}

#[test]
fn from_json_path_reports_missing_file() {
    let err = LifecycleOpts::from_json_path(Path::new("/no/such/opts.json")).unwrap_err();
    assert!(err.to_string().contains("read lifecycle options"));
}
