use super::*;

const CLIP: &[u8] = br#"{"v":"5.7.4","w":4,"h":2,"ip":0,"op":50,"fr":50,"layers":[]}"#;
const STILL: &[u8] = br#"{"w":4,"h":2,"layers":[]}"#;

fn dims() -> Dimensions {
    Dimensions::new(4, 2).unwrap()
}

#[test]
fn decode_then_params_reads_header_timing() {
    let mut eng = HeaderEngine::new();
    let w = WidgetId(3);
    eng.decode(w, &AssetSource::embedded(CLIP.to_vec())).unwrap();

    let p = eng.animation_params(w).unwrap();
    assert_eq!(p.start_frame, 0);
    assert_eq!(p.end_frame, 50);
    assert_eq!(p.duration_ms, 1000);
    assert_eq!(p.var, AnimVar(3));
    assert!(p.callback.is_some());
    assert_eq!(eng.stats(w).decodes, 1);
}

#[test]
fn still_composition_has_no_params() {
    let mut eng = HeaderEngine::new();
    let w = WidgetId(1);
    eng.decode(w, &AssetSource::embedded(STILL.to_vec())).unwrap();
    assert_eq!(eng.animation_params(w), None);
    assert!(eng.header(w).is_some());
}

#[test]
fn decode_rejects_garbage() {
    let mut eng = HeaderEngine::new();
    let err = eng
        .decode(WidgetId(1), &AssetSource::embedded(b"nope".to_vec()))
        .unwrap_err();
    assert!(matches!(err, LottieError::Decode(_)));
}

#[test]
fn detach_drops_the_driver_but_callback_still_renders() {
    let mut eng = HeaderEngine::new();
    let w = WidgetId(1);
    eng.decode(w, &AssetSource::embedded(CLIP.to_vec())).unwrap();
    let p = eng.animation_params(w).unwrap();
    eng.detach_animation(w, &p);
    assert_eq!(eng.animation_params(w), None);

    let mut buf = vec![0u8; dims().byte_len(4)];
    eng.attach_buffer(w, dims(), &mut buf).unwrap();
    eng.render_frame(w, &p, 50, &mut buf).unwrap();
    assert_eq!(&buf[..4], &progress_color(0, 50, 50));
    assert_eq!(eng.stats(w).last_frame, Some(50));
    assert_eq!(eng.stats(w).frames_rendered, 1);
}

#[test]
fn render_requires_attached_buffer_of_matching_size() {
    let mut eng = HeaderEngine::new();
    let w = WidgetId(1);
    eng.decode(w, &AssetSource::embedded(CLIP.to_vec())).unwrap();
    let p = eng.animation_params(w).unwrap();

    let mut buf = vec![0u8; dims().byte_len(4)];
    assert!(eng.render_frame(w, &p, 0, &mut buf).is_err());

    let mut short = vec![0u8; 3];
    assert!(eng.attach_buffer(w, dims(), &mut short).is_err());
}

#[test]
fn visibility_combines_own_and_ancestor_flags() {
    let mut eng = HeaderEngine::new();
    let w = WidgetId(9);
    assert!(!eng.is_widget_hidden(w));

    eng.set_ancestor_hidden(w, true);
    assert!(eng.is_widget_hidden(w));
    eng.set_widget_hidden(w, false);
    assert!(eng.is_widget_hidden(w));

    eng.set_ancestor_hidden(w, false);
    assert!(!eng.is_widget_hidden(w));
    eng.set_widget_hidden(w, true);
    assert!(eng.is_widget_hidden(w));
}

#[test]
fn progress_color_spans_start_to_end() {
    assert_eq!(progress_color(0, 50, 0), [0, 96, 255, 255]);
    assert_eq!(progress_color(0, 50, 50), [255, 96, 0, 255]);
    assert_eq!(progress_color(0, 50, 99), [255, 96, 0, 255]);
}
