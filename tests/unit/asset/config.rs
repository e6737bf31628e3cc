use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "lottie_host_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

const CLIP: &str = r#"{"v":"5.7.4","fr":25,"ip":0,"op":50,"w":96,"h":48,"layers":[]}"#;

#[test]
fn from_lottie_file_embeds_bytes_and_takes_size() {
    let tmp = temp_dir("config_from_file");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("clip.json");
    std::fs::write(&path, CLIP).unwrap();

    let cfg = AssetConfig::from_lottie_file(&path, false, true).unwrap();
    assert_eq!(cfg.dimensions, Dimensions::new(96, 48).unwrap());
    assert!(!cfg.looping);
    assert!(cfg.auto_start);
    let AssetSource::Embedded(bytes) = &cfg.source else {
        panic!("expected embedded source");
    };
    assert_eq!(&bytes[..], CLIP.as_bytes());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_file_is_a_validation_error() {
    let err = AssetConfig::from_lottie_file("/definitely/not/here.json", true, true).unwrap_err();
    assert!(matches!(err, LottieError::Validation(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn file_without_size_is_rejected() {
    let tmp = temp_dir("config_no_size");
    std::fs::create_dir_all(&tmp).unwrap();
    let path = tmp.join("clip.json");
    std::fs::write(&path, r#"{"fr":25,"ip":0,"op":50}"#).unwrap();

    let err = AssetConfig::from_lottie_file(&path, true, true).unwrap_err();
    assert!(err.to_string().contains("'w' or 'h'"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn spec_defaults_loop_and_auto_start() {
    let spec: AssetSpec = serde_json::from_str(r#"{"file":"clip.json"}"#).unwrap();
    assert!(spec.looping);
    assert!(spec.auto_start);

    let spec: AssetSpec =
        serde_json::from_str(r#"{"file":"clip.json","loop":false,"auto_start":false}"#).unwrap();
    assert!(!spec.looping);
    assert!(!spec.auto_start);

    assert!(serde_json::from_str::<AssetSpec>(r#"{"file":"a","speed":2}"#).is_err());
}

#[test]
fn spec_resolves_relative_paths() {
    let tmp = temp_dir("config_resolve");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("clip.json"), CLIP).unwrap();

    let spec: AssetSpec = serde_json::from_str(r#"{"file":"clip.json","loop":false}"#).unwrap();
    let cfg = spec.resolve(&tmp).unwrap();
    assert!(!cfg.looping);
    assert_eq!(cfg.dimensions.width, 96);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn builder_flags() {
    let cfg = AssetConfig::new(
        AssetSource::embedded(b"{}".to_vec()),
        Dimensions::new(1, 1).unwrap(),
    )
    .with_looping(false)
    .with_auto_start(false);
    assert!(!cfg.looping);
    assert!(!cfg.auto_start);
}
