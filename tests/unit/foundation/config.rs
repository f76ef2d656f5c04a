use super::*;

#[test]
fn defaults_match_hosted_sprite_layout() {
    let cfg = PlayerConfig::default();
    assert_eq!(cfg.url_scheme, "http://");
    assert_eq!(cfg.sprite_prefix, "sprite-");
    assert_eq!(cfg.sprite_suffix, ".jpg");
    assert_eq!(cfg.native_tick_hz, 60.0);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = PlayerConfig::from_reader(r#"{ "urlScheme": "https://" }"#.as_bytes()).unwrap();
    assert_eq!(cfg.url_scheme, "https://");
    assert_eq!(cfg.sprite_suffix, ".jpg");
}

#[test]
fn rejects_zero_tick_rate() {
    let err = PlayerConfig::from_reader(r#"{ "nativeTickHz": 0 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("nativeTickHz"));
}

#[test]
fn native_tick_ms_from_hz() {
    let cfg = PlayerConfig {
        native_tick_hz: 50.0,
        ..PlayerConfig::default()
    };
    assert_eq!(cfg.native_tick_ms(), 20.0);
}
