// Tests for configuration loading and its timing invariants

use speaker_sessions::Config;

#[test]
fn test_load_valid_config() {
    let cfg = Config::load("tests/fixtures/session-config").unwrap();

    assert_eq!(cfg.service.name, "speaker-sessions-test");
    assert_eq!(cfg.service.http.port, 3030);
    assert_eq!(cfg.session.timeout_minutes, 120);

    let timeouts = cfg.session.timeouts();
    assert_eq!(timeouts.timeout, chrono::Duration::minutes(120));
    assert_eq!(timeouts.warning, chrono::Duration::minutes(10));
}

#[test]
fn test_warning_window_must_be_shorter_than_timeout() {
    let err = Config::load("tests/fixtures/session-config-warning-too-long").unwrap_err();

    assert!(err.to_string().contains("warning_minutes"));
}

#[test]
fn test_timeout_must_be_positive() {
    let err = Config::load("tests/fixtures/session-config-zero-timeout").unwrap_err();

    assert!(err.to_string().contains("timeout_minutes"));
}

#[test]
fn test_shipped_default_config_is_valid() {
    let cfg = Config::load("config/speaker-sessions").unwrap();

    assert!(cfg.session.validate().is_ok());
    assert!(cfg.session.warning_minutes < cfg.session.timeout_minutes);
}
