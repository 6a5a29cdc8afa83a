//! Configuration loading tests
//!
//! Each test uses its own environment prefix so parallel tests never see
//! each other's variables.

use std::io::Write;
use tempfile::NamedTempFile;
use tempo_player::{PlayerConfig, PlayerError};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn loads_values_from_file() {
    let file = write_config(
        r#"
poll_interval_ms = 100

[playback]
seek_step_secs = 5.0

[playback.ramp]
max_speed = 3.0
acceleration_exponent = 2.0

[[playlist]]
title = "Intro"
source = "music/intro.ogg"
"#,
    );

    let config = PlayerConfig::load_with_prefix(Some(file.path()), "TEMPOTESTFILE").unwrap();

    assert_eq!(config.poll_interval_ms, 100);
    assert_eq!(config.playback.seek_step_secs, 5.0);
    assert_eq!(config.playback.ramp_interval_ms, 500);
    assert_eq!(config.playback.ramp.start_speed, 1.0);
    assert_eq!(config.playback.ramp.max_speed, 3.0);
    assert_eq!(config.playback.ramp.acceleration_exponent, 2.0);
    assert_eq!(config.playlist.len(), 1);
    assert_eq!(config.playlist[0].title, "Intro");
    assert!(config.validate().is_ok());
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_config("");

    let config = PlayerConfig::load_with_prefix(Some(file.path()), "TEMPOTESTEMPTY").unwrap();

    assert_eq!(config, PlayerConfig::default());
}

#[test]
fn environment_overrides_file() {
    let file = write_config(
        r#"
[playback.ramp]
max_speed = 3.0
"#,
    );
    std::env::set_var("TEMPOTESTENV_PLAYBACK__RAMP__MAX_SPEED", "4.5");
    std::env::set_var("TEMPOTESTENV_POLL_INTERVAL_MS", "50");

    let config = PlayerConfig::load_with_prefix(Some(file.path()), "TEMPOTESTENV").unwrap();

    std::env::remove_var("TEMPOTESTENV_PLAYBACK__RAMP__MAX_SPEED");
    std::env::remove_var("TEMPOTESTENV_POLL_INTERVAL_MS");

    assert_eq!(config.playback.ramp.max_speed, 4.5);
    assert_eq!(config.poll_interval_ms, 50);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let result = PlayerConfig::load_with_prefix(Some(&path), "TEMPOTESTMISSING");

    assert!(matches!(result, Err(PlayerError::Config(_))));
}

#[test]
fn malformed_file_is_an_error() {
    let file = write_config("[playback\nmax_speed = ");

    let result = PlayerConfig::load_with_prefix(Some(file.path()), "TEMPOTESTBROKEN");

    assert!(matches!(result, Err(PlayerError::Config(_))));
}

#[test]
fn invalid_ramp_in_file_fails_validation() {
    let file = write_config(
        r#"
[playback.ramp]
start_speed = 2.0
max_speed = 1.0
"#,
    );

    let config = PlayerConfig::load_with_prefix(Some(file.path()), "TEMPOTESTINVALID").unwrap();

    assert!(matches!(config.validate(), Err(PlayerError::Playback(_))));
}

#[test]
fn show_config_output_round_trips() {
    let config = PlayerConfig::default();

    let json = serde_json::to_string_pretty(&config).unwrap();
    let parsed: PlayerConfig = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, config);
    assert!(json.contains("\"acceleration_exponent\": 0.5"));
}
