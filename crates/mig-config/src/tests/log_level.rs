use crate::tests::setup_config_dir;
use crate::{Config, LogLevel};

use std::str::FromStr;

use log::LevelFilter;
use serial_test::serial;

#[test]
fn test_log_level_from_str_known_values() {
    assert_eq!(*LogLevel::from_str("off").unwrap(), LevelFilter::Off);
    assert_eq!(*LogLevel::from_str("error").unwrap(), LevelFilter::Error);
    assert_eq!(*LogLevel::from_str("warn").unwrap(), LevelFilter::Warn);
    assert_eq!(*LogLevel::from_str("info").unwrap(), LevelFilter::Info);
    assert_eq!(*LogLevel::from_str("debug").unwrap(), LevelFilter::Debug);
    assert_eq!(*LogLevel::from_str("trace").unwrap(), LevelFilter::Trace);
}

#[test]
fn test_log_level_is_case_insensitive() {
    assert_eq!(*LogLevel::from_str("DEBUG").unwrap(), LevelFilter::Debug);
    assert_eq!(*LogLevel::from_str("Warn").unwrap(), LevelFilter::Warn);
}

#[test]
fn test_log_level_unknown_defaults_to_info() {
    assert_eq!(*LogLevel::from_str("verbose").unwrap(), LevelFilter::Info);
    assert_eq!(*LogLevel::from_str("").unwrap(), LevelFilter::Info);
}

#[test]
#[serial]
fn given_log_level_in_toml_when_load_then_applied() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [logging]
            level = "debug"
            colored = false
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(*config.logging.level, LevelFilter::Debug);
    assert!(!config.logging.colored);
}
