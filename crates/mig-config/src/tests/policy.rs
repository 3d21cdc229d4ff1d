use crate::ItemErrorPolicy;
use crate::tests::setup_config_dir;

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, err};
use serial_test::serial;

#[test]
fn test_item_error_policy_from_str() {
    assert_eq!(
        ItemErrorPolicy::from_str("continue").unwrap(),
        ItemErrorPolicy::Continue
    );
    assert_eq!(
        ItemErrorPolicy::from_str("Abort").unwrap(),
        ItemErrorPolicy::Abort
    );
    assert!(ItemErrorPolicy::from_str("explode").is_err());
}

#[test]
fn test_item_error_policy_default() {
    assert_eq!(ItemErrorPolicy::default(), ItemErrorPolicy::Continue);
}

#[test]
fn test_item_error_policy_as_str() {
    assert_eq!(ItemErrorPolicy::Continue.as_str(), "continue");
    assert_eq!(ItemErrorPolicy::Abort.as_str(), "abort");
}

#[test]
#[serial]
fn given_unknown_policy_in_toml_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [transfer]
            on_item_error = "explode"
        "#,
    )
    .unwrap();

    // When
    let result = crate::Config::load();

    // Then
    assert_that!(result, err(anything()));
}
