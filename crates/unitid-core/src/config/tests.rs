//! Tests for configuration module.

use super::*;

#[test_log::test]
fn test_defaults_from_empty_toml() {
    let settings = Settings::from_toml("").expect("empty config should load");

    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.labels, LabelConfig::default());
}

#[test_log::test]
fn test_partial_label_override() {
    let settings = Settings::from_toml(
        r#"
        [labels]
        year = " AD"

        [logging]
        level = "trace"
        "#,
    )
    .expect("config should load");

    tracing::debug!(?settings, "Loaded settings");

    assert_eq!(settings.labels.year, " AD");
    assert_eq!(settings.labels.month, "月");
    assert_eq!(settings.logging.level, "trace");
}

#[test]
fn test_empty_label_rejected() {
    let result = Settings::from_toml(
        r#"
        [labels]
        decade = ""
        "#,
    );

    let err = result.expect_err("empty label should fail validation");
    assert!(matches!(err, CoreError::ValidationError(_)));
    assert!(err.to_string().contains("decade"));
}

#[test]
fn test_invalid_toml_rejected() {
    assert!(matches!(
        Settings::from_toml("labels = ["),
        Err(CoreError::ConfigError(_))
    ));
}

#[test]
fn test_mistyped_value_is_config_error() {
    let err = Settings::from_toml(
        r#"
        [logging]
        level = ["debug"]
        "#,
    )
    .expect_err("array is not a level");

    assert!(matches!(err, CoreError::ConfigError(_)));
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
fn test_default_labels_validate() {
    assert!(LabelConfig::default().validate().is_ok());
}

#[test]
fn test_label_config_deserializes_from_json() {
    let labels: LabelConfig =
        serde_json::from_str(r#"{ "hour": "h" }"#).expect("labels should deserialize");

    assert_eq!(labels.hour, "h");
    assert_eq!(labels.century, "世纪");
}
