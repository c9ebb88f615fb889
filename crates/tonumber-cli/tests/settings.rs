//! Tests for resolving settings from files and flags.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use tonumber_cli::settings::{ConfigOverrides, load_config};
use tonumber_model::ConversionConfig;

#[test]
fn no_file_and_no_flags_is_default() {
    let config = load_config(None, &ConfigOverrides::default()).expect("load");
    assert_eq!(config, ConversionConfig::default());
}

#[test]
fn flags_override_file_values() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("tonumber.toml");
    fs::write(
        &path,
        r#"
workbook_path = "from-file.xlsx"
source_sheet = "Export"
last_column = 10
"#,
    )
    .expect("write config");

    let overrides = ConfigOverrides {
        workbook: Some(PathBuf::from("from-flag.xlsx")),
        target_sheet: Some("Export_Numbers".to_string()),
        ..ConfigOverrides::default()
    };
    let config = load_config(Some(&path), &overrides).expect("load");
    assert_eq!(config.workbook_path, PathBuf::from("from-flag.xlsx"));
    assert_eq!(config.source_sheet, "Export");
    assert_eq!(config.target_sheet, "Export_Numbers");
    assert_eq!(config.last_column, 10);
    assert_eq!(config.first_column, 4);
}

#[test]
fn missing_file_names_the_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn unknown_keys_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("tonumber.toml");
    fs::write(&path, "sheet = \"RawData\"\n").expect("write config");
    let err = load_config(Some(&path), &ConfigOverrides::default()).unwrap_err();
    assert!(format!("{err:#}").contains("parse config file"));
}

#[test]
fn overrides_are_validated() {
    let overrides = ConfigOverrides {
        target_sheet: Some("RawData".to_string()),
        ..ConfigOverrides::default()
    };
    let err = load_config(None, &overrides).unwrap_err();
    assert!(format!("{err:#}").contains("invalid conversion settings"));
}
