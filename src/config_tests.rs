#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.store.ledger_file, "database_claims.csv");
    assert_eq!(config.store.targets_file, "budget_targets.csv");
    assert_eq!(config.logging.level, "warn");
    assert!(config.stamp.template.is_none());
    assert_eq!(config.form_defaults().signer, DEFAULT_SIGNER);
}

#[test]
fn test_empty_toml_is_default() {
    let config = Config::from_toml("").unwrap();
    assert_eq!(config.store.ledger_file, "database_claims.csv");
    assert_eq!(config.form.recipient, DEFAULT_RECIPIENT);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_toml(
        r#"
[store]
data_dir = "/srv/claims"

[form]
signer = "รองผู้อำนวยการ"

[stamp]
template = "form.pdf"
layout = "layout.toml"

[logging]
level = "debug"
"#,
    )
    .unwrap();
    assert_eq!(config.data_dir().unwrap(), PathBuf::from("/srv/claims"));
    assert_eq!(config.store.ledger_file, "database_claims.csv");
    assert_eq!(config.form_defaults().signer, "รองผู้อำนวยการ");
    assert_eq!(config.form_defaults().recipient, DEFAULT_RECIPIENT);
    assert_eq!(config.stamp.template, Some(PathBuf::from("form.pdf")));
    assert!(config.stamp.thai_font.is_none());
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_blank_form_values_fall_back() {
    let config = Config::from_toml("[form]\nsigner = \"  \"\nrecipient = \"\"\n").unwrap();
    assert_eq!(config.form_defaults(), FormDefaults::default());
}

#[test]
fn test_malformed_toml_is_error() {
    assert!(Config::from_toml("[store\nledger_file = 3").is_err());
    assert!(Config::from_toml("[store]\nledger_file = 3\n").is_err());
}

#[test]
fn test_missing_file_is_default() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_path(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[store]\nledger_file = \"claims.csv\"\n").unwrap();
    let config = Config::from_path(&path).unwrap();
    assert_eq!(config.store.ledger_file, "claims.csv");
}

#[test]
fn test_from_path_reports_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "not = [valid").unwrap();
    let err = Config::from_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Invalid config file"));
}
