use langdict::IdentityMode;
use langdict_cli::{Config, Overrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.output, PathBuf::from("Result/output.xml"));
    assert_eq!(config.error_report, PathBuf::from("errors.csv"));
    assert_eq!(config.duplicate_report, PathBuf::from("Result/duplicates.csv"));
    assert_eq!(config.allowed, PathBuf::from("allowedLanguageCodes.csv"));
    assert_eq!(config.source_dir, PathBuf::from("Source"));
    assert!(!config.header_present);
    assert!(config.check_language_codes);
    assert_eq!(config.sheet, None);
    assert_eq!(config.identity_mode, IdentityMode::KeyOnly);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml_str(
        r#"
header_present = true
sheet = "Terms"
identity_mode = "key-value"
"#,
    )
    .unwrap();

    assert!(config.header_present);
    assert_eq!(config.sheet.as_deref(), Some("Terms"));
    assert_eq!(config.identity_mode, IdentityMode::KeyAndValue);
    assert_eq!(config.output, PathBuf::from("Result/output.xml"));
    assert!(config.check_language_codes);
}

#[test]
fn test_unknown_key_rejected() {
    let err = Config::from_toml_str("outptu = \"x.xml\"\n").unwrap_err();
    assert!(err.starts_with("Invalid configuration"));
}

#[test]
fn test_load_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "check_language_codes = false\n").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert!(!config.check_language_codes);

    let missing = temp_dir.path().join("missing.toml");
    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(err.contains("Cannot read config"));
}

#[test]
fn test_overrides_win_over_file() {
    let mut config = Config::from_toml_str(
        r#"
output = "from-file.xml"
allowed = "codes.csv"
"#,
    )
    .unwrap();

    config.apply_overrides(Overrides {
        output: Some(PathBuf::from("from-flag.xml")),
        header_exists: true,
        bypass_lang_check: true,
        ..Overrides::default()
    });

    assert_eq!(config.output, PathBuf::from("from-flag.xml"));
    assert_eq!(config.allowed, PathBuf::from("codes.csv"));
    assert!(config.header_present);
    assert!(!config.check_language_codes);

    let classify = config.classify_options();
    assert!(classify.header_present);
    assert!(!classify.check_language_codes);
    assert!(config.read_options().header_present);
    assert_eq!(config.output_paths().document, PathBuf::from("from-flag.xml"));
}

#[test]
fn test_absent_flags_leave_config_alone() {
    let mut config = Config::from_toml_str("header_present = true\nsheet = \"A\"\n").unwrap();
    config.apply_overrides(Overrides::default());

    assert!(config.header_present);
    assert_eq!(config.sheet.as_deref(), Some("A"));
    assert!(config.check_language_codes);
}
