use pretty_assertions::assert_eq;
use std::path::Path;

use super::super::config::*;

#[test]
fn test_empty_document_uses_defaults() {
    let config = ProgramConfig::from_toml_str("").unwrap();

    assert_eq!(config, ProgramConfig::with_serde_defaults());
    assert_eq!(config.unresolved_names, UnresolvedNamePolicy::Warn);
    assert!(!config.assert_on_error);
    assert!(config.check_context);
    assert_eq!(config.check_driver_errors, cfg!(debug_assertions));
    assert_eq!(config.info_log_limit, 16384);
}

#[test]
fn test_full_document() {
    let config = ProgramConfig::from_toml_str(
        r#"
unresolved_names = "error"
assert_on_error = true
check_driver_errors = false
check_context = false
info_log_limit = 1024
"#,
    )
    .unwrap();

    assert_eq!(
        config,
        ProgramConfig {
            unresolved_names: UnresolvedNamePolicy::Error,
            assert_on_error: true,
            check_driver_errors: false,
            check_context: false,
            info_log_limit: 1024,
        }
    );
}

#[test]
fn test_info_log_limit_is_clamped() {
    let config = ProgramConfig::from_toml_str("info_log_limit = 0").unwrap();
    assert_eq!(config.info_log_limit, 1);
}

#[test]
fn test_unknown_policy_is_rejected() {
    let result = ProgramConfig::from_toml_str(r#"unresolved_names = "panic""#);
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ProgramConfig::from_toml_file(Path::new("/nonexistent/shader-program.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_serializes_back_to_toml() {
    let config = ProgramConfig {
        unresolved_names: UnresolvedNamePolicy::Ignore,
        ..ProgramConfig::default()
    };
    let text = toml::to_string(&config).unwrap();

    assert!(text.contains(r#"unresolved_names = "ignore""#));
    assert_eq!(ProgramConfig::from_toml_str(&text).unwrap(), config);
}

#[test]
fn test_sample_config_file_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/program.toml");
    let config = ProgramConfig::from_toml_file(&path).unwrap();

    assert_eq!(
        config,
        ProgramConfig {
            unresolved_names: UnresolvedNamePolicy::Warn,
            assert_on_error: false,
            check_driver_errors: true,
            check_context: true,
            info_log_limit: 16384,
        }
    );
}
