use crev::load_config::{
    bundle_config, load_config, load_config_or_default, resolve_api_key, write_default_config,
    BundleFlags, CliConfig, API_KEY_ENV, DEFAULT_CONFIG,
};
use serial_test::serial;
use std::env;
use std::fs::write;
use tempfile::{tempdir, NamedTempFile};

/// All keys of the YAML file are read with their kebab-case names.
#[test]
fn test_load_config_reads_all_keys() {
    let config_yaml = r#"
api-key: crev_123
ignore-prefixes: [tests, build]
ignore-extensions: [.txt]
include-extensions: [.go, .py]
"#;
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), config_yaml).unwrap();

    let config = load_config(config_file.path()).expect("Config should load");

    assert_eq!(config.api_key.as_deref(), Some("crev_123"));
    assert_eq!(
        config.ignore_prefixes,
        Some(vec!["tests".to_string(), "build".to_string()])
    );
    assert_eq!(config.ignore_extensions, Some(vec![".txt".to_string()]));
    assert_eq!(
        config.include_extensions,
        Some(vec![".go".to_string(), ".py".to_string()])
    );
}

/// The template written by `crev init` only has placeholders, so it loads as empty.
#[test]
fn test_default_template_loads_as_empty_config() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), DEFAULT_CONFIG).unwrap();

    let config = load_config(config_file.path()).expect("Template should load");
    assert_eq!(config, CliConfig::default());
}

#[test]
fn test_comment_only_file_loads_as_empty_config() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "# nothing configured yet\n").unwrap();

    let config = load_config(config_file.path()).expect("Comment-only file should load");
    assert_eq!(config, CliConfig::default());
}

#[test]
fn test_invalid_yaml_is_reported() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "ignore-prefixes: [tests, build").unwrap();

    let err = load_config(config_file.path()).expect_err("Invalid YAML must fail");
    assert!(
        err.to_string().contains("Failed to parse config YAML"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_wrong_shape_is_reported() {
    let config_file = NamedTempFile::new().expect("temp file");
    write(config_file.path(), "ignore-prefixes: 42\n").unwrap();

    let err = load_config(config_file.path()).expect_err("Wrong value type must fail");
    assert!(err.to_string().contains("Failed to parse config YAML"));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");

    let err = load_config_or_default(Some(&missing)).expect_err("Missing file must fail");
    assert!(err.to_string().contains("crev init"));
}

#[test]
fn test_flags_override_config_file_lists() {
    let file = CliConfig {
        api_key: None,
        ignore_prefixes: Some(vec!["docs".into()]),
        ignore_extensions: Some(vec![".md".into()]),
        include_extensions: Some(vec![".py".into()]),
    };
    let flags = BundleFlags {
        ignore_pre: vec!["tests".into()],
        ignore_ext: vec![],
        include_ext: vec![".go".into()],
    };

    let config = bundle_config("project", flags, &file);

    assert_eq!(config.root, std::path::PathBuf::from("project"));
    assert_eq!(config.filter.ignore_prefixes()[0], "tests");
    assert!(!config.filter.ignore_prefixes().contains(&"docs".to_string()));
    // no --ignore-ext given, so the file's value stays in effect
    assert_eq!(config.filter.ignore_extensions()[0], ".md");
    assert_eq!(config.filter.include_extensions(), &[".go".to_string()]);
    // standard ignores are always present
    assert!(config.filter.ignore_prefixes().contains(&"node_modules".to_string()));
    assert!(config.filter.ignore_extensions().contains(&".png".to_string()));
}

#[test]
#[serial]
fn test_api_key_flag_wins_over_env_and_file() {
    env::set_var(API_KEY_ENV, "from-env");
    let file = CliConfig {
        api_key: Some("from-file".into()),
        ..Default::default()
    };

    let key = resolve_api_key(Some("from-flag".into()), &file).unwrap();
    env::remove_var(API_KEY_ENV);
    assert_eq!(key, "from-flag");
}

#[test]
#[serial]
fn test_api_key_env_wins_over_file() {
    env::set_var(API_KEY_ENV, "from-env");
    let file = CliConfig {
        api_key: Some("from-file".into()),
        ..Default::default()
    };

    let key = resolve_api_key(None, &file).unwrap();
    env::remove_var(API_KEY_ENV);
    assert_eq!(key, "from-env");
}

#[test]
#[serial]
fn test_api_key_falls_back_to_file_and_skips_blank_values() {
    env::set_var(API_KEY_ENV, "   ");
    let file = CliConfig {
        api_key: Some(" from-file ".into()),
        ..Default::default()
    };

    let key = resolve_api_key(Some(String::new()), &file).unwrap();
    env::remove_var(API_KEY_ENV);
    assert_eq!(key, "from-file");
}

#[test]
#[serial]
fn test_missing_api_key_is_an_error() {
    env::remove_var(API_KEY_ENV);

    let err = resolve_api_key(None, &CliConfig::default()).expect_err("No key anywhere");
    let msg = err.to_string();
    assert!(msg.contains("API key is required"));
    assert!(msg.contains(API_KEY_ENV));
}

#[test]
fn test_write_default_config_refuses_to_overwrite() {
    let dir = tempdir().unwrap();

    let path = write_default_config(dir.path()).expect("First init succeeds");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);

    write(&path, "api-key: keep-me\n").unwrap();
    let err = write_default_config(dir.path()).expect_err("Second init must fail");
    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "api-key: keep-me\n");
}
