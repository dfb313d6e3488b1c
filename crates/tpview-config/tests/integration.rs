//! Integration tests for tpview-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> validate.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tpview_config::{CONFIG_FILENAME, Config, ConfigError, ConfigWarning, FilterMode};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config file in `rel_dir` and returns its path.
    fn create_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let path = self.create_dir(rel_dir).join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_root_config_shields_from_parents_and_global() {
    let env = TestEnv::new();
    env.create_config("", "[display]\ncolor = false\n");
    let project = env.create_config("project", "root = true\n[display]\nshow_tags = true\n");
    let cwd = env.create_dir("project/out");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.sources, [project]);
    assert!(config.display.color);
    assert!(config.display.show_tags);
    assert_eq!(config.config_root.as_deref(), Some(env.path().join("project").as_path()));
}

#[test]
fn test_nested_configs_merge_closest_first() {
    let env = TestEnv::new();
    env.create_config(
        "",
        r#"
root = true

[filter]
mode = "all"

[filter.tags]
simple = ["server", "client"]
colour = "white"

[navigation]
auto_select = false
"#,
    );
    env.create_config(
        "nightly",
        r#"
[filter.tags]
simple = "client"
"#,
    );
    let cwd = env.create_dir("nightly/run");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.sources.len(), 2);
    assert_eq!(config.filter.mode, FilterMode::All);
    assert_eq!(config.filter.tags["simple"], vec!["client"]);
    assert_eq!(config.filter.tags["colour"], vec!["white"]);
    assert!(!config.navigation.auto_select);
    assert!(config.validate().is_empty());
}

#[test]
fn test_invalid_config_reports_path() {
    let env = TestEnv::new();
    let path = env.create_config("", "root = true\n[filter]\nmode = \"most\"\n");

    let err = Config::load(env.path()).unwrap_err();

    match err {
        ConfigError::ParseToml { path: bad, .. } => assert_eq!(bad, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_missing_file_is_read_error() {
    let env = TestEnv::new();
    let err = Config::load_from_files(&[env.path().join("nope.toml")]).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_validate_reports_empty_values() {
    let env = TestEnv::new();
    let path = env.create_config("", "[filter.tags]\nsimple = [\"\"]\n");

    let config = Config::load_from_files(&[path]).unwrap();

    assert_eq!(
        config.validate(),
        [ConfigWarning::EmptyTagValue {
            tag: "simple".into()
        }]
    );
}

#[test]
fn test_local_template_round_trips() {
    let env = TestEnv::new();
    let path = env.create_config("", &tpview_config::local_template());

    let config = Config::load_from_files(&[path]).unwrap();

    assert!(config.filter.tags.is_empty());
    assert!(config.display.color);
}

#[test]
fn test_effective_settings_reload() {
    let env = TestEnv::new();
    let path = env.create_config("", "[display]\nshow_counts = false\n");
    let config = Config::load_from_files(&[path]).unwrap();

    let rendered = config.settings_to_toml().unwrap();
    let again = env.create_config("copy", &rendered);
    let reloaded = Config::load_from_files(&[again]).unwrap();

    assert_eq!(reloaded.display, config.display);
    assert_eq!(reloaded.filter, config.filter);
    assert_eq!(reloaded.navigation, config.navigation);
}
