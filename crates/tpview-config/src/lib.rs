//! Configuration system for tpview.
//!
//! tpview uses TOML configuration files named `.tpview.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.tpview.toml` files found, then loading `~/.tpview.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

pub use discovery::{
    CONFIG_FILENAME, discover_config_files, format_path_for_display, global_config_path,
    is_global_config,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDisplaySettings, RawFilterSettings, RawNavigationSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for tpview.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Output settings.
    pub display: DisplaySettings,
    /// Default tag filter.
    pub filter: FilterSettings,
    /// Navigation settings.
    pub navigation: NavigationSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Files the configuration was merged from, highest precedence first.
    pub sources: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.tpview.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                debug!(path = %path.display(), "parsed config file");
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            display: &self.display,
            filter: &self.filter,
            navigation: &self.navigation,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Colorize output.
    pub color: bool,
    /// Show passed/failed counts next to entries.
    pub show_counts: bool,
    /// Show effective tags next to entries.
    pub show_tags: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            color: true,
            show_counts: true,
            show_tags: false,
        }
    }
}

/// How the tags of a filter combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// At least one tag must be present.
    #[default]
    Any,
    /// Every tag must be present.
    All,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Any => "any",
            Self::All => "all",
        })
    }
}

/// Tag filter applied when none is given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    /// How tags combine.
    pub mode: FilterMode,
    /// Tag name to requested values.
    pub tags: BTreeMap<String, Vec<String>>,
}

/// Navigation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationSettings {
    /// Skip single-entry levels and back out of empty ones.
    pub auto_select: bool,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self { auto_select: true }
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Output settings.
    display: &'a DisplaySettings,
    /// Default tag filter.
    filter: &'a FilterSettings,
    /// Navigation settings.
    navigation: &'a NavigationSettings,
}
