//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules.

use std::path::PathBuf;

use crate::{
    Config, DisplaySettings, FilterSettings, NavigationSettings,
    parse::{RawConfig, RawDisplaySettings, RawFilterSettings, RawNavigationSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - Filter tags: merged by tag name, first definition of each name wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut display = DisplaySettings::default();
    let mut filter = FilterSettings::default();
    let mut navigation = NavigationSettings::default();

    // Lowest precedence first so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.display {
            apply_raw_display(&mut display, raw);
        }
        if let Some(ref raw) = parsed.config.filter {
            apply_raw_filter(&mut filter, raw);
        }
        if let Some(ref raw) = parsed.config.navigation {
            apply_raw_navigation(&mut navigation, raw);
        }
    }

    Config {
        display,
        filter,
        navigation,
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(|p| p.to_path_buf()),
        sources: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Applies raw display settings, overwriting any present values.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    if let Some(v) = raw.color {
        result.color = v;
    }
    if let Some(v) = raw.show_counts {
        result.show_counts = v;
    }
    if let Some(v) = raw.show_tags {
        result.show_tags = v;
    }
}

/// Applies a raw filter section. Tag names replace lower-precedence definitions.
fn apply_raw_filter(result: &mut FilterSettings, raw: &RawFilterSettings) {
    if let Some(v) = raw.mode {
        result.mode = v;
    }
    if let Some(ref tags) = raw.tags {
        for (name, values) in tags {
            result.tags.insert(name.clone(), values.clone());
        }
    }
}

/// Applies raw navigation settings.
fn apply_raw_navigation(result: &mut NavigationSettings, raw: &RawNavigationSettings) {
    if let Some(v) = raw.auto_select {
        result.auto_select = v;
    }
}
