//! Locating the `.tpview.toml` files that apply to a working directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::debug;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".tpview.toml";

/// Lists the `.tpview.toml` files that apply to `cwd`, highest precedence first.
///
/// Every ancestor of `cwd` (itself included) is checked; the walk ends early at a file
/// declaring `root = true`. Unless that happened, `~/.tpview.toml` is appended last when it
/// exists and was not already reached by the walk.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs: Vec<PathBuf> = Vec::new();

    for candidate in cwd.ancestors().map(|dir| dir.join(CONFIG_FILENAME)) {
        if !candidate.is_file() {
            continue;
        }
        let stops_walk = is_root_config(&candidate);
        configs.push(candidate);
        if stops_walk {
            debug!(count = configs.len(), "config discovery stopped at root file");
            return configs;
        }
    }

    if let Some(global) = global_config_path().filter(|p| p.is_file())
        && !configs.contains(&global)
    {
        configs.push(global);
    }

    debug!(count = configs.len(), "discovered config files");
    configs
}

/// Location of the per-user configuration file, `None` without a home directory.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// True when `path` is the per-user configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

/// Formats a config path for display, relative to `cwd` when that is shorter.
///
/// The global config is shown as `~/.tpview.toml`.
pub fn format_path_for_display(path: &Path, cwd: &Path) -> String {
    if is_global_config(path) {
        return format!("~/{CONFIG_FILENAME}");
    }
    match pathdiff::diff_paths(path, cwd) {
        Some(relative) if relative.as_os_str().len() < path.as_os_str().len() => {
            relative.display().to_string()
        }
        _ => path.display().to_string(),
    }
}
