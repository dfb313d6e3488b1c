//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use tpview_config::{Config, FilterMode};
use tpview_index::{IndexedReport, MatchMode, TagFilter, filter_report, index};
use tpview_report::load_report;
use tpview_style::Palette;
use tracing::debug;

use crate::cli::args::FilterArgs;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// Output styling.
    pub palette: Palette,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(no_color: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        let palette = Palette::new(config.display.color && !no_color);
        Ok(Self {
            cwd,
            config,
            palette,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(no_color: bool) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            palette: Palette::new(!no_color),
        })
    }

    /// Reads and indexes a report.
    pub fn report(&self, path: &Path) -> Result<IndexedReport, ExitCode> {
        let resolved = if path == Path::new("-") {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        let roots = load_report(&resolved).map_err(|e| {
            eprintln!("error: unable to process report: {e}");
            ExitCode::FAILURE
        })?;
        Ok(index(roots))
    }

    /// Reads and indexes a report, then applies the tag filter.
    ///
    /// Tags given on the command line replace the configured default filter.
    pub fn filtered_report(
        &self,
        path: &Path,
        args: &FilterArgs,
    ) -> Result<IndexedReport, ExitCode> {
        let report = self.report(path)?;
        let filter = self.tag_filter(args)?;
        if filter.is_empty() {
            return Ok(report);
        }
        debug!(tags = filter.tags.len(), mode = %filter.mode, "applying tag filter");
        Ok(filter_report(&report, &filter))
    }

    /// Builds the tag filter from flags, falling back to configuration.
    fn tag_filter(&self, args: &FilterArgs) -> Result<TagFilter, ExitCode> {
        let configured = match self.config.filter.mode {
            FilterMode::Any => MatchMode::Any,
            FilterMode::All => MatchMode::All,
        };
        let mode = if args.all_tags {
            MatchMode::All
        } else {
            configured
        };

        if args.tags.is_empty() {
            return Ok(TagFilter::new(self.config.filter.tags.clone(), mode));
        }
        TagFilter::parse(args.tags.as_slice(), mode).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
