//! Clap argument definitions for the `tpview` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "tpview")]
#[command(about = "Browse, filter and summarize hierarchical test reports")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported `tpview` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the entries at a navigation level
    #[command(after_help = "\
NAVIGATION:
  Each UID selects a child of the previous level, starting at the report roots.
  Levels with a single entry are entered automatically and empty levels are
  left, unless --no-auto is given or [navigation] auto_select = false.

EXAMPLES:
  tpview ls report.json
  tpview ls report.json plan primary
  tpview ls report.json --tag server --tag colour=white --all-tags
  cat report.json | tpview ls -")]
    Ls(LsCommand),

    /// Print the whole report tree with counts
    Tree(TreeCommand),

    /// Show the effective tags and tag index of an entry
    Tags(TagsCommand),

    /// Find entries by name
    #[command(after_help = "\
QUERY SYNTAX:
  text              Case-insensitive substring of the entry name
  kind:text         Restrict to testplan, multitest, suite or testcase

EXAMPLES:
  tpview search report.json equality
  tpview search report.json suite:alpha")]
    Search(SearchCommand),

    /// Show a single entry, including testcase assertions
    Get(GetCommand),

    /// Write the annotated report as JSON
    Export(ExportCommand),

    /// Initialize tpview configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}

/// Tag filter flags shared by listing commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only show entries with this tag: `name=value[,value]` or a bare `simple` value
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Require every given tag instead of any
    #[arg(long)]
    pub all_tags: bool,
}

/// Arguments for `tpview ls`.
#[derive(Args, Debug, Clone)]
pub struct LsCommand {
    /// Report file, or `-` for stdin
    pub report: PathBuf,

    /// Navigation path of entry UIDs, root first
    pub uids: Vec<String>,

    #[command(flatten)]
    /// Tag filter flags.
    pub filter: FilterArgs,

    /// Disable automatic selection of single entries
    #[arg(long)]
    pub no_auto: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tpview tree`.
#[derive(Args, Debug, Clone)]
pub struct TreeCommand {
    /// Report file, or `-` for stdin
    pub report: PathBuf,

    #[command(flatten)]
    /// Tag filter flags.
    pub filter: FilterArgs,
}

/// Arguments for `tpview tags`.
#[derive(Args, Debug, Clone)]
pub struct TagsCommand {
    /// Report file, or `-` for stdin
    pub report: PathBuf,

    /// Entry UID [default: first root]
    pub uid: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tpview search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Report file, or `-` for stdin
    pub report: PathBuf,

    /// Search query
    pub query: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tpview get`.
#[derive(Args, Debug, Clone)]
pub struct GetCommand {
    /// Report file, or `-` for stdin
    pub report: PathBuf,

    /// Entry UID
    pub uid: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `tpview export`.
#[derive(Args, Debug, Clone)]
pub struct ExportCommand {
    /// Report file, or `-` for stdin
    pub report: PathBuf,

    #[command(flatten)]
    /// Tag filter flags.
    pub filter: FilterArgs,
}

/// Arguments for `tpview init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.tpview.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}
