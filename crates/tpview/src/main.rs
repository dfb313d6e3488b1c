//! Command-line interface for the `tpview` test report browser.

mod cli;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands, logging,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let ctx = if matches!(cli.command, Commands::Init(_)) {
        CommandContext::load_cwd_only(cli.no_color)
    } else {
        CommandContext::load(cli.no_color)
    };
    let ctx = match ctx {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}
