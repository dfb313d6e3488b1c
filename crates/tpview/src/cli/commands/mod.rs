//! Command implementations and dispatch.

pub mod config;
pub mod export;
pub mod get;
pub mod init;
pub mod ls;
pub mod search;
pub mod tags;
pub mod tree;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Ls(cmd) => ls::run(ctx, &cmd),
        Commands::Tree(cmd) => tree::run(ctx, &cmd),
        Commands::Tags(cmd) => tags::run(ctx, &cmd),
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::Get(cmd) => get::run(ctx, &cmd),
        Commands::Export(cmd) => export::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
