//! Implementation of `tpview export`.

use std::process::ExitCode;

use crate::cli::{args::ExportCommand, context::CommandContext, output::print_json};

/// Writes the filtered report, annotated with derived values, as JSON.
pub fn run(ctx: &CommandContext, cmd: &ExportCommand) -> ExitCode {
    match ctx.filtered_report(&cmd.report, &cmd.filter) {
        Ok(report) => print_json(&report.to_annotated_tree()),
        Err(code) => code,
    }
}
