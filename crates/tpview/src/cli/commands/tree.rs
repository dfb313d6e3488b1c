//! Implementation of `tpview tree`.

use std::process::ExitCode;

use tpview_index::IndexedReport;
use tpview_report::ReportNode;

use crate::cli::{args::TreeCommand, context::CommandContext, output::entry_line};

/// Prints every entry of the report, indented by depth.
pub fn run(ctx: &CommandContext, cmd: &TreeCommand) -> ExitCode {
    let report = match ctx.filtered_report(&cmd.report, &cmd.filter) {
        Ok(r) => r,
        Err(code) => return code,
    };

    if report.is_empty() {
        println!("{}", ctx.palette.dim("No entries."));
        return ExitCode::SUCCESS;
    }

    for root in report.roots() {
        print_node(ctx, &report, root, 0);
    }

    let total = report.case_count();
    println!();
    println!(
        "{}",
        ctx.palette.dim(&format!(
            "{} entries, {} passed, {} failed",
            report.node_count(),
            total.passed,
            total.failed
        ))
    );
    ExitCode::SUCCESS
}

/// Prints `node` and its subtree.
fn print_node(ctx: &CommandContext, report: &IndexedReport, node: &ReportNode, depth: usize) {
    println!(
        "{}{}",
        "  ".repeat(depth),
        entry_line(ctx.palette, &ctx.config.display, report, node)
    );
    for child in &node.entries {
        print_node(ctx, report, child, depth + 1);
    }
}
