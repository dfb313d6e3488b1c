//! Implementation of `tpview ls`.

use std::process::ExitCode;

use serde::Serialize;
use tpview_index::IndexedReport;
use tpview_nav::{Navigator, Selected, Selection};
use tracing::debug;

use crate::cli::{
    args::LsCommand,
    context::CommandContext,
    output::{JsonEntry, entries_table, entry_line, print_json},
};

/// JSON output for `tpview ls`.
#[derive(Serialize)]
struct JsonListing<'a> {
    /// Navigation path after auto-selection.
    selected: &'a [Selected],
    /// Resolved breadcrumb entries.
    breadcrumbs: Vec<JsonEntry<'a>>,
    /// Entries selectable at the current level.
    children: Vec<JsonEntry<'a>>,
}

/// Lists the entries at the navigation level given by the UID path.
pub fn run(ctx: &CommandContext, cmd: &LsCommand) -> ExitCode {
    let report = match ctx.filtered_report(&cmd.report, &cmd.filter) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let mut nav = Navigator::new(report.roots());
    for uid in &cmd.uids {
        if !nav.follow(uid) {
            let depth = nav.selected().len();
            eprintln!("error: no entry '{uid}' at depth {depth}");
            return ExitCode::FAILURE;
        }
    }

    if ctx.config.navigation.auto_select && !cmd.no_auto {
        let steps = nav.reconcile();
        debug!(steps, "auto-selected entries");
    }

    let selection = nav.selection();
    if cmd.json {
        let listing = JsonListing {
            selected: nav.selected(),
            breadcrumbs: selection
                .breadcrumbs
                .iter()
                .map(|node| JsonEntry::new(&report, node))
                .collect(),
            children: selection
                .current_children
                .iter()
                .map(|node| JsonEntry::new(&report, node))
                .collect(),
        };
        return print_json(&listing);
    }

    print_listing(ctx, &report, &selection);
    ExitCode::SUCCESS
}

/// Prints breadcrumbs followed by the current entries.
fn print_listing(ctx: &CommandContext, report: &IndexedReport, selection: &Selection<'_>) {
    let palette = ctx.palette;
    let display = &ctx.config.display;

    if report.is_empty() {
        println!("{}", palette.dim("No entries."));
        return;
    }

    if let Some(current) = selection.current() {
        let names: Vec<&str> = selection
            .breadcrumbs
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        println!("{}", palette.breadcrumb(&names));
        println!("{}", entry_line(palette, display, report, current));
        println!();
    }

    if selection.current_children.is_empty() {
        if let Some(current) = selection.current()
            && current.is_testcase()
        {
            println!(
                "{}",
                palette.dim(&format!(
                    "{} assertion(s); use `tpview get` to show them.",
                    current.assertions.len()
                ))
            );
        } else {
            println!("{}", palette.dim("No entries."));
        }
        return;
    }

    println!(
        "{}",
        entries_table(display, report, selection.current_children)
    );
}
