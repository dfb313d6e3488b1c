//! Implementation of `tpview search`.

use std::process::ExitCode;

use serde::Serialize;
use tpview_index::search;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{JsonEntry, print_json},
};

/// JSON output for one search hit.
#[derive(Serialize)]
struct JsonHit<'a> {
    /// The matching entry.
    #[serde(flatten)]
    entry: JsonEntry<'a>,
    /// Uids from the root to the entry, usable as a `tpview ls` path.
    path: &'a [&'a str],
}

/// Finds entries by name.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let report = match ctx.report(&cmd.report) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let hits = search(&report, &cmd.query);

    if cmd.json {
        let json: Vec<_> = hits
            .iter()
            .map(|hit| JsonHit {
                entry: JsonEntry::new(&report, hit.node),
                path: &hit.path,
            })
            .collect();
        return print_json(&json);
    }

    let palette = ctx.palette;
    if hits.is_empty() {
        println!("{}", palette.dim("No matches."));
        return ExitCode::SUCCESS;
    }

    for hit in &hits {
        let names: Vec<&str> = report
            .path_to(&hit.node.uid)
            .unwrap_or_default()
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        println!(
            "{} {} {}",
            palette.breadcrumb(&names),
            palette.dim(&format!("[{}]", hit.node.kind)),
            palette.status(hit.node.status)
        );
        println!("  {}", palette.dim(&hit.path.join(" ")));
    }
    ExitCode::SUCCESS
}
