//! Implementation of `tpview get`.

use std::process::ExitCode;

use tpview_report::format_tags;
use tpview_style::{Highlighter, indent_content};

use crate::cli::{args::GetCommand, context::CommandContext, output::print_json};

/// Shows one entry with its derived values and, for testcases, its assertions.
pub fn run(ctx: &CommandContext, cmd: &GetCommand) -> ExitCode {
    let report = match ctx.report(&cmd.report) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let Some((node, derived)) = report.get(&cmd.uid) else {
        eprintln!("error: not found: {}", cmd.uid);
        return ExitCode::FAILURE;
    };

    if cmd.json {
        return print_json(&report.annotated(node));
    }

    let palette = ctx.palette;
    let names: Vec<&str> = report
        .path_to(&node.uid)
        .unwrap_or_default()
        .iter()
        .map(|n| n.name.as_str())
        .collect();

    println!("{}", palette.header(&node.name));
    println!("{}", palette.breadcrumb(&names));
    println!();
    println!("  {} {}", palette.subheader("uid:"), node.uid);
    println!("  {} {}", palette.subheader("type:"), node.kind);
    println!("  {} {}", palette.subheader("status:"), palette.status(node.status));
    println!(
        "  {} {}",
        palette.subheader("cases:"),
        palette.counts(derived.case_count.passed, derived.case_count.failed)
    );
    if !derived.tags.is_empty() {
        println!("  {} {}", palette.subheader("tags:"), format_tags(&derived.tags));
    }

    if node.is_testcase() {
        println!();
        println!(
            "{}",
            palette.subheader(&format!("Assertions ({}):", node.assertions.len()))
        );
        if node.assertions.is_empty() {
            println!("  {}", palette.dim("(none)"));
            return ExitCode::SUCCESS;
        }
        let json = match serde_json::to_string_pretty(&node.assertions) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: failed to serialize assertions: {e}");
                return ExitCode::FAILURE;
            }
        };
        let body = if palette.is_colored() {
            Highlighter::new().highlight_json(&json)
        } else {
            json
        };
        println!("{}", indent_content(&body));
    } else {
        println!("  {} {}", palette.subheader("entries:"), node.entries.len());
    }

    ExitCode::SUCCESS
}
