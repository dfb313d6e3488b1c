//! Implementation of `tpview tags`.

use std::process::ExitCode;

use serde::Serialize;
use tpview_report::TagMap;

use crate::cli::{
    args::TagsCommand,
    context::CommandContext,
    output::{print_json, tag_lines},
};

/// JSON output for `tpview tags`.
#[derive(Serialize)]
struct JsonTags<'a> {
    /// Entry uid.
    uid: &'a str,
    /// The entry's own tags.
    own: &'a TagMap,
    /// Effective tags.
    tags: &'a TagMap,
    /// Union of effective tags over the subtree.
    tags_index: &'a TagMap,
}

/// Shows own, effective and indexed tags of one entry.
pub fn run(ctx: &CommandContext, cmd: &TagsCommand) -> ExitCode {
    let report = match ctx.report(&cmd.report) {
        Ok(r) => r,
        Err(code) => return code,
    };

    let uid = match (&cmd.uid, report.roots().first()) {
        (Some(uid), _) => uid.as_str(),
        (None, Some(root)) => root.uid.as_str(),
        (None, None) => {
            eprintln!("error: report has no entries");
            return ExitCode::FAILURE;
        }
    };

    let Some((node, derived)) = report.get(uid) else {
        eprintln!("error: not found: {uid}");
        return ExitCode::FAILURE;
    };

    if cmd.json {
        return print_json(&JsonTags {
            uid: &node.uid,
            own: &node.tags,
            tags: &derived.tags,
            tags_index: &derived.tags_index,
        });
    }

    let palette = ctx.palette;
    println!(
        "{} {}",
        palette.header(&node.name),
        palette.dim(&format!("({})", node.uid))
    );
    println!();
    println!("{}", palette.subheader("Own tags:"));
    println!("{}", tag_lines(palette, &node.tags));
    println!("{}", palette.subheader("Effective tags:"));
    println!("{}", tag_lines(palette, &derived.tags));
    println!("{}", palette.subheader("Tags index:"));
    println!("{}", tag_lines(palette, &derived.tags_index));
    ExitCode::SUCCESS
}
