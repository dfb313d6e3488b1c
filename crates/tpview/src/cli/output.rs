//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use tpview_config::DisplaySettings;
use tpview_index::{CaseCount, IndexedReport};
use tpview_report::{NodeKind, ReportNode, Status, TagMap, format_tags};
use tpview_style::Palette;

/// JSON summary of one report entry.
#[derive(Serialize)]
pub struct JsonEntry<'a> {
    /// Entry uid.
    pub uid: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Resolved status.
    pub status: Status,
    /// Passed/failed testcases below the entry.
    pub case_count: CaseCount,
    /// Effective tags.
    pub tags: TagMap,
}

impl<'a> JsonEntry<'a> {
    /// Summarizes `node` using its derived values from `report`.
    pub fn new(report: &IndexedReport, node: &'a ReportNode) -> Self {
        let derived = report.derived(&node.uid);
        Self {
            uid: &node.uid,
            name: &node.name,
            kind: node.kind,
            status: node.status,
            case_count: derived.map(|d| d.case_count).unwrap_or_default(),
            tags: derived.map(|d| d.tags.clone()).unwrap_or_default(),
        }
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// One-line description of an entry: name, kind, status and optional counts and tags.
pub fn entry_line(
    palette: Palette,
    display: &DisplaySettings,
    report: &IndexedReport,
    node: &ReportNode,
) -> String {
    let mut line = format!(
        "{} {} {}",
        palette.subheader(&node.name),
        palette.dim(&format!("[{}]", node.kind)),
        palette.status(node.status)
    );
    if let Some(derived) = report.derived(&node.uid) {
        if display.show_counts {
            let count = derived.case_count;
            line.push(' ');
            line.push_str(&palette.counts(count.passed, count.failed));
        }
        if display.show_tags && !derived.tags.is_empty() {
            line.push(' ');
            line.push_str(&palette.dim(&format_tags(&derived.tags)));
        }
    }
    line
}

/// Builds a table of entries with their status and counts.
pub fn entries_table(
    display: &DisplaySettings,
    report: &IndexedReport,
    entries: &[ReportNode],
) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec!["Name", "Type", "UID", "Status"];
    if display.show_counts {
        header.extend(["Passed", "Failed"]);
    }
    if display.show_tags {
        header.push("Tags");
    }
    table.set_header(header);

    for node in entries {
        let derived = report.derived(&node.uid);
        let mut row = vec![
            Cell::new(&node.name),
            Cell::new(node.kind),
            Cell::new(&node.uid),
            Cell::new(node.status),
        ];
        if display.show_counts {
            let count = derived.map(|d| d.case_count).unwrap_or_default();
            row.push(Cell::new(count.passed));
            row.push(Cell::new(count.failed));
        }
        if display.show_tags {
            row.push(Cell::new(
                derived.map(|d| format_tags(&d.tags)).unwrap_or_default(),
            ));
        }
        table.add_row(row);
    }

    table
}

/// Formats a tag map as indented `name: v1, v2` lines.
pub fn tag_lines(palette: Palette, tags: &TagMap) -> String {
    if tags.is_empty() {
        return format!("  {}", palette.dim("(none)"));
    }
    tags.iter()
        .map(|(name, values)| format!("  {}: {}", palette.subheader(name), values.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}
