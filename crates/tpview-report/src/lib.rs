//! Test report tree model and parsing for tpview.
//!
//! This crate turns a raw report snapshot into an immutable tree of report nodes:
//! - JSON parsing with schema validation (malformed nodes are reported by uid)
//! - Node kind mapping from report type and group category
//! - Status resolution with override and precedence rules
//! - Tag maps with first-seen, duplicate-free value order

#![warn(missing_docs)]

mod error;
mod node;
mod parse;
mod tags;

pub use error::ReportError;
pub use node::{
    Assertion, NodeKind, PreorderIter, ReportNode, Status, find_in_forest, iter_forest, path_to,
};
pub use parse::{load_report, parse_report_str, parse_report_value};
pub use tags::{TagMap, TagValues, format_tags, has_tag, push_unique};
