//! Report document parsing.
//!
//! Converts a raw report JSON document into a forest of [`ReportNode`]s. The raw schema is
//! loose: group nodes name their kind through `category`, testcases carry assertions in
//! `entries`, and the top-level test plan usually has no `type` at all. Everything that the
//! indexing passes rely on is validated here, so a malformed node fails fast with its uid.

use std::{
    collections::HashSet,
    fs,
    io::{self, Read},
    path::Path,
};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    ReportError,
    node::{NodeKind, ReportNode, Status, iter_forest},
    tags::{TagMap, push_unique},
};

/// Report type of a testcase node.
const TESTCASE_TYPE: &str = "TestCaseReport";

/// Report type of a group node (multitest, suite, parametrization, ...).
const GROUP_TYPE: &str = "TestGroupReport";

/// Report type of a whole test plan.
const PLAN_TYPE: &str = "TestReport";

/// A report node exactly as it appears in the JSON document.
///
/// Every field is optional so that schema violations can be reported with the node's uid,
/// which is read from the JSON object before this struct is decoded.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNode {
    /// Display name.
    name: Option<String>,
    /// Report class name (`TestReport`, `TestGroupReport`, `TestCaseReport`).
    #[serde(rename = "type")]
    report_type: Option<String>,
    /// Group category (`multitest`, `suite`, ...).
    category: Option<String>,
    /// Computed status.
    status: Option<String>,
    /// Explicit status that wins over the computed one.
    status_override: Option<String>,
    /// Tag name to values.
    tags: Option<Map<String, Value>>,
    /// Children for groups, assertions for testcases.
    entries: Option<Vec<Value>>,
}

/// Parses a report document from a JSON string.
///
/// The document may be a single root object or an array of roots.
pub fn parse_report_str(contents: &str) -> Result<Vec<ReportNode>, ReportError> {
    let document: Value = serde_json::from_str(contents)?;
    parse_report_value(document)
}

/// Parses a report document from an already decoded JSON value.
pub fn parse_report_value(document: Value) -> Result<Vec<ReportNode>, ReportError> {
    let raw_roots = match document {
        Value::Array(items) => items,
        other => vec![other],
    };

    let roots = raw_roots
        .into_iter()
        .map(|value| build_node(value, None))
        .collect::<Result<Vec<_>, ReportError>>()?;

    check_unique_uids(&roots)?;
    debug!(roots = roots.len(), "parsed report");
    Ok(roots)
}

/// Reads and parses a report file. A path of `-` reads standard input.
pub fn load_report(path: &Path) -> Result<Vec<ReportNode>, ReportError> {
    let read_error = |source| ReportError::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(read_error)?;
        buf
    } else {
        fs::read_to_string(path).map_err(read_error)?
    };

    parse_report_str(&contents)
}

/// Builds one node (and its subtree) from its raw JSON value.
fn build_node(value: Value, parent: Option<&ReportNode>) -> Result<ReportNode, ReportError> {
    let parent_uid = parent.map(|p| p.uid.clone());
    let Value::Object(map) = value else {
        return Err(match parent_uid {
            Some(uid) => ReportError::malformed(&uid, "child entry is not an object"),
            None => ReportError::malformed("<top level>", "report root is not an object"),
        });
    };

    let Some(uid) = map.get("uid").and_then(Value::as_str).map(str::to_string) else {
        return Err(ReportError::MissingUid { parent: parent_uid });
    };
    let raw: RawNode = serde_json::from_value(Value::Object(map))
        .map_err(|e| ReportError::malformed(&uid, e.to_string()))?;
    let kind = resolve_kind(&uid, raw.report_type.as_deref(), raw.category.as_deref(), parent)?;
    let name = raw.name.unwrap_or_default();
    let tags = parse_tags(&uid, raw.tags)?;

    let mut node = ReportNode {
        uid,
        name,
        kind,
        status: Status::Passed,
        tags,
        entries: Vec::new(),
        assertions: Vec::new(),
    };

    let raw_entries = raw.entries.unwrap_or_default();
    if kind == NodeKind::Testcase {
        node.assertions = raw_entries;
    } else {
        let mut entries = Vec::with_capacity(raw_entries.len());
        for entry in raw_entries {
            entries.push(build_node(entry, Some(&node))?);
        }
        node.entries = entries;
    }

    node.status = resolve_status(
        &node,
        raw.status_override.as_deref(),
        raw.status.as_deref(),
    )?;
    trace!(uid = %node.uid, kind = %node.kind, status = %node.status, "built node");
    Ok(node)
}

/// Maps the raw `type`/`category` pair onto the closed node kind set.
fn resolve_kind(
    uid: &str,
    report_type: Option<&str>,
    category: Option<&str>,
    parent: Option<&ReportNode>,
) -> Result<NodeKind, ReportError> {
    match report_type {
        Some(TESTCASE_TYPE) => Ok(NodeKind::Testcase),
        Some(GROUP_TYPE) => {
            let Some(category) = category else {
                return Err(ReportError::malformed(uid, "group node without category"));
            };
            Ok(group_kind(category))
        }
        Some(PLAN_TYPE) => Ok(NodeKind::Testplan),
        Some(other) => other.parse().map_err(|_| {
            ReportError::malformed(uid, format!("unknown report type '{other}'"))
        }),
        None if parent.is_none() => Ok(NodeKind::Testplan),
        None => match category {
            Some(category) => Ok(group_kind(category)),
            None => Err(ReportError::malformed(uid, "missing type")),
        },
    }
}

/// Maps a group category onto a node kind.
///
/// Suites and anything nested like one (parametrization groups) become suites; any other
/// runner category (gtest, cppunit, ...) is a run group.
fn group_kind(category: &str) -> NodeKind {
    match category.to_ascii_lowercase().as_str() {
        "suite" | "testsuite" | "parametrization" => NodeKind::Suite,
        "testcase" => NodeKind::Testcase,
        "testplan" => NodeKind::Testplan,
        _ => NodeKind::Multitest,
    }
}

/// Resolves the node status.
///
/// `status_override` wins when present. Groups without a status take the precedent status of
/// their children (passed when childless). Testcases must carry a status.
fn resolve_status(
    node: &ReportNode,
    status_override: Option<&str>,
    status: Option<&str>,
) -> Result<Status, ReportError> {
    if let Some(raw) = status_override.or(status) {
        return raw
            .parse()
            .map_err(|reason: String| ReportError::malformed(&node.uid, reason));
    }
    if node.is_testcase() {
        return Err(ReportError::malformed(&node.uid, "testcase without status"));
    }
    Ok(Status::precedent(node.entries.iter().map(|e| e.status)).unwrap_or(Status::Passed))
}

/// Converts the raw tag object, deduplicating values in first-seen order.
///
/// A bare string value is accepted as a single-element list.
fn parse_tags(uid: &str, raw: Option<Map<String, Value>>) -> Result<TagMap, ReportError> {
    let mut tags = TagMap::new();
    for (name, value) in raw.unwrap_or_default() {
        let values = tags.entry(name.clone()).or_default();
        match value {
            Value::String(s) => {
                push_unique(values, &s);
            }
            Value::Array(items) => {
                for item in items {
                    let Value::String(s) = item else {
                        return Err(ReportError::malformed(
                            uid,
                            format!("tag '{name}' has a non-string value"),
                        ));
                    };
                    push_unique(values, &s);
                }
            }
            _ => {
                return Err(ReportError::malformed(
                    uid,
                    format!("tag '{name}' must be a string or a list of strings"),
                ));
            }
        }
    }
    Ok(tags)
}

/// Fails if two nodes of the forest share a uid.
fn check_unique_uids(roots: &[ReportNode]) -> Result<(), ReportError> {
    let mut seen = HashSet::new();
    for node in iter_forest(roots) {
        if !seen.insert(node.uid.as_str()) {
            return Err(ReportError::DuplicateUid {
                uid: node.uid.clone(),
            });
        }
    }
    Ok(())
}
