//! Hierarchical node structures for the report tree.
//!
//! A report is a forest: each top-level root (normally a single test plan) owns its run
//! groups, which own suites, which own testcases. Testcases are the leaves of the navigable
//! tree; their own entries are assertion payloads and never report nodes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tags::{TagMap, push_unique};

/// The closed set of report node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A whole test plan run.
    Testplan,
    /// A test run group.
    Multitest,
    /// A suite of testcases.
    Suite,
    /// A single testcase.
    Testcase,
}

impl NodeKind {
    /// All kinds, from the top of the tree down.
    pub const ALL: [Self; 4] = [Self::Testplan, Self::Multitest, Self::Suite, Self::Testcase];

    /// Returns the lowercase name used in name/type keys and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Testplan => "testplan",
            Self::Multitest => "multitest",
            Self::Suite => "suite",
            Self::Testcase => "testcase",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown node type: {s}"))
    }
}

/// Execution status of a report node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// An error occurred while running.
    Error,
    /// At least one assertion failed.
    Failed,
    /// Execution did not finish.
    Incomplete,
    /// Everything passed.
    Passed,
    /// Not executed.
    Skipped,
}

impl Status {
    /// Statuses ordered from most to least significant.
    pub const PRECEDENCE: [Self; 5] = [
        Self::Error,
        Self::Failed,
        Self::Incomplete,
        Self::Passed,
        Self::Skipped,
    ];

    /// Returns the lowercase name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Failed => "failed",
            Self::Incomplete => "incomplete",
            Self::Passed => "passed",
            Self::Skipped => "skipped",
        }
    }

    /// Position in [`Status::PRECEDENCE`]; lower is more significant.
    fn rank(self) -> usize {
        match self {
            Self::Error => 0,
            Self::Failed => 1,
            Self::Incomplete => 2,
            Self::Passed => 3,
            Self::Skipped => 4,
        }
    }

    /// Returns the most significant status of `statuses`, or `None` if there are none.
    pub fn precedent(statuses: impl IntoIterator<Item = Self>) -> Option<Self> {
        statuses.into_iter().min_by_key(|s| s.rank())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::PRECEDENCE
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown status: {s}"))
    }
}

/// An opaque assertion payload attached to a testcase.
pub type Assertion = Value;

/// A node in the report tree.
///
/// Nodes are immutable once parsed. Derived indices (effective tags, tag index, case counts,
/// name/type index) are computed by `tpview-index` into a side table keyed by `uid`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportNode {
    /// Unique identifier within one report snapshot.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Execution status.
    pub status: Status,
    /// The node's own tags, before inheritance.
    pub tags: TagMap,
    /// Child nodes in report order. Always empty for testcases.
    pub entries: Vec<Self>,
    /// Assertion payload. Only testcases carry assertions.
    pub assertions: Vec<Assertion>,
}

impl ReportNode {
    /// Creates a childless node with no tags.
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        kind: NodeKind,
        status: Status,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            kind,
            status,
            tags: TagMap::new(),
            entries: Vec::new(),
            assertions: Vec::new(),
        }
    }

    /// Adds a tag value, keeping values unique.
    pub fn with_tag(mut self, name: &str, value: &str) -> Self {
        push_unique(self.tags.entry(name.to_string()).or_default(), value);
        self
    }

    /// Appends a child node.
    pub fn with_entry(mut self, entry: Self) -> Self {
        self.entries.push(entry);
        self
    }

    /// Returns a copy of this node with `entries` replaced.
    pub fn with_entries(&self, entries: Vec<Self>) -> Self {
        Self {
            uid: self.uid.clone(),
            name: self.name.clone(),
            kind: self.kind,
            status: self.status,
            tags: self.tags.clone(),
            entries,
            assertions: self.assertions.clone(),
        }
    }

    /// Returns true for testcase nodes.
    pub fn is_testcase(&self) -> bool {
        self.kind == NodeKind::Testcase
    }

    /// Returns an iterator over this node and all descendants in pre-order (depth-first).
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }

    /// Returns the total number of nodes in this subtree (including self).
    pub fn node_count(&self) -> usize {
        1 + self.entries.iter().map(Self::node_count).sum::<usize>()
    }

    /// Returns the depth of the deepest node below this one; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.entries.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Looks up a node by uid in this subtree.
    pub fn find(&self, uid: &str) -> Option<&Self> {
        self.iter_preorder().find(|node| node.uid == uid)
    }

    /// Returns true if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Iterator for pre-order traversal of nodes.
pub struct PreorderIter<'a> {
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<&'a ReportNode>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a ReportNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so leftmost child is processed first
        for child in node.entries.iter().rev() {
            self.stack.push(child);
        }
        Some(node)
    }
}

/// Iterates every node of a forest in pre-order.
pub fn iter_forest(roots: &[ReportNode]) -> impl Iterator<Item = &ReportNode> {
    roots.iter().flat_map(ReportNode::iter_preorder)
}

/// Looks up a node by uid across a forest.
pub fn find_in_forest<'a>(roots: &'a [ReportNode], uid: &str) -> Option<&'a ReportNode> {
    iter_forest(roots).find(|node| node.uid == uid)
}

/// Returns the chain of nodes from a root down to the node with `uid`, inclusive.
///
/// Returns `None` if no node has that uid.
pub fn path_to<'a>(roots: &'a [ReportNode], uid: &str) -> Option<Vec<&'a ReportNode>> {
    /// Depth-first search that records the current path.
    fn walk<'a>(node: &'a ReportNode, uid: &str, path: &mut Vec<&'a ReportNode>) -> bool {
        path.push(node);
        if node.uid == uid || node.entries.iter().any(|child| walk(child, uid, path)) {
            return true;
        }
        path.pop();
        false
    }

    let mut path = Vec::new();
    roots
        .iter()
        .any(|root| walk(root, uid, &mut path))
        .then_some(path)
}
