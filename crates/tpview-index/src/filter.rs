//! Tag filtering of an indexed report.
//!
//! A filter is a set of requested `(tag name, value)` pairs and a match mode. It is tested
//! against each node's tags index, which already includes inherited tags and every tag found
//! below the node. Pruning is top-down: a node survives when it matches and its parent
//! survived.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tpview_report::{ReportNode, TagMap, has_tag, push_unique};
use tracing::debug;

use crate::{
    error::FilterError,
    pipeline::{IndexedReport, index},
};

/// Tag name assumed for filter items given without `name=`.
pub const DEFAULT_TAG_NAME: &str = "simple";

/// How requested tag pairs combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// At least one requested pair must be present.
    #[default]
    Any,
    /// Every requested pair must be present.
    All,
}

impl MatchMode {
    /// Returns the lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::All => "all",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            _ => Err(FilterError::UnknownMode(s.to_string())),
        }
    }
}

/// Requested tags and how to match them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    /// Requested values per tag name.
    pub tags: TagMap,
    /// Match mode.
    pub mode: MatchMode,
}

impl TagFilter {
    /// Creates a filter from a tag map.
    pub fn new(tags: TagMap, mode: MatchMode) -> Self {
        Self { tags, mode }
    }

    /// Parses command-line style items.
    ///
    /// Each item is `name=value[,value...]` or a bare `value`, which stands for
    /// [`DEFAULT_TAG_NAME`]. Repeated names accumulate values.
    pub fn parse<S: AsRef<str>>(items: &[S], mode: MatchMode) -> Result<Self, FilterError> {
        let mut tags = TagMap::new();
        for item in items {
            let item = item.as_ref();
            let (name, values) = parse_item(item)?;
            let slot = tags.entry(name.to_string()).or_default();
            for value in values {
                push_unique(slot, value);
            }
        }
        Ok(Self { tags, mode })
    }

    /// Whether the filter requests nothing.
    pub fn is_empty(&self) -> bool {
        self.tags.values().all(Vec::is_empty)
    }

    /// Iterates requested `(name, value)` pairs.
    fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.as_str(), v.as_str())))
    }

    /// Tests a tags index against the filter. An empty filter matches everything.
    pub fn matches(&self, tags_index: &TagMap) -> bool {
        if self.is_empty() {
            return true;
        }
        let mut pairs = self.pairs();
        match self.mode {
            MatchMode::Any => pairs.any(|(name, value)| has_tag(tags_index, name, value)),
            MatchMode::All => pairs.all(|(name, value)| has_tag(tags_index, name, value)),
        }
    }
}

/// Splits one filter item into a tag name and its values.
fn parse_item(item: &str) -> Result<(&str, Vec<&str>), FilterError> {
    let trimmed = item.trim();
    if trimmed.is_empty() {
        return Err(FilterError::invalid(item, "empty tag"));
    }
    let (name, values) = match trimmed.split_once('=') {
        Some((name, values)) => (name.trim(), values),
        None => (DEFAULT_TAG_NAME, trimmed),
    };
    if name.is_empty() {
        return Err(FilterError::invalid(item, "missing tag name"));
    }
    let values: Vec<&str> = values.split(',').map(str::trim).collect();
    if values.iter().any(|v| v.is_empty()) {
        return Err(FilterError::invalid(item, "missing tag value"));
    }
    Ok((name, values))
}

/// Returns the re-indexed report restricted to nodes matching `filter`.
pub fn filter_report(report: &IndexedReport, filter: &TagFilter) -> IndexedReport {
    if filter.is_empty() {
        return report.clone();
    }
    let roots: Vec<_> = report
        .roots()
        .iter()
        .filter_map(|root| prune(root, report, filter))
        .collect();
    debug!(
        before = report.node_count(),
        kept_roots = roots.len(),
        mode = %filter.mode,
        "filtered report by tags"
    );
    index(roots)
}

/// Copies `node` with only its matching descendants, or `None` if it does not match.
fn prune(node: &ReportNode, report: &IndexedReport, filter: &TagFilter) -> Option<ReportNode> {
    let derived = report.derived(&node.uid)?;
    if !filter.matches(&derived.tags_index) {
        return None;
    }
    let entries = node
        .entries
        .iter()
        .filter_map(|child| prune(child, report, filter))
        .collect();
    Some(node.with_entries(entries))
}
