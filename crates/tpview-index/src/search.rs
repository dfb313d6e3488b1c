//! Jump-to-entry search over node names.
//!
//! Queries are case-insensitive substrings, optionally restricted to one node kind with a
//! `kind:` prefix (`suite:alpha`). The name/type index lets the walk skip subtrees where
//! nothing could match.

use tpview_report::{NodeKind, ReportNode};
use tracing::debug;

use crate::{name_type::NameTypeKey, pipeline::IndexedReport};

/// A parsed search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Lowercased text to look for.
    text: String,
    /// Optional kind restriction.
    kind: Option<NodeKind>,
}

impl SearchQuery {
    /// Parses `text` or `kind:text`.
    ///
    /// A prefix that is not a node kind is treated as part of the text.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        if let Some((prefix, rest)) = query.split_once(':')
            && let Ok(kind) = prefix.trim().parse::<NodeKind>()
        {
            return Self {
                text: rest.trim().to_lowercase(),
                kind: Some(kind),
            };
        }
        Self {
            text: query.to_lowercase(),
            kind: None,
        }
    }

    /// The kind restriction, if any.
    pub fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    /// Tests a name and kind against the query.
    pub fn matches(&self, name: &str, kind: NodeKind) -> bool {
        self.kind.is_none_or(|k| k == kind) && name.to_lowercase().contains(&self.text)
    }

    /// Tests a name/type key against the query.
    fn matches_key(&self, key: &NameTypeKey) -> bool {
        key.kind()
            .is_some_and(|kind| self.matches(key.name(), kind))
    }
}

/// A node matching a search, with the path that selects it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    /// The matching node.
    pub node: &'a ReportNode,
    /// Uids from the root down to the node, inclusive.
    pub path: Vec<&'a str>,
}

/// Finds every node whose name matches `query`, in pre-order.
pub fn search<'a>(report: &'a IndexedReport, query: &str) -> Vec<SearchHit<'a>> {
    let (hits, entered) = search_counting(report, query);
    debug!(query, hits = hits.len(), entered, "searched report");
    hits
}

/// Runs a search, also returning how many nodes the pruned walk entered.
fn search_counting<'a>(report: &'a IndexedReport, query: &str) -> (Vec<SearchHit<'a>>, usize) {
    let mut walk = Walk {
        report,
        query: SearchQuery::parse(query),
        path: Vec::new(),
        hits: Vec::new(),
        entered: 0,
    };
    for root in report.roots() {
        walk.visit(root);
    }
    (walk.hits, walk.entered)
}

/// State of one pre-order search walk.
struct Walk<'a> {
    /// Report whose name/type index drives pruning.
    report: &'a IndexedReport,
    /// Parsed query.
    query: SearchQuery,
    /// Uids from the root to the node being visited.
    path: Vec<&'a str>,
    /// Matches so far.
    hits: Vec<SearchHit<'a>>,
    /// Nodes not pruned.
    entered: usize,
}

impl<'a> Walk<'a> {
    /// Visits `node` and the parts of its subtree that can still match.
    fn visit(&mut self, node: &'a ReportNode) {
        let reachable = self.report.derived(&node.uid).is_none_or(|derived| {
            derived
                .name_type_index
                .iter()
                .any(|key| self.query.matches_key(key))
        });
        if !reachable {
            return;
        }

        self.entered += 1;
        self.path.push(&node.uid);
        if self.query.matches(&node.name, node.kind) {
            self.hits.push(SearchHit {
                node,
                path: self.path.clone(),
            });
        }
        for child in &node.entries {
            self.visit(child);
        }
        self.path.pop();
    }
}

#[cfg(test)]
mod tests {
    use tpview_report::parse_report_str;

    use super::*;
    use crate::pipeline::index;

    const SAMPLE: &str = include_str!("../../../fixtures/sample_report.json");

    fn sample() -> IndexedReport {
        index(parse_report_str(SAMPLE).unwrap())
    }

    fn hit_uids<'a>(hits: &[SearchHit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.node.uid.as_str()).collect()
    }

    #[test]
    fn parse_kind_prefix() {
        let query = SearchQuery::parse("Suite:Alpha");
        assert_eq!(query.kind(), Some(NodeKind::Suite));
        assert!(query.matches("AlphaSuite", NodeKind::Suite));
        assert!(!query.matches("AlphaSuite", NodeKind::Multitest));
    }

    #[test]
    fn unknown_prefix_is_text() {
        let query = SearchQuery::parse("foo:bar");
        assert_eq!(query.kind(), None);
        assert!(query.matches("x foo:bar y", NodeKind::Testcase));
    }

    #[test]
    fn case_insensitive_substring() {
        let report = sample();
        let hits = search(&report, "SUITE");
        assert_eq!(hit_uids(&hits), ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn hits_are_preorder_with_paths() {
        let report = sample();
        let hits = search(&report, "test_equality_passing");
        assert_eq!(
            hit_uids(&hits),
            ["alpha-1", "alpha-2", "beta-1", "gamma-1"]
        );
        assert_eq!(hits[3].path, ["plan", "secondary", "gamma", "gamma-1"]);
    }

    #[test]
    fn kind_restriction() {
        let report = sample();
        let hits = search(&report, "multitest:");
        assert_eq!(hit_uids(&hits), ["primary", "secondary"]);
        assert!(search(&report, "testcase:alpha").is_empty());
    }

    #[test]
    fn pruned_subtrees_are_not_visited() {
        let report = sample();
        let (hits, entered) = search_counting(&report, "passing2");
        assert_eq!(hit_uids(&hits), ["alpha-2"]);
        assert_eq!(hits[0].path, ["plan", "primary", "alpha", "alpha-2"]);
        // alpha-1, beta and secondary are cut off by their name/type index.
        assert_eq!(entered, 4);
    }

    #[test]
    fn query_matching_an_ancestor_enters_every_node() {
        let report = sample();
        let (_, entered) = search_counting(&report, "testplan");
        assert_eq!(entered, report.node_count());
    }

    #[test]
    fn no_match() {
        let report = sample();
        assert!(search(&report, "nonexistent").is_empty());
    }
}
