//! The indexing pipeline and the indexed report it produces.
//!
//! Report nodes stay immutable; everything derived from them lives in a side-table keyed by
//! uid. Each root of the forest is processed in order by the tag merger, then the subtree
//! aggregator, then the name/type index builder.

use std::collections::HashMap;

use serde::Serialize;
use tpview_report::{
    Assertion, NodeKind, ReportNode, Status, TagMap, find_in_forest, iter_forest, path_to,
};
use tracing::debug;

use crate::{
    aggregate::{CaseCount, aggregate},
    merge::effective_tags,
    name_type::{NameTypeIndex, NameTypeKey, build_name_type_indices},
};

/// Values derived for a single report node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivedIndices {
    /// Effective tags: the node's own tags merged onto its parent's effective tags.
    pub tags: TagMap,
    /// Union of effective tags over the node's subtree.
    pub tags_index: TagMap,
    /// Name/type pairs of the node, its ancestors and its descendants.
    pub name_type_index: NameTypeIndex,
    /// Passed/failed testcases in the subtree.
    pub case_count: CaseCount,
}

impl DerivedIndices {
    /// Returns the name/type index as a sorted list.
    pub fn sorted_name_type_index(&self) -> Vec<NameTypeKey> {
        let mut keys: Vec<_> = self.name_type_index.iter().cloned().collect();
        keys.sort();
        keys
    }
}

/// A report forest together with the derived indices of every node.
///
/// Immutable once built. A new snapshot produces a new `IndexedReport`.
#[derive(Debug, Clone, Default)]
pub struct IndexedReport {
    /// Top-level nodes in document order.
    roots: Vec<ReportNode>,
    /// Derived values keyed by uid.
    derived: HashMap<String, DerivedIndices>,
}

/// Indexes a report forest.
///
/// Never fails: every well-typed tree has well-defined derived values.
pub fn index(roots: Vec<ReportNode>) -> IndexedReport {
    let total: usize = roots.iter().map(ReportNode::node_count).sum();
    let mut derived = HashMap::with_capacity(total);

    for root in &roots {
        let effective = effective_tags(root);
        let mut aggregates = aggregate(root, &effective);
        let mut name_types = build_name_type_indices(root);

        for (uid, tags) in effective {
            let agg = aggregates.remove(&uid).unwrap_or_default();
            let name_type_index = name_types.remove(&uid).unwrap_or_default();
            derived.insert(
                uid,
                DerivedIndices {
                    tags,
                    tags_index: agg.tags_index,
                    name_type_index,
                    case_count: agg.case_count,
                },
            );
        }
    }

    debug!(roots = roots.len(), nodes = derived.len(), "indexed report");
    IndexedReport { roots, derived }
}

impl IndexedReport {
    /// Top-level nodes in document order.
    pub fn roots(&self) -> &[ReportNode] {
        &self.roots
    }

    /// Derived values of the node with the given uid.
    pub fn derived(&self, uid: &str) -> Option<&DerivedIndices> {
        self.derived.get(uid)
    }

    /// Finds a node anywhere in the forest.
    pub fn find(&self, uid: &str) -> Option<&ReportNode> {
        find_in_forest(&self.roots, uid)
    }

    /// Finds a node together with its derived values.
    pub fn get(&self, uid: &str) -> Option<(&ReportNode, &DerivedIndices)> {
        Some((self.find(uid)?, self.derived(uid)?))
    }

    /// Nodes from a root down to the node with the given uid, inclusive.
    pub fn path_to(&self, uid: &str) -> Option<Vec<&ReportNode>> {
        path_to(&self.roots, uid)
    }

    /// Pre-order iterator over every node of the forest.
    pub fn iter(&self) -> impl Iterator<Item = &ReportNode> {
        iter_forest(&self.roots)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.derived.len()
    }

    /// Whether the report has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Passed/failed counts over the whole forest.
    pub fn case_count(&self) -> CaseCount {
        self.roots
            .iter()
            .filter_map(|root| self.derived(&root.uid))
            .map(|d| d.case_count)
            .sum()
    }

    /// Recomputes every derived value from the node tree.
    ///
    /// Indexing an already indexed report yields identical values.
    pub fn reindex(self) -> Self {
        index(self.roots)
    }

    /// Gives back the node tree, discarding derived values.
    pub fn into_roots(self) -> Vec<ReportNode> {
        self.roots
    }

    /// Builds the annotated, serializable view of `node` and its subtree.
    pub fn annotated(&self, node: &ReportNode) -> AnnotatedNode {
        let derived = self.derived(&node.uid).cloned().unwrap_or_default();
        AnnotatedNode {
            uid: node.uid.clone(),
            name: node.name.clone(),
            kind: node.kind,
            status: node.status,
            name_type_index: derived.sorted_name_type_index(),
            tags: derived.tags,
            tags_index: derived.tags_index,
            case_count: derived.case_count,
            entries: node.entries.iter().map(|c| self.annotated(c)).collect(),
            assertions: node.assertions.clone(),
        }
    }

    /// Builds the annotated view of the whole forest.
    pub fn to_annotated_tree(&self) -> Vec<AnnotatedNode> {
        self.roots.iter().map(|root| self.annotated(root)).collect()
    }
}

/// Serializable view of a node with its derived values attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotatedNode {
    /// Node uid.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Resolved status.
    pub status: Status,
    /// Effective tags.
    pub tags: TagMap,
    /// Union of effective tags over the subtree.
    pub tags_index: TagMap,
    /// Sorted name/type pairs.
    pub name_type_index: Vec<NameTypeKey>,
    /// Passed/failed testcases in the subtree.
    pub case_count: CaseCount,
    /// Annotated children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<AnnotatedNode>,
    /// Assertion payloads of a testcase.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<Assertion>,
}

#[cfg(test)]
mod tests {
    use tpview_report::parse_report_str;

    use super::*;

    const SAMPLE: &str = include_str!("../../../fixtures/sample_report.json");

    fn sample() -> IndexedReport {
        index(parse_report_str(SAMPLE).unwrap())
    }

    fn tags(pairs: &[(&str, &[&str])]) -> TagMap {
        pairs
            .iter()
            .map(|(name, values)| {
                (
                    (*name).to_string(),
                    values.iter().map(|v| (*v).to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn every_node_is_indexed() {
        let report = sample();
        assert_eq!(report.node_count(), 10);
        for node in report.iter() {
            assert!(report.derived(&node.uid).is_some(), "node {}", node.uid);
        }
    }

    #[test]
    fn sample_case_counts() {
        let report = sample();
        let count = |uid: &str| report.derived(uid).unwrap().case_count;
        assert_eq!(count("plan"), CaseCount::new(3, 1));
        assert_eq!(count("primary"), CaseCount::new(2, 1));
        assert_eq!(count("alpha"), CaseCount::new(1, 1));
        assert_eq!(count("alpha-1"), CaseCount::new(1, 0));
        assert_eq!(report.case_count(), CaseCount::new(3, 1));
    }

    #[test]
    fn sample_effective_tags() {
        let report = sample();
        let effective = |uid: &str| report.derived(uid).unwrap().tags.clone();
        assert_eq!(effective("alpha"), effective("primary"));
        assert_eq!(
            effective("beta"),
            tags(&[("simple", &["server", "client"])])
        );
        assert_eq!(
            effective("alpha-1"),
            tags(&[("simple", &["server"]), ("colour", &["white"])])
        );
        assert!(effective("secondary").is_empty());
    }

    #[test]
    fn sample_tags_index() {
        let report = sample();
        assert_eq!(
            report.derived("primary").unwrap().tags_index,
            tags(&[("simple", &["server", "client"]), ("colour", &["white"])])
        );
    }

    fn name_type_keys(report: &IndexedReport, uid: &str) -> Vec<String> {
        report
            .derived(uid)
            .unwrap()
            .sorted_name_type_index()
            .iter()
            .map(|key| key.as_str().to_string())
            .collect()
    }

    fn sorted(keys: &[&str]) -> Vec<String> {
        let mut keys: Vec<String> = keys.iter().map(|k| (*k).to_string()).collect();
        keys.sort();
        keys
    }

    #[test]
    fn sample_name_type_index_per_level() {
        let report = sample();

        assert_eq!(
            name_type_keys(&report, "plan"),
            sorted(&[
                "Sample Testplan|testplan",
                "Primary|multitest",
                "Secondary|multitest",
                "AlphaSuite|suite",
                "BetaSuite|suite",
                "GammaSuite|suite",
                "test_equality_passing|testcase",
                "test_equality_passing2|testcase",
            ])
        );
        assert_eq!(
            name_type_keys(&report, "primary"),
            sorted(&[
                "Sample Testplan|testplan",
                "Primary|multitest",
                "AlphaSuite|suite",
                "BetaSuite|suite",
                "test_equality_passing|testcase",
                "test_equality_passing2|testcase",
            ])
        );
        assert_eq!(
            name_type_keys(&report, "alpha"),
            sorted(&[
                "Sample Testplan|testplan",
                "Primary|multitest",
                "AlphaSuite|suite",
                "test_equality_passing|testcase",
                "test_equality_passing2|testcase",
            ])
        );
        assert_eq!(
            name_type_keys(&report, "alpha-1"),
            sorted(&[
                "Sample Testplan|testplan",
                "Primary|multitest",
                "AlphaSuite|suite",
                "test_equality_passing|testcase",
            ])
        );
        assert_eq!(
            name_type_keys(&report, "gamma-1"),
            sorted(&[
                "Sample Testplan|testplan",
                "Secondary|multitest",
                "GammaSuite|suite",
                "test_equality_passing|testcase",
            ])
        );
    }

    #[test]
    fn passed_plus_failed_counts_testcases() {
        let report = sample();
        for node in report.iter() {
            let cases = node
                .iter_preorder()
                .filter(|n| n.is_testcase() && matches!(n.status, Status::Passed | Status::Failed))
                .count();
            assert_eq!(report.derived(&node.uid).unwrap().case_count.total(), cases);
        }
    }

    #[test]
    fn reindex_is_idempotent() {
        let report = sample();
        let before = report.to_annotated_tree();
        let after = report.reindex().to_annotated_tree();
        assert_eq!(before, after);
    }

    #[test]
    fn forest_roots_are_indexed_independently() {
        let a = ReportNode::new("a", "A", NodeKind::Testplan, Status::Passed)
            .with_tag("simple", "x")
            .with_entry(ReportNode::new("a1", "t", NodeKind::Testcase, Status::Passed));
        let b = ReportNode::new("b", "B", NodeKind::Testplan, Status::Failed)
            .with_entry(ReportNode::new("b1", "t", NodeKind::Testcase, Status::Failed));
        let report = index(vec![a, b]);

        assert_eq!(report.roots().len(), 2);
        assert!(report.derived("b1").unwrap().tags.is_empty());
        assert_eq!(report.derived("a1").unwrap().tags, tags(&[("simple", &["x"])]));
        assert!(
            !report
                .derived("b")
                .unwrap()
                .name_type_index
                .contains(&NameTypeKey::new("A", NodeKind::Testplan))
        );
        assert_eq!(report.case_count(), CaseCount::new(1, 1));
    }

    #[test]
    fn empty_forest() {
        let report = index(Vec::new());
        assert!(report.is_empty());
        assert_eq!(report.node_count(), 0);
        assert_eq!(report.case_count(), CaseCount::default());
    }

    #[test]
    fn get_and_path() {
        let report = sample();
        let (node, derived) = report.get("beta-1").unwrap();
        assert_eq!(node.name, "test_equality_passing");
        assert_eq!(derived.case_count, CaseCount::new(1, 0));
        let path: Vec<_> = report
            .path_to("beta-1")
            .unwrap()
            .iter()
            .map(|n| n.uid.as_str())
            .collect();
        assert_eq!(path, ["plan", "primary", "beta", "beta-1"]);
        assert!(report.get("missing").is_none());
    }

    #[test]
    fn annotated_json_shape() {
        let report = sample();
        let tree = report.to_annotated_tree();
        let json = serde_json::to_value(&tree).unwrap();

        let primary = &json[0]["entries"][0];
        assert_eq!(primary["uid"], "primary");
        assert_eq!(primary["type"], "multitest");
        assert_eq!(primary["case_count"]["passed"], 2);
        assert_eq!(primary["case_count"]["failed"], 1);
        assert_eq!(primary["tags_index"]["simple"][1], "client");
        assert!(primary.get("assertions").is_none());

        let keys: Vec<_> = json[0]["name_type_index"]
            .as_array()
            .unwrap()
            .iter()
            .map(|k| k.as_str().unwrap().to_string())
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);

        let case = &primary["entries"][0]["entries"][0];
        assert_eq!(case["assertions"][0]["type"], "Equal");
        assert!(case.get("entries").is_none());
    }
}
