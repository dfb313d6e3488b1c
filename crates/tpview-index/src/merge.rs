//! Top-down tag inheritance.
//!
//! A node's effective tags are its parent's effective tags merged with its own. For a tag name
//! present on both, the parent's values come first, followed by the node's values that the
//! parent does not already carry, in their original order.
//!
//! ```text
//! Primary       simple: [server]
//! ├── Alpha     simple: [server]   -> simple: [server]
//! └── Beta      simple: [client]   -> simple: [server, client]
//!     └── case  colour: [white]    -> simple: [server, client], colour: [white]
//! ```

use std::collections::HashMap;

use tpview_report::{ReportNode, TagMap, push_unique};

/// Effective tags of every node of one tree, keyed by uid.
pub type EffectiveTags = HashMap<String, TagMap>;

/// Merges a node's own tags onto its parent's effective tags.
///
/// Neither input is modified. Merging the same `own` tags twice yields the same result as
/// merging them once.
pub fn merge(parent: &TagMap, own: &TagMap) -> TagMap {
    let mut effective = parent.clone();
    union_into(&mut effective, own);
    effective
}

/// Appends every value of `other` that `target` does not already carry.
///
/// Tag names only present in `other` are copied, including names with no values.
pub fn union_into(target: &mut TagMap, other: &TagMap) {
    for (name, values) in other {
        let slot = target.entry(name.clone()).or_default();
        for value in values {
            push_unique(slot, value);
        }
    }
}

/// Computes effective tags for `root` and all its descendants.
///
/// The root's effective tags are its own tags. Parents are always finalized before their
/// children.
pub fn effective_tags(root: &ReportNode) -> EffectiveTags {
    let mut out = EffectiveTags::with_capacity(root.node_count());
    assign_effective(root, &TagMap::new(), &mut out);
    out
}

/// Recursively assigns effective tags, parent before children.
fn assign_effective(node: &ReportNode, parent: &TagMap, out: &mut EffectiveTags) {
    let effective = merge(parent, &node.tags);
    for child in &node.entries {
        assign_effective(child, &effective, out);
    }
    out.insert(node.uid.clone(), effective);
}

#[cfg(test)]
mod tests {
    use tpview_report::{NodeKind, Status};

    use super::*;

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
    fn identical_tags_do_not_duplicate() {
        let parent = tags(&[("simple", &["server"])]);
        let own = tags(&[("simple", &["server"])]);
        assert_eq!(merge(&parent, &own), parent);
    }

    #[test]
    fn same_name_extends_parent_values() {
        let parent = tags(&[("simple", &["server"])]);
        let own = tags(&[("simple", &["client"])]);
        assert_eq!(
            merge(&parent, &own),
            tags(&[("simple", &["server", "client"])])
        );
    }

    #[test]
    fn parent_values_come_first() {
        let parent = tags(&[("simple", &["b", "a"])]);
        let own = tags(&[("simple", &["c", "a", "d"])]);
        assert_eq!(merge(&parent, &own)["simple"], vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn different_names_both_appear() {
        let parent = tags(&[("simple", &["server"])]);
        let own = tags(&[("colour", &["white"])]);
        assert_eq!(
            merge(&parent, &own),
            tags(&[("simple", &["server"]), ("colour", &["white"])])
        );
    }

    #[test]
    fn empty_inputs() {
        let empty = TagMap::new();
        let own = tags(&[("colour", &["white"])]);
        assert_eq!(merge(&empty, &own), own);
        assert_eq!(merge(&own, &empty), own);
        assert!(merge(&empty, &empty).is_empty());
    }

    #[test]
    fn merge_is_idempotent() {
        let parent = tags(&[("simple", &["server"]), ("speed", &["slow"])]);
        let own = tags(&[("simple", &["client", "server"]), ("colour", &["red"])]);
        let once = merge(&parent, &own);
        let twice = merge(&once, &own);
        assert_eq!(once, twice);
    }

    #[test]
    fn inputs_are_not_modified() {
        let parent = tags(&[("simple", &["server"])]);
        let own = tags(&[("simple", &["client"])]);
        let _merged = merge(&parent, &own);
        assert_eq!(parent, tags(&[("simple", &["server"])]));
        assert_eq!(own, tags(&[("simple", &["client"])]));
    }

    #[test]
    fn effective_tags_propagate_down_the_tree() {
        let root = ReportNode::new("plan", "Plan", NodeKind::Testplan, Status::Passed).with_entry(
            ReportNode::new("mt", "MT", NodeKind::Multitest, Status::Passed)
                .with_tag("simple", "server")
                .with_entry(
                    ReportNode::new("suite", "Suite", NodeKind::Suite, Status::Passed)
                        .with_tag("simple", "client")
                        .with_entry(
                            ReportNode::new("case", "case", NodeKind::Testcase, Status::Passed)
                                .with_tag("colour", "white"),
                        ),
                ),
        );

        let effective = effective_tags(&root);
        assert_eq!(effective.len(), 4);
        assert!(effective["plan"].is_empty());
        assert_eq!(effective["mt"], tags(&[("simple", &["server"])]));
        assert_eq!(
            effective["suite"],
            tags(&[("simple", &["server", "client"])])
        );
        assert_eq!(
            effective["case"],
            tags(&[("simple", &["server", "client"]), ("colour", &["white"])])
        );
    }
}
