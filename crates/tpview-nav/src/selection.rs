//! Selection resolution and the auto-select rule.

use serde::{Deserialize, Serialize};
use tpview_report::{NodeKind, ReportNode};
use tracing::warn;

/// One level of a navigation path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selected {
    /// Uid of the chosen node.
    pub uid: String,
    /// Kind of the chosen node at the time it was chosen.
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

impl Selected {
    /// Creates a selection level.
    pub fn new(uid: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            uid: uid.into(),
            kind,
        }
    }

    /// Selection level pointing at `node`.
    pub fn of(node: &ReportNode) -> Self {
        Self::new(node.uid.clone(), node.kind)
    }
}

/// Result of following a navigation path through a forest.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Nodes resolved along the path, root first.
    pub breadcrumbs: Vec<&'a ReportNode>,
    /// Entries of the last resolved node, or the roots when nothing resolved.
    pub current_children: &'a [ReportNode],
}

impl<'a> Selection<'a> {
    /// The last resolved node, if any.
    pub fn current(&self) -> Option<&'a ReportNode> {
        self.breadcrumbs.last().copied()
    }

    /// Depth at which the current children would be selected.
    pub fn depth(&self) -> usize {
        self.breadcrumbs.len()
    }
}

/// Follows `selected` from the roots.
///
/// Resolution stops at the first uid missing from the children at that level; the remainder
/// of the path is ignored.
pub fn resolve_selection<'a>(roots: &'a [ReportNode], selected: &[Selected]) -> Selection<'a> {
    let mut breadcrumbs = Vec::with_capacity(selected.len());
    let mut current_children = roots;

    for (depth, level) in selected.iter().enumerate() {
        let Some(node) = current_children.iter().find(|n| n.uid == level.uid) else {
            warn!(uid = %level.uid, depth, "stale selection truncated");
            break;
        };
        breadcrumbs.push(node);
        current_children = &node.entries;
    }

    Selection {
        breadcrumbs,
        current_children,
    }
}

/// Applies the auto-select rule once.
///
/// Returns the new path, or `None` when nothing changes:
/// - no children and more than one level selected: cut the path back to what resolved
/// - exactly one child and the last level is not a testcase: descend into that child
pub fn auto_select(selected: &[Selected], selection: &Selection<'_>) -> Option<Vec<Selected>> {
    let resolved = selection.breadcrumbs.len().min(selected.len());
    let last_kind = selected.last().map(|s| s.kind);

    match selection.current_children {
        [] if selected.len() > 1 => {
            (resolved < selected.len()).then(|| selected[..resolved].to_vec())
        }
        [only] if last_kind != Some(NodeKind::Testcase) => {
            let mut next = selected[..resolved].to_vec();
            next.push(Selected::of(only));
            Some(next)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use tpview_report::{Status, parse_report_str};

    use super::*;

    const SAMPLE: &str = include_str!("../../../fixtures/sample_report.json");

    fn sample() -> Vec<ReportNode> {
        parse_report_str(SAMPLE).unwrap()
    }

    fn path(roots: &[ReportNode], uids: &[&str]) -> Vec<Selected> {
        uids.iter()
            .map(|uid| {
                let node = tpview_report::find_in_forest(roots, uid).unwrap();
                Selected::of(node)
            })
            .collect()
    }

    fn crumbs<'a>(selection: &Selection<'a>) -> Vec<&'a str> {
        selection
            .breadcrumbs
            .iter()
            .map(|n| n.uid.as_str())
            .collect()
    }

    fn children<'a>(selection: &Selection<'a>) -> Vec<&'a str> {
        selection
            .current_children
            .iter()
            .map(|n| n.uid.as_str())
            .collect()
    }

    #[test]
    fn empty_path_lists_roots() {
        let roots = sample();
        let selection = resolve_selection(&roots, &[]);
        assert!(selection.breadcrumbs.is_empty());
        assert_eq!(children(&selection), ["plan"]);
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn full_path_resolves() {
        let roots = sample();
        let selected = path(&roots, &["plan", "primary"]);
        let selection = resolve_selection(&roots, &selected);
        assert_eq!(crumbs(&selection), ["plan", "primary"]);
        assert_eq!(children(&selection), ["alpha", "beta"]);
        assert_eq!(selection.depth(), 2);
    }

    #[test]
    fn stale_uid_truncates() {
        let roots = sample();
        let mut selected = path(&roots, &["plan", "primary"]);
        selected.push(Selected::new("gone", NodeKind::Suite));
        selected.push(Selected::new("alpha-1", NodeKind::Testcase));
        let selection = resolve_selection(&roots, &selected);
        assert_eq!(crumbs(&selection), ["plan", "primary"]);
        assert_eq!(children(&selection), ["alpha", "beta"]);
    }

    #[test]
    fn uid_must_be_a_child_of_previous_level() {
        let roots = sample();
        let selected = path(&roots, &["plan", "alpha"]);
        let selection = resolve_selection(&roots, &selected);
        assert_eq!(crumbs(&selection), ["plan"]);
    }

    #[test]
    fn testcase_has_no_children() {
        let roots = sample();
        let selected = path(&roots, &["plan", "primary", "alpha", "alpha-1"]);
        let selection = resolve_selection(&roots, &selected);
        assert_eq!(crumbs(&selection).len(), 4);
        assert!(selection.current_children.is_empty());
        assert_eq!(auto_select(&selected, &selection), None);
    }

    #[test]
    fn single_root_is_auto_selected() {
        let roots = sample();
        let selection = resolve_selection(&roots, &[]);
        let next = auto_select(&[], &selection).unwrap();
        assert_eq!(next, path(&roots, &["plan"]));
    }

    #[test]
    fn single_child_advances() {
        let roots = sample();
        let selected = path(&roots, &["plan", "secondary"]);
        let selection = resolve_selection(&roots, &selected);
        let next = auto_select(&selected, &selection).unwrap();
        assert_eq!(next, path(&roots, &["plan", "secondary", "gamma"]));
    }

    #[test]
    fn branching_level_does_nothing() {
        let roots = sample();
        let selected = path(&roots, &["plan"]);
        let selection = resolve_selection(&roots, &selected);
        assert_eq!(auto_select(&selected, &selection), None);
    }

    #[test]
    fn empty_children_retreat_to_breadcrumbs() {
        let empty_suite = ReportNode::new("s", "Empty", NodeKind::Suite, Status::Passed);
        let roots = vec![
            ReportNode::new("plan", "Plan", NodeKind::Testplan, Status::Passed)
                .with_entry(
                    ReportNode::new("mt", "MT", NodeKind::Multitest, Status::Passed)
                        .with_entry(empty_suite)
                        .with_entry(ReportNode::new(
                            "s2",
                            "Other",
                            NodeKind::Suite,
                            Status::Passed,
                        )),
                ),
        ];
        // The stale third level resolves to nothing below "s".
        let selected = vec![
            Selected::new("plan", NodeKind::Testplan),
            Selected::new("mt", NodeKind::Multitest),
            Selected::new("s", NodeKind::Suite),
            Selected::new("gone", NodeKind::Testcase),
        ];
        let selection = resolve_selection(&roots, &selected);
        assert!(selection.current_children.is_empty());
        let next = auto_select(&selected, &selection).unwrap();
        assert_eq!(next, selected[..3]);
    }

    #[test]
    fn advance_replaces_stale_tail() {
        let roots = sample();
        let selected = vec![
            Selected::new("plan", NodeKind::Testplan),
            Selected::new("secondary", NodeKind::Multitest),
            Selected::new("gone", NodeKind::Suite),
        ];
        let selection = resolve_selection(&roots, &selected);
        let next = auto_select(&selected, &selection).unwrap();
        assert_eq!(next, path(&roots, &["plan", "secondary", "gamma"]));
    }

    #[test]
    fn selected_serializes_with_type_field() {
        let level = Selected::new("alpha", NodeKind::Suite);
        let json = serde_json::to_value(&level).unwrap();
        assert_eq!(json["uid"], "alpha");
        assert_eq!(json["type"], "suite");
    }
}
