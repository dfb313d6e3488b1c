//! Stateful navigation over a fixed report snapshot.

use tpview_report::ReportNode;
use tracing::{debug, trace};

use crate::selection::{Selected, Selection, auto_select, resolve_selection};

/// Holds a navigation path over one report forest.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    /// The forest being navigated.
    roots: &'a [ReportNode],
    /// Current path, root first.
    selected: Vec<Selected>,
}

impl<'a> Navigator<'a> {
    /// Starts with nothing selected.
    pub fn new(roots: &'a [ReportNode]) -> Self {
        Self::with_selection(roots, Vec::new())
    }

    /// Starts from an existing path, typically carried over from a previous snapshot.
    pub fn with_selection(roots: &'a [ReportNode], selected: Vec<Selected>) -> Self {
        Self { roots, selected }
    }

    /// The current path.
    pub fn selected(&self) -> &[Selected] {
        &self.selected
    }

    /// Resolves the current path.
    pub fn selection(&self) -> Selection<'a> {
        resolve_selection(self.roots, &self.selected)
    }

    /// Chooses `node` at `depth`, dropping everything below it.
    pub fn select(&mut self, depth: usize, node: &ReportNode) {
        self.selected.truncate(depth);
        self.selected.push(Selected::of(node));
    }

    /// Chooses the child with `uid` among the current children.
    ///
    /// Returns `false` and leaves the path untouched if no such child exists.
    pub fn follow(&mut self, uid: &str) -> bool {
        let selection = self.selection();
        let Some(node) = selection.current_children.iter().find(|n| n.uid == uid) else {
            return false;
        };
        self.select(selection.depth(), node);
        true
    }

    /// Goes up one level. Returns `false` at the top.
    pub fn back(&mut self) -> bool {
        self.selected.pop().is_some()
    }

    /// Applies the auto-select rule until it settles.
    ///
    /// Stops when the rule makes no change, when it would produce a path already seen during
    /// this call, or after one step per level of the deepest tree. Returns the number of steps
    /// applied.
    pub fn reconcile(&mut self) -> usize {
        let limit = self
            .roots
            .iter()
            .map(ReportNode::depth)
            .max()
            .unwrap_or(0)
            + 1;
        let mut seen = vec![self.selected.clone()];
        let mut steps = 0;

        while steps < limit {
            let selection = self.selection();
            let Some(next) = auto_select(&self.selected, &selection) else {
                break;
            };
            if seen.contains(&next) {
                debug!(steps, "auto-select would revisit a selection");
                break;
            }
            trace!(depth = next.len(), "auto-select step");
            seen.push(next.clone());
            self.selected = next;
            steps += 1;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use tpview_report::{NodeKind, Status, parse_report_str};

    use super::*;

    const SAMPLE: &str = include_str!("../../../fixtures/sample_report.json");

    fn sample() -> Vec<ReportNode> {
        parse_report_str(SAMPLE).unwrap()
    }

    fn uids(nav: &Navigator<'_>) -> Vec<String> {
        nav.selected().iter().map(|s| s.uid.clone()).collect()
    }

    #[test]
    fn select_truncates_deeper_levels() {
        let roots = sample();
        let mut nav = Navigator::new(&roots);
        assert!(nav.follow("plan"));
        assert!(nav.follow("primary"));
        assert!(nav.follow("alpha"));

        let beta = tpview_report::find_in_forest(&roots, "beta").unwrap();
        nav.select(2, beta);
        assert_eq!(uids(&nav), ["plan", "primary", "beta"]);
    }

    #[test]
    fn follow_unknown_child_is_rejected() {
        let roots = sample();
        let mut nav = Navigator::new(&roots);
        assert!(!nav.follow("primary"));
        assert!(nav.selected().is_empty());
    }

    #[test]
    fn reconcile_descends_single_child_chains() {
        let roots = sample();
        let mut nav = Navigator::new(&roots);
        assert_eq!(nav.reconcile(), 1);
        assert_eq!(uids(&nav), ["plan"]);

        nav.follow("secondary");
        assert_eq!(nav.reconcile(), 2);
        assert_eq!(uids(&nav), ["plan", "secondary", "gamma", "gamma-1"]);
        let selection = nav.selection();
        assert_eq!(selection.current().unwrap().kind, NodeKind::Testcase);
    }

    #[test]
    fn reconcile_stops_at_testcase() {
        let roots = sample();
        let mut nav = Navigator::new(&roots);
        for uid in ["plan", "primary", "alpha", "alpha-1"] {
            assert!(nav.follow(uid));
        }
        assert_eq!(nav.reconcile(), 0);
        assert_eq!(uids(&nav), ["plan", "primary", "alpha", "alpha-1"]);
    }

    #[test]
    fn reconcile_recovers_stale_selection() {
        let roots = sample();
        let selected = vec![
            Selected::new("plan", NodeKind::Testplan),
            Selected::new("primary", NodeKind::Multitest),
            Selected::new("removed", NodeKind::Suite),
        ];
        let mut nav = Navigator::with_selection(&roots, selected);
        assert_eq!(nav.reconcile(), 0);
        assert_eq!(nav.selection().depth(), 2);
    }

    #[test]
    fn reconcile_is_bounded() {
        // A chain of single children ten levels deep.
        let mut node = ReportNode::new("leaf", "leaf", NodeKind::Testcase, Status::Passed);
        for level in (0..10).rev() {
            node = ReportNode::new(
                format!("s{level}"),
                format!("S{level}"),
                NodeKind::Suite,
                Status::Passed,
            )
            .with_entry(node);
        }
        let roots = vec![node];
        let mut nav = Navigator::new(&roots);
        assert_eq!(nav.reconcile(), 11);
        assert_eq!(nav.selection().current().unwrap().uid, "leaf");
    }

    #[test]
    fn back_pops_one_level() {
        let roots = sample();
        let mut nav = Navigator::new(&roots);
        nav.follow("plan");
        assert!(nav.back());
        assert!(!nav.back());
    }
}
