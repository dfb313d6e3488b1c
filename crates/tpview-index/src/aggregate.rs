//! Bottom-up subtree aggregation.
//!
//! For every node this computes the union of effective tags over its whole subtree (the tag
//! index) and the number of passed and failed testcases below it (the case count).
//!
//! # Algorithm
//!
//! 1. Recurse into children first
//! 2. Start the node's tag index from its own effective tags
//! 3. Append each child's tag index in child order, skipping values already present
//! 4. Sum the children's case counts; testcases count themselves instead
//!
//! The resulting value order per tag name is first-seen order over a pre-order traversal.

use std::{
    collections::HashMap,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};
use tpview_report::{ReportNode, Status, TagMap};

use crate::merge::{EffectiveTags, union_into};

/// Passed and failed testcase counts of a subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseCount {
    /// Number of passed testcases.
    pub passed: usize,
    /// Number of failed testcases.
    pub failed: usize,
}

impl CaseCount {
    /// Creates a count.
    pub fn new(passed: usize, failed: usize) -> Self {
        Self { passed, failed }
    }

    /// The contribution of a single node, ignoring its children.
    ///
    /// Only testcases count, and only when passed or failed.
    pub fn of(node: &ReportNode) -> Self {
        if !node.is_testcase() {
            return Self::default();
        }
        match node.status {
            Status::Passed => Self::new(1, 0),
            Status::Failed => Self::new(0, 1),
            _ => Self::default(),
        }
    }

    /// Total of passed and failed.
    pub fn total(self) -> usize {
        self.passed + self.failed
    }
}

impl Add for CaseCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.passed + rhs.passed, self.failed + rhs.failed)
    }
}

impl AddAssign for CaseCount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for CaseCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Subtree-wide values of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtreeAggregate {
    /// Union of effective tags over the node and all its descendants.
    pub tags_index: TagMap,
    /// Passed/failed testcases in the subtree, the node included.
    pub case_count: CaseCount,
}

/// Aggregates of every node of one tree, keyed by uid.
pub type SubtreeAggregates = HashMap<String, SubtreeAggregate>;

/// Computes the tag index and case count for `root` and every node below it.
///
/// `effective` must hold the effective tags of every node of the tree; a node missing from it
/// contributes no tags of its own.
pub fn aggregate(root: &ReportNode, effective: &EffectiveTags) -> SubtreeAggregates {
    let mut out = SubtreeAggregates::with_capacity(root.node_count());
    aggregate_node(root, effective, &mut out);
    out
}

/// Aggregates one node after all of its children.
fn aggregate_node(node: &ReportNode, effective: &EffectiveTags, out: &mut SubtreeAggregates) {
    let mut tags_index = effective.get(&node.uid).cloned().unwrap_or_default();
    let mut case_count = CaseCount::of(node);

    for child in &node.entries {
        aggregate_node(child, effective, out);
        if let Some(child_agg) = out.get(&child.uid) {
            union_into(&mut tags_index, &child_agg.tags_index);
            case_count += child_agg.case_count;
        }
    }

    out.insert(
        node.uid.clone(),
        SubtreeAggregate {
            tags_index,
            case_count,
        },
    );
}
