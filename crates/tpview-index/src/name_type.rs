//! Ancestor and descendant name/type index.
//!
//! Each node records the set of `(name, type)` pairs of itself, all of its ancestors and all
//! of its descendants. The index answers "does anything named X of kind Y exist above or below
//! this node" and drives search pruning and automatic navigation. It records existence only:
//! identical pairs at unrelated places in the tree collapse to one member.
//!
//! # Algorithm
//!
//! 1. Bottom-up: collect the pair set of every subtree once
//! 2. Top-down: carry the chain of ancestor pairs
//! 3. Each node's index is its subtree set plus the ancestor chain

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use serde::{Deserialize, Serialize};
use tpview_report::{NodeKind, ReportNode};

/// Separator between name and type in a [`NameTypeKey`].
pub const KEY_SEPARATOR: char = '|';

/// A `(name, type)` pair encoded as a single `"name|type"` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NameTypeKey(String);

impl NameTypeKey {
    /// Builds the key of a name and kind.
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self(format!("{name}{KEY_SEPARATOR}{kind}"))
    }

    /// Builds the key of a node.
    pub fn of(node: &ReportNode) -> Self {
        Self::new(&node.name, node.kind)
    }

    /// Returns the encoded `"name|type"` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name half of the key.
    ///
    /// Names may themselves contain the separator; types never do.
    pub fn name(&self) -> &str {
        self.0
            .rsplit_once(KEY_SEPARATOR)
            .map_or(self.0.as_str(), |(name, _)| name)
    }

    /// Returns the kind half of the key.
    pub fn kind(&self) -> Option<NodeKind> {
        self.0
            .rsplit_once(KEY_SEPARATOR)
            .and_then(|(_, kind)| kind.parse().ok())
    }
}

impl fmt::Display for NameTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of name/type keys.
pub type NameTypeIndex = HashSet<NameTypeKey>;

/// Name/type indices of every node of one tree, keyed by uid.
pub type NameTypeIndices = HashMap<String, NameTypeIndex>;

/// Builds the name/type index of a single node from scratch.
///
/// `ancestors` is the chain from the root down to the node's parent. This walks the node's
/// whole subtree; use [`build_name_type_indices`] to index every node of a tree.
pub fn build_name_type_index(node: &ReportNode, ancestors: &[&ReportNode]) -> NameTypeIndex {
    ancestors
        .iter()
        .copied()
        .chain(node.iter_preorder())
        .map(NameTypeKey::of)
        .collect()
}

/// Builds the name/type index of every node of the tree rooted at `root`.
pub fn build_name_type_indices(root: &ReportNode) -> NameTypeIndices {
    let mut subtree_sets = NameTypeIndices::with_capacity(root.node_count());
    collect_subtree_keys(root, &mut subtree_sets);

    let mut out = NameTypeIndices::with_capacity(subtree_sets.len());
    let mut ancestors = Vec::new();
    assign_indices(root, &mut ancestors, &mut subtree_sets, &mut out);
    out
}

/// Collects the pair set of each subtree, children before parents.
fn collect_subtree_keys(node: &ReportNode, out: &mut NameTypeIndices) {
    let mut keys = NameTypeIndex::from([NameTypeKey::of(node)]);
    for child in &node.entries {
        collect_subtree_keys(child, out);
        if let Some(child_keys) = out.get(&child.uid) {
            keys.extend(child_keys.iter().cloned());
        }
    }
    out.insert(node.uid.clone(), keys);
}

/// Combines each subtree set with the ancestor chain, parents before children.
///
/// Subtree sets are moved out of `subtree_sets` as they are consumed.
fn assign_indices(
    node: &ReportNode,
    ancestors: &mut Vec<NameTypeKey>,
    subtree_sets: &mut NameTypeIndices,
    out: &mut NameTypeIndices,
) {
    let mut index = subtree_sets.remove(&node.uid).unwrap_or_default();
    index.extend(ancestors.iter().cloned());
    out.insert(node.uid.clone(), index);

    ancestors.push(NameTypeKey::of(node));
    for child in &node.entries {
        assign_indices(child, ancestors, subtree_sets, out);
    }
    ancestors.pop();
}
