//! Tag mappings attached to report nodes.
//!
//! Tags are free-form labels: each tag name maps to an ordered list of values. Value order is
//! first-seen order and a value never appears twice under the same name. Tag names are kept in
//! sorted order so that every rendering of a tag map is deterministic.

use std::collections::BTreeMap;

/// Ordered, duplicate-free values of a single tag name.
pub type TagValues = Vec<String>;

/// Mapping from tag name to its values.
pub type TagMap = BTreeMap<String, TagValues>;

/// Appends `value` to `values` unless it is already present.
///
/// Returns `true` if the value was added.
pub fn push_unique(values: &mut TagValues, value: &str) -> bool {
    if values.iter().any(|v| v == value) {
        return false;
    }
    values.push(value.to_string());
    true
}

/// Returns true if `tags` carries `value` under `name`.
pub fn has_tag(tags: &TagMap, name: &str, value: &str) -> bool {
    tags.get(name)
        .is_some_and(|values| values.iter().any(|v| v == value))
}

/// Formats a tag map as `name=v1,v2 name2=v3`, the same shape the CLI accepts for filters.
pub fn format_tags(tags: &TagMap) -> String {
    tags.iter()
        .map(|(name, values)| format!("{name}={}", values.join(",")))
        .collect::<Vec<_>>()
        .join(" ")
}
