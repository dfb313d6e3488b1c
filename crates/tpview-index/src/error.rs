//! Error types for the tpview-index crate.

use thiserror::Error;

/// Errors that can occur when building a tag filter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    /// A tag filter item could not be parsed.
    #[error("invalid tag filter '{item}': {reason}")]
    InvalidTag {
        /// The offending item as given.
        item: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A match mode other than `any` or `all`.
    #[error("unknown tag match mode '{0}' (expected 'any' or 'all')")]
    UnknownMode(String),
}

impl FilterError {
    /// Creates an `InvalidTag` error.
    pub(crate) fn invalid(item: &str, reason: &'static str) -> Self {
        Self::InvalidTag {
            item: item.to_string(),
            reason,
        }
    }
}
