//! Error types for report parsing.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur when loading a report snapshot.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Failed to read a report file.
    #[error("failed to read report {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document is not valid JSON, or not shaped like a report.
    #[error("failed to parse report: {0}")]
    Json(#[from] serde_json::Error),

    /// A node is missing its `uid`.
    #[error("report node without uid (parent: {})", .parent.as_deref().unwrap_or("<top level>"))]
    MissingUid {
        /// Uid of the parent node, `None` for top-level entries.
        parent: Option<String>,
    },

    /// A node violates the report schema.
    #[error("malformed report node {uid}: {reason}")]
    MalformedNode {
        /// Uid of the offending node.
        uid: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Two nodes in the same snapshot share a uid.
    #[error("duplicate uid in report: {uid}")]
    DuplicateUid {
        /// The repeated uid.
        uid: String,
    },
}

impl ReportError {
    /// Creates a `MalformedNode` error.
    pub(crate) fn malformed(uid: &str, reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            uid: uid.to_string(),
            reason: reason.into(),
        }
    }
}
