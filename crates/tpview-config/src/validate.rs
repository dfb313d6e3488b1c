//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A default filter tag has an empty name.
    EmptyTagName,
    /// A default filter tag has an empty value.
    EmptyTagValue {
        /// Name of the tag.
        tag: String,
    },
    /// A default filter tag lists no values and never matches anything.
    TagWithoutValues {
        /// Name of the tag.
        tag: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTagName => write!(f, "filter tag with an empty name"),
            Self::EmptyTagValue { tag } => {
                write!(f, "filter tag '{tag}' has an empty value")
            }
            Self::TagWithoutValues { tag } => {
                write!(f, "filter tag '{tag}' has no values and is ignored")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    for (name, values) in &config.filter.tags {
        if name.trim().is_empty() {
            warnings.push(ConfigWarning::EmptyTagName);
            continue;
        }
        if values.is_empty() {
            warnings.push(ConfigWarning::TagWithoutValues { tag: name.clone() });
        } else if values.iter().any(|v| v.trim().is_empty()) {
            warnings.push(ConfigWarning::EmptyTagValue { tag: name.clone() });
        }
    }

    warnings
}
