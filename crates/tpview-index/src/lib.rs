//! Derived indices over test report trees for tpview.
//!
//! This crate computes everything the viewer derives from a parsed report:
//! - Effective tags, inherited top-down from ancestors
//! - Tags index and passed/failed case counts, aggregated bottom-up
//! - Name/type index of ancestors and descendants
//! - Tag filtering and name search over the indexed forest
//!
//! # Example
//!
//! ```no_run
//! use tpview_index::{MatchMode, TagFilter, filter_report, index};
//! use tpview_report::load_report;
//!
//! let roots = load_report("report.json".as_ref()).unwrap();
//! let report = index(roots);
//! let filter = TagFilter::parse(&["simple=server"], MatchMode::Any).unwrap();
//! let servers = filter_report(&report, &filter);
//! println!("{} nodes tagged server", servers.node_count());
//! ```

#![warn(missing_docs)]

mod aggregate;
mod error;
mod filter;
mod merge;
mod name_type;
mod pipeline;
mod search;

pub use aggregate::{CaseCount, SubtreeAggregate, SubtreeAggregates, aggregate};
pub use error::FilterError;
pub use filter::{DEFAULT_TAG_NAME, MatchMode, TagFilter, filter_report};
pub use merge::{EffectiveTags, effective_tags, merge, union_into};
pub use name_type::{
    KEY_SEPARATOR, NameTypeIndex, NameTypeIndices, NameTypeKey, build_name_type_index,
    build_name_type_indices,
};
pub use pipeline::{AnnotatedNode, DerivedIndices, IndexedReport, index};
pub use search::{SearchHit, SearchQuery, search};
