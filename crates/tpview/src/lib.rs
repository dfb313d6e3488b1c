//! tpview: a terminal browser for hierarchical test reports
//!
//! A report is a forest of testplans, multitests, suites and testcases, each carrying a
//! status and an optional set of tags. tpview derives effective tags, subtree tag indexes,
//! pass/fail counts and name indexes for every entry, and exposes them through commands
//! for listing one navigation level at a time, filtering by tag, searching by name and
//! exporting the annotated tree as JSON.
//!
//! The logic lives in the `tpview-report`, `tpview-index`, `tpview-nav`, `tpview-config`
//! and `tpview-style` crates; this crate only hosts the binary.

#![warn(missing_docs)]
