//! Breadcrumb navigation over test report trees for tpview.
//!
//! A navigation path is a list of [`Selected`] levels starting at a root. Resolving a path
//! yields the breadcrumb trail and the children selectable at the current depth. Paths that
//! outlive the snapshot they were made for are truncated at the first missing uid.
//!
//! After each resolution the caller may apply [`auto_select`] to skip levels that offer no
//! choice, or let a [`Navigator`] do it with a bounded [`Navigator::reconcile`].

#![warn(missing_docs)]

mod navigator;
mod selection;

pub use navigator::Navigator;
pub use selection::{Selected, Selection, auto_select, resolve_selection};
