//! Interactive pieces of the tracker: the creation form and the list view.

pub mod form;
pub mod list;

pub use form::{FormDefaults, IssueForm};
pub use list::{ActionOutcome, IssueListView, IssueRow, ListAction, format_date};
