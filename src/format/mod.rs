//! Output formatting for `itrack`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! JSON mode prints issue records in their stored layout.

mod output;
mod text;

pub use output::{MutationAction, MutationOutput};
pub use text::{
    format_issue_detail, format_issue_line, format_issue_table, format_status_icon, pad_to_width,
    short_id,
};
