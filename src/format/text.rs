//! Text formatting functions for `itrack`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓)
//! - Column-aligned issue tables
//! - Issue detail blocks

use crate::ui::{IssueRow, format_date};
use itrack_lib::{Issue, Status};
use unicode_width::UnicodeWidthStr;

/// Length of the id prefix shown in tables.
pub const SHORT_ID_LEN: usize = 8;

/// Status icon characters.
pub mod icons {
    /// Todo - not started (hollow circle).
    pub const TODO: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Done - completed (checkmark).
    pub const DONE: &str = "✓";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Todo => icons::TODO,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Done => icons::DONE,
    }
}

/// Leading characters of an id, enough to address it by prefix.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(idx, _)| &id[..idx])
}

/// Pad `text` with spaces to `width` terminal columns.
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    let mut out = String::from(text);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {short id} [{priority}] {title}`
#[must_use]
pub fn format_issue_line(row: &IssueRow) -> String {
    format!(
        "{} {} [{}] {}",
        format_status_icon(row.status),
        short_id(&row.id),
        row.priority,
        row.title,
    )
}

/// Render rows as an aligned table with a header line.
#[must_use]
pub fn format_issue_table(rows: &[IssueRow]) -> String {
    let headers = ["ID", "CREATED", "STATUS", "PRIORITY", "TITLE"];
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                short_id(&row.id).to_string(),
                row.created.clone(),
                format!("{} {}", format_status_icon(row.status), row.status.label()),
                row.priority.label().to_string(),
                row.title.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(UnicodeWidthStr::width);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let render = |columns: [&str; 5]| {
        let last = columns.len() - 1;
        columns
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    (*cell).to_string()
                } else {
                    pad_to_width(cell, widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = render(headers);
    for line in &cells {
        out.push('\n');
        out.push_str(&render([
            line[0].as_str(),
            line[1].as_str(),
            line[2].as_str(),
            line[3].as_str(),
            line[4].as_str(),
        ]));
    }
    out
}

/// Multi-line description of one issue.
#[must_use]
pub fn format_issue_detail(issue: &Issue) -> String {
    let mut out = format!(
        "{} {}\n{}\n",
        format_status_icon(issue.status),
        issue.title,
        "-".repeat(UnicodeWidthStr::width(issue.title.as_str()).max(1) + 2)
    );
    out.push_str(&format!("ID:       {}\n", issue.id));
    out.push_str(&format!("Status:   {}\n", issue.status.label()));
    out.push_str(&format!("Priority: {}\n", issue.priority.label()));
    out.push_str(&format!("Created:  {}\n", format_date(&issue.created_at)));
    if !issue.description.is_empty() {
        out.push_str(&format!("\n{}\n", issue.description));
    }
    out
}
