//! List command implementation.

use super::{CommandContext, print_json};
use crate::error::Result;
use crate::format::format_issue_table;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if no workspace is found or JSON output fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let app = ctx.open_app()?;
    let issues = app.store().list();

    if ctx.json {
        return print_json(issues);
    }

    let rows = app.list_view().rows(issues);
    if rows.is_empty() {
        println!("No issues.");
    } else {
        println!("{}", format_issue_table(&rows));
        println!("\n{} issue(s)", rows.len());
    }

    Ok(())
}
