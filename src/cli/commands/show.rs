//! Show command implementation.

use super::{CommandContext, print_json};
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::format::format_issue_detail;
use itrack_lib::TrackerError;

/// Execute the show command.
///
/// # Errors
///
/// Returns `IssueNotFound` / `AmbiguousId` if the id does not identify
/// exactly one issue.
pub fn execute(args: &ShowArgs, ctx: &CommandContext) -> Result<()> {
    let app = ctx.open_app()?;
    let store = app.store();
    let id = store.resolve_id(&args.id)?;
    let issue = store
        .get(&id)
        .ok_or_else(|| TrackerError::IssueNotFound { id: id.clone() })?;

    if ctx.json {
        return print_json(issue);
    }

    print!("{}", format_issue_detail(issue));
    Ok(())
}
