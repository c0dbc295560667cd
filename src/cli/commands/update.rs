//! Update command implementation.

use super::{CommandContext, print_json};
use crate::cli::UpdateArgs;
use crate::error::{ItrackError, Result};
use crate::format::{MutationAction, MutationOutput};
use crate::ui::{ActionOutcome, ListAction};
use itrack_lib::{IssueUpdate, Priority, Status};
use std::str::FromStr;

/// Execute the update command.
///
/// The id must match exactly. An id that matches no issue leaves everything
/// unchanged and is reported, not treated as a failure.
///
/// # Errors
///
/// Returns an error if neither field is given, a value is invalid or the
/// change cannot be stored.
pub fn execute(args: &UpdateArgs, ctx: &CommandContext) -> Result<()> {
    let update = IssueUpdate {
        status: args.status.as_deref().map(Status::from_str).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(Priority::from_str)
            .transpose()?,
    };
    if update.is_empty() {
        return Err(ItrackError::validation(
            "update",
            "nothing to change: pass --status and/or --priority",
        ));
    }

    let mut app = ctx.open_app()?;
    let id = args.id.clone();
    let action = build_action(id.clone(), update);
    let outcome = app.list_view().dispatch(action, app.store_mut())?;

    match outcome {
        ActionOutcome::Applied(issue) => {
            if ctx.json {
                return print_json(&MutationOutput::new(
                    MutationAction::Updated,
                    id,
                    Some(issue),
                ));
            }
            println!(
                "Updated {}: {} [{}] [{}]",
                issue.id, issue.title, issue.status, issue.priority
            );
        }
        ActionOutcome::Removed(_) | ActionOutcome::NoMatch => {
            if ctx.json {
                return print_json(&MutationOutput::new(MutationAction::Unchanged, id, None));
            }
            println!("No issue matches '{id}'; nothing changed.");
        }
    }

    Ok(())
}

/// Pick the narrowest list action for the requested change.
fn build_action(id: String, update: IssueUpdate) -> ListAction {
    match (update.status, update.priority) {
        (Some(status), None) => ListAction::SetStatus { id, status },
        (None, Some(priority)) => ListAction::SetPriority { id, priority },
        _ => ListAction::Update { id, update },
    }
}
