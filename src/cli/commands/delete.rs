//! Delete command implementation.

use super::{CommandContext, print_json};
use crate::cli::DeleteArgs;
use crate::error::Result;
use crate::format::{MutationAction, MutationOutput};
use crate::ui::{ActionOutcome, ListAction};

/// Execute the delete command.
///
/// The id must match exactly; an id that matches nothing is reported and
/// succeeds, so repeating a delete never touches another issue.
///
/// # Errors
///
/// Returns an error if the change cannot be stored.
pub fn execute(args: &DeleteArgs, ctx: &CommandContext) -> Result<()> {
    let mut app = ctx.open_app()?;
    let id = args.id.clone();
    let outcome = app
        .list_view()
        .dispatch(ListAction::Delete { id: id.clone() }, app.store_mut())?;

    match outcome {
        ActionOutcome::Removed(issue) => {
            if ctx.json {
                return print_json(&MutationOutput::new(
                    MutationAction::Deleted,
                    id,
                    Some(issue),
                ));
            }
            println!("Deleted {}: {}", issue.id, issue.title);
        }
        ActionOutcome::Applied(_) | ActionOutcome::NoMatch => {
            if ctx.json {
                return print_json(&MutationOutput::new(MutationAction::Unchanged, id, None));
            }
            println!("No issue matches '{id}'; nothing changed.");
        }
    }

    Ok(())
}
