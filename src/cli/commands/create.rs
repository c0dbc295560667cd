//! Create command implementation.

use super::{CommandContext, print_json};
use crate::cli::CreateArgs;
use crate::error::Result;
use crate::format::{MutationAction, MutationOutput};
use itrack_lib::{Priority, Status};
use std::str::FromStr;

/// Execute the create command.
///
/// Fills the creation form from the arguments and submits it; fields not
/// given keep the configured defaults.
///
/// # Errors
///
/// Returns an error if a status or priority is invalid, no workspace is
/// found, or the issue cannot be stored.
pub fn execute(args: &CreateArgs, ctx: &CommandContext) -> Result<()> {
    let status = args.status.as_deref().map(Status::from_str).transpose()?;
    let priority = args
        .priority
        .as_deref()
        .map(Priority::from_str)
        .transpose()?;

    let mut app = ctx.open_app()?;
    let (form, store) = app.form();
    form.set_title(args.title.clone());
    if let Some(description) = &args.description {
        form.set_description(description.clone());
    }
    if let Some(status) = status {
        form.set_status(status);
    }
    if let Some(priority) = priority {
        form.set_priority(priority);
    }

    let issue = form.submit(store)?;

    if ctx.json {
        return print_json(&MutationOutput::new(
            MutationAction::Created,
            issue.id.clone(),
            Some(issue),
        ));
    }

    println!("Created {}: {}", issue.id, issue.title);
    Ok(())
}
