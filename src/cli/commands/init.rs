//! Init command implementation.

use super::{CommandContext, print_json};
use crate::cli::InitArgs;
use crate::config::{self, CONFIG_FILE_NAME, CONFIG_TEMPLATE, WORKSPACE_DIR_NAME};
use crate::error::{ItrackError, Result};
use itrack_lib::persist::seed_issues;
use itrack_lib::{FileSlot, IssuePersistence};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(Serialize)]
struct InitOutput {
    workspace: PathBuf,
    storage_key: String,
    issues: usize,
    wrote_issues: bool,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if a workspace exists and `--force` was not
/// given, or an error if files cannot be written.
pub fn execute(args: &InitArgs, ctx: &CommandContext) -> Result<()> {
    let target = match &ctx.dir {
        Some(dir) => dir.clone(),
        None => env::current_dir()?.join(WORKSPACE_DIR_NAME),
    };

    let config_path = target.join(CONFIG_FILE_NAME);
    if config_path.exists() && !args.force {
        return Err(ItrackError::AlreadyInitialized { path: target });
    }

    fs::create_dir_all(&target)?;
    let workspace = dunce::canonicalize(&target)?;
    if !config_path.exists() {
        fs::write(&config_path, CONFIG_TEMPLATE)?;
    }

    let settings = config::load_config(&workspace, &ctx.overrides)?;
    let mut persistence = IssuePersistence::new(FileSlot::new(&workspace))
        .with_key(settings.storage_key.clone())
        .with_seed(settings.seed);

    // An existing collection survives a plain re-init; --force replaces it.
    let report = persistence.inspect()?;
    let wrote_issues = args.force || !report.present;
    let issues = if wrote_issues {
        let initial = if settings.seed {
            seed_issues()
        } else {
            Vec::new()
        };
        persistence.save(&initial)?;
        initial.len()
    } else {
        report.parsed.unwrap_or(0)
    };
    info!(workspace = %workspace.display(), issues, wrote_issues, "workspace initialized");

    if ctx.json {
        return print_json(&InitOutput {
            workspace,
            storage_key: settings.storage_key,
            issues,
            wrote_issues,
        });
    }

    println!("Initialized itrack workspace in {}", workspace.display());
    if wrote_issues {
        println!("Stored {issues} issue(s) under key '{}'", settings.storage_key);
    }
    Ok(())
}
