//! Command implementations.
//!
//! Each command exposes `execute`, prints its own output and returns
//! [`crate::error::Result`].

pub mod completions;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod init;
pub mod list;
pub mod schema;
pub mod show;
pub mod update;
pub mod version;

use crate::app::App;
use crate::config::{self, CliOverrides};
use crate::error::{ItrackError, Result};
use std::path::PathBuf;

/// Global options every command sees.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub json: bool,
    pub dir: Option<PathBuf>,
    pub overrides: CliOverrides,
}

impl CommandContext {
    /// The workspace directory to operate on.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if `--dir` does not exist or no workspace is
    /// found by discovery.
    pub fn workspace(&self) -> Result<PathBuf> {
        match &self.dir {
            Some(dir) if dir.is_dir() => Ok(dunce::canonicalize(dir)?),
            Some(_) => Err(ItrackError::NotInitialized),
            None => config::discover_workspace(None),
        }
    }

    /// Resolve the workspace, load its config and open the store.
    ///
    /// # Errors
    ///
    /// Returns an error if no workspace is found or config is invalid.
    pub fn open_app(&self) -> Result<App> {
        let workspace = self.workspace()?;
        let settings = config::load_config(&workspace, &self.overrides)?;
        Ok(App::open(&workspace, settings))
    }
}

/// Print `value` as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
