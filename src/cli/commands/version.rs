//! Version command implementation.

use super::{CommandContext, print_json};
use crate::error::Result;
use serde::Serialize;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    lib_version: &'a str,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if ctx.json {
        return print_json(&VersionOutput {
            version,
            build,
            lib_version: itrack_lib::VERSION,
        });
    }

    println!("itrack {version} ({build})");
    Ok(())
}
