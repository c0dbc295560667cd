//! Schema command implementation.

use crate::error::Result;
use itrack_lib::Issue;
use schemars::schema_for;

/// Execute the schema command: print the JSON Schema of one stored issue
/// record.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn execute() -> Result<()> {
    let schema = schema_for!(Issue);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
