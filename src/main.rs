//! `itrack` - Minimal issue tracker
//!
//! Issues are kept as one JSON document per workspace; every command loads
//! it, applies one change and writes it back.

use itrack::{ItrackError, run};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        if let Some(hint) = e.downcast_ref::<ItrackError>().and_then(ItrackError::suggestion) {
            eprintln!("Hint: {hint}");
        }
        std::process::exit(1);
    }
}
