//! Issue collection persistence.
//!
//! The whole collection is serialized as one JSON array and stored under a
//! single slot key. Loading happens once at startup; saving happens after
//! every effective mutation and always rewrites the full value.

use std::collections::HashSet;

use chrono::{TimeZone, Utc};
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Issue, Priority, Status};
use crate::slot::KeyValueSlot;

/// Default slot key for the issue collection.
pub const DEFAULT_KEY: &str = "issues";

/// Where a loaded collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the stored value.
    Stored,
    /// No stored value; the fallback collection was used.
    Missing,
    /// Stored value was unreadable; the fallback collection was used.
    Recovered { reason: String },
}

/// Result of [`IssuePersistence::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub issues: Vec<Issue>,
    pub source: LoadSource,
}

/// Non-mutating view of what the slot currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotReport {
    pub key: String,
    pub present: bool,
    pub bytes: usize,
    /// `Ok(count)` when the value parses, `Err(reason)` otherwise.
    pub parsed: std::result::Result<usize, String>,
    pub duplicate_ids: Vec<String>,
}

/// Reads and writes the issue collection through a [`KeyValueSlot`].
#[derive(Debug)]
pub struct IssuePersistence<S> {
    slot: S,
    key: String,
    seed: bool,
}

impl<S: KeyValueSlot> IssuePersistence<S> {
    /// Persistence over `slot` using the default key.
    #[must_use]
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            key: DEFAULT_KEY.to_string(),
            seed: true,
        }
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Whether a missing or unreadable value falls back to the seed records
    /// (`true`, the default) or to an empty collection.
    #[must_use]
    pub const fn with_seed(mut self, seed: bool) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    #[must_use]
    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Load the stored collection.
    ///
    /// Never fails: a missing value yields the fallback collection and a
    /// value that cannot be read or parsed is treated the same way, with a
    /// warning.
    #[must_use]
    pub fn load(&self) -> Loaded {
        let raw = match self.slot.read(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "slot read failed; using fallback issues");
                return Loaded {
                    issues: self.fallback(),
                    source: LoadSource::Recovered {
                        reason: e.to_string(),
                    },
                };
            }
        };

        let Some(raw) = raw else {
            debug!(key = %self.key, seed = self.seed, "no stored issues");
            return Loaded {
                issues: self.fallback(),
                source: LoadSource::Missing,
            };
        };

        match decode(&raw) {
            Ok(issues) => {
                let duplicates = duplicate_ids(&issues);
                if !duplicates.is_empty() {
                    warn!(key = %self.key, ?duplicates, "stored issues contain duplicate ids");
                }
                debug!(key = %self.key, count = issues.len(), "loaded stored issues");
                Loaded {
                    issues,
                    source: LoadSource::Stored,
                }
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored issues are malformed; using fallback issues");
                Loaded {
                    issues: self.fallback(),
                    source: LoadSource::Recovered {
                        reason: e.to_string(),
                    },
                }
            }
        }
    }

    /// Serialize `issues` and overwrite the stored value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the slot write fails.
    pub fn save(&mut self, issues: &[Issue]) -> Result<()> {
        let json = encode(issues)?;
        self.slot.write(&self.key, &json)?;
        debug!(key = %self.key, count = issues.len(), "saved issues");
        Ok(())
    }

    /// Describe the stored value without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read.
    pub fn inspect(&self) -> Result<SlotReport> {
        let raw = self.slot.read(&self.key)?;
        let present = raw.is_some();
        let bytes = raw.as_ref().map_or(0, String::len);

        let (parsed, duplicate_ids) = match raw.as_deref().map(decode) {
            None => (Ok(0), Vec::new()),
            Some(Ok(issues)) => (Ok(issues.len()), duplicate_ids(&issues)),
            Some(Err(e)) => (Err(e.to_string()), Vec::new()),
        };

        Ok(SlotReport {
            key: self.key.clone(),
            present,
            bytes,
            parsed,
            duplicate_ids,
        })
    }

    fn fallback(&self) -> Vec<Issue> {
        if self.seed { seed_issues() } else { Vec::new() }
    }
}

/// Serialize a collection to its stored JSON form.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn encode(issues: &[Issue]) -> Result<String> {
    Ok(serde_json::to_string(issues)?)
}

/// Parse a stored JSON value.
///
/// # Errors
///
/// Returns `Json` if the value is not an array of issue records.
pub fn decode(raw: &str) -> Result<Vec<Issue>> {
    Ok(serde_json::from_str(raw)?)
}

/// The records a fresh workspace starts with.
#[must_use]
pub fn seed_issues() -> Vec<Issue> {
    let seed = |id: &str, title: &str, description: &str, status, priority, day| Issue {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        status,
        priority,
        created_at: Utc
            .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
            .single()
            .unwrap_or_default(),
    };

    vec![
        seed(
            "1",
            "Fix login bug",
            "Users unable to login with special characters in password",
            Status::InProgress,
            Priority::High,
            15,
        ),
        seed(
            "2",
            "Add dark mode",
            "Implement dark mode toggle in settings",
            Status::Todo,
            Priority::Medium,
            20,
        ),
        seed(
            "3",
            "Update documentation",
            "Add API documentation for new endpoints",
            Status::Done,
            Priority::Low,
            10,
        ),
    ]
}

fn duplicate_ids(issues: &[Issue]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for issue in issues {
        if !seen.insert(issue.id.as_str()) && !duplicates.contains(&issue.id) {
            duplicates.push(issue.id.clone());
        }
    }
    duplicates
}
