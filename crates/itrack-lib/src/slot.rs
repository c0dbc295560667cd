//! Key-value durable slots.
//!
//! A slot maps string keys to whole string values. The issue collection is
//! kept under a single key; the slot is handed to the persistence layer at
//! construction instead of being reached through a global.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TrackerError};

/// Storage capability for whole-value reads and writes.
pub trait KeyValueSlot {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Ephemeral slot backed by a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that pre-populates `key`.
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Slot that keeps each key in `<dir>/<key>.json`.
///
/// Writes go to a temp file that is renamed over the target, so a reader
/// never observes a half-written value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` unless the key is non-empty ASCII alphanumerics,
    /// `-` or `_`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueSlot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackerError::Io(e)),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}

/// Check that `key` can name a slot file.
///
/// # Errors
///
/// Returns `InvalidKey` unless the key is non-empty ASCII alphanumerics,
/// `-` or `_`.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(TrackerError::InvalidKey {
            key: key.to_string(),
        })
    }
}
