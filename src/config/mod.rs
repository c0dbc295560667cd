//! Configuration management for `itrack`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`ITRACK_*`)
//! 3. Project config (.itrack/config.yaml)
//! 4. User config (~/.config/itrack/config.yaml)
//! 5. Defaults

use crate::error::{ItrackError, Result};
use itrack_lib::persist::DEFAULT_KEY;
use itrack_lib::{Priority, Status, validate_key};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Name of the workspace directory.
pub const WORKSPACE_DIR_NAME: &str = ".itrack";
/// Config file inside the workspace.
pub const CONFIG_FILE_NAME: &str = "config.yaml";
/// Environment variable naming the workspace directory directly.
pub const WORKSPACE_ENV: &str = "ITRACK_DIR";

const ENV_PREFIX: &str = "ITRACK_";

/// Environment variables with the `ITRACK_` prefix that are not config keys.
const NON_CONFIG_ENV: &[&str] = &["ITRACK_DIR", "ITRACK_LOG_FORMAT"];

/// Template written by `itrack init`.
pub const CONFIG_TEMPLATE: &str = r"# itrack workspace configuration
# storage-key: issues
# seed: true
# default-status: todo
# default-priority: low
";

/// Discover the active `.itrack` directory.
///
/// Honors `ITRACK_DIR` when set, otherwise walks up from `start` (or CWD).
///
/// # Errors
///
/// Returns `NotInitialized` if no workspace is found, or an I/O error if the
/// CWD cannot be read.
pub fn discover_workspace(start: Option<&Path>) -> Result<PathBuf> {
    discover_workspace_with_env(start, None)
}

fn discover_workspace_with_env(start: Option<&Path>, env_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = env_override {
        if path.is_dir() {
            return normalize(path);
        }
    } else if let Ok(value) = env::var(WORKSPACE_ENV) {
        let path = PathBuf::from(value.trim());
        if !value.trim().is_empty() && path.is_dir() {
            return normalize(&path);
        }
    }

    let mut current = match start {
        Some(path) => path.to_path_buf(),
        None => env::current_dir()?,
    };

    loop {
        let candidate = current.join(WORKSPACE_DIR_NAME);
        if candidate.is_dir() {
            return normalize(&candidate);
        }

        if !current.pop() {
            break;
        }
    }

    Err(ItrackError::NotInitialized)
}

fn normalize(path: &Path) -> Result<PathBuf> {
    Ok(dunce::canonicalize(path)?)
}

/// A flat configuration layer keyed by normalized (kebab-case) names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build a layer from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        let mut flat = HashMap::new();
        flatten_yaml(&value, "", &mut flat);

        let mut layer = Self::default();
        for (key, value) in flat {
            layer.insert(&key, value);
        }
        Ok(layer)
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `ITRACK_*` pairs; `ITRACK_STORAGE_KEY` becomes
    /// `storage-key`.
    #[must_use]
    pub fn from_env_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if NON_CONFIG_ENV.contains(&key.as_str()) {
                continue;
            }
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                layer.insert(stripped, value);
            }
        }
        layer
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(&normalize_key(key)).map(String::as_str)
    }

    fn insert(&mut self, key: &str, value: String) {
        self.values.insert(normalize_key(key), value);
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub storage_key: Option<String>,
    pub seed: Option<bool>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(key) = &self.storage_key {
            layer.insert("storage-key", key.clone());
        }
        if let Some(seed) = self.seed {
            layer.insert("seed", seed.to_string());
        }

        layer
    }
}

/// Resolved settings used to build the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage_key: String,
    pub seed: bool,
    pub default_status: Status,
    pub default_priority: Priority,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_KEY.to_string(),
            seed: true,
            default_status: Status::Todo,
            default_priority: Priority::Low,
        }
    }
}

impl Settings {
    /// Interpret a merged layer. Absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `Config` for values that do not parse.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(key) = layer.get("storage-key") {
            let key = key.trim();
            if key.is_empty() {
                return Err(ItrackError::Config("storage-key cannot be empty".to_string()));
            }
            validate_key(key).map_err(|e| ItrackError::Config(format!("storage-key: {e}")))?;
            settings.storage_key = key.to_string();
        }
        if let Some(value) = layer.get("seed") {
            settings.seed = parse_bool(value)
                .ok_or_else(|| ItrackError::Config(format!("seed: expected a boolean, got '{value}'")))?;
        }
        if let Some(value) = layer.get("default-status") {
            settings.default_status = Status::from_str(value)
                .map_err(|e| ItrackError::Config(format!("default-status: {e}")))?;
        }
        if let Some(value) = layer.get("default-priority") {
            settings.default_priority = Priority::from_str(value)
                .map_err(|e| ItrackError::Config(format!("default-priority: {e}")))?;
        }

        Ok(settings)
    }
}

/// Load project config (.itrack/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(workspace: &Path) -> Result<ConfigLayer> {
    ConfigLayer::from_yaml(&workspace.join(CONFIG_FILE_NAME))
}

/// Load user config (~/.config/itrack/config.yaml).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("itrack")
        .join(CONFIG_FILE_NAME);
    ConfigLayer::from_yaml(&path)
}

/// Load configuration with the full precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed, or a value
/// is invalid.
pub fn load_config(workspace: &Path, cli: &CliOverrides) -> Result<Settings> {
    let merged = ConfigLayer::merge_layers(&[
        load_user_config()?,
        load_project_config(workspace)?,
        ConfigLayer::from_env(),
        cli.as_layer(),
    ]);
    Settings::from_layer(&merged)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}
