//! Configuration for PlantView.
//!
//! PLANTVIEW_ROOT resolution order:
//! 1. Explicit path passed to Config::with_root()
//! 2. PLANTVIEW_ROOT environment variable
//! 3. XDG data directory (via `directories`)
//! 4. Default: ~/.local/share/plantview

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Environment variable overriding the data root.
pub const ROOT_ENV_VAR: &str = "PLANTVIEW_ROOT";

/// PlantView configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for all PlantView data.
    pub root: PathBuf,

    /// Quiet period after the last keystroke before a search is committed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of recent searches kept.
    #[serde(default = "default_recent_search_limit")]
    pub recent_search_limit: usize,

    /// An asset is "maintenance due" when its next maintenance falls within this many days.
    #[serde(default = "default_maintenance_due_window_days")]
    pub maintenance_due_window_days: i64,

    /// Look-back window for the `no-parts-activity` filter.
    #[serde(default = "default_parts_activity_window_days")]
    pub parts_activity_window_days: i64,

    /// Maximum number of maintenance history records kept.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_recent_search_limit() -> usize {
    5
}

fn default_maintenance_due_window_days() -> i64 {
    30
}

fn default_parts_activity_window_days() -> i64 {
    90
}

fn default_history_limit() -> usize {
    100
}

impl Config {
    /// Create a new config with the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            debounce_ms: default_debounce_ms(),
            recent_search_limit: default_recent_search_limit(),
            maintenance_due_window_days: default_maintenance_due_window_days(),
            parts_activity_window_days: default_parts_activity_window_days(),
            history_limit: default_history_limit(),
        }
    }

    /// Load config from PLANTVIEW_ROOT/config.toml, or create default.
    pub fn load() -> Result<Self> {
        let root = resolve_root()?;
        Self::load_from(&root)
    }

    /// Load config from a specific root.
    pub fn load_from(root: &Path) -> Result<Self> {
        let config_path = root.join("config.toml");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let mut config: Config = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
            // The file may have been copied from elsewhere
            config.root = root.to_path_buf();
            Ok(config)
        } else {
            Ok(Self::with_root(root))
        }
    }

    /// Save config to PLANTVIEW_ROOT/config.toml.
    pub fn save(&self) -> Result<()> {
        std::fs::create_dir_all(&self.root)?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(self.config_path(), contents)?;
        Ok(())
    }

    /// Debounce window as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    // Path helpers

    /// Path to the config file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Directory holding the key/value storage documents.
    pub fn storage_dir(&self) -> PathBuf {
        self.root.join("storage")
    }

    /// Path to the JSON document for a storage key.
    pub fn storage_path(&self, key: &str) -> PathBuf {
        self.storage_dir()
            .join(format!("{}.json", sanitize_for_filename(key)))
    }
}

/// Sanitize a storage key for use as a filename.
fn sanitize_for_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' => c,
            _ => '_',
        })
        .take(64)
        .collect()
}

/// Resolve PLANTVIEW_ROOT using the standard resolution order.
fn resolve_root() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    if let Some(proj_dirs) = ProjectDirs::from("", "", "plantview") {
        return Ok(proj_dirs.data_dir().to_path_buf());
    }

    let home = std::env::var("HOME")
        .map_err(|_| Error::Config("Could not determine home directory".to_string()))?;
    Ok(PathBuf::from(home).join(".local/share/plantview"))
}
