//! Workbench configuration
//!
//! Settings are loaded from a TOML file under the platform config
//! directory (`~/.config/arcview/config.toml` on Linux). Every field has a
//! default, so a missing file and a partial file both work; an explicitly
//! named file that is unreadable or malformed is an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::DEFAULT_TRANSFORM_WORKERS;
use crate::recent::DEFAULT_RECENT_CAPACITY;
use crate::split::DEFAULT_MIN_PANE_EXTENT;

/// Directory name used under the platform config and data directories.
pub const APP_DIR_NAME: &str = "arcview";

/// Config file name under the app config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read or write the config file
    #[error("Failed to access config file: {0}")]
    Io(String),

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Failed to serialize the config
    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    /// A field value is out of range
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Workbench settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkbenchConfig {
    /// Minimum rendered extent of a pane in layout units; the resize clamp.
    pub min_pane_extent: f64,
    /// Number of background transform worker threads.
    pub transform_workers: usize,
    /// How many recent documents to remember.
    pub recent_capacity: usize,
    /// Persistent content store directory; defaults under the data dir.
    pub store_dir: Option<PathBuf>,
    /// Recent-documents file; defaults under the data dir.
    pub recent_file: Option<PathBuf>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            min_pane_extent: DEFAULT_MIN_PANE_EXTENT,
            transform_workers: DEFAULT_TRANSFORM_WORKERS,
            recent_capacity: DEFAULT_RECENT_CAPACITY,
            store_dir: None,
            recent_file: None,
        }
    }
}

impl WorkbenchConfig {
    /// Creates a config with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read,
    /// `ConfigError::Parse` if it is not valid TOML for this schema, or
    /// `ConfigError::Invalid` if a value is out of range.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from the default location, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for a file that exists but cannot be loaded.
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Saves the configuration as TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialize` if encoding fails or
    /// `ConfigError::Io` if the file cannot be written.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        std::fs::write(path, toml).map_err(|e| ConfigError::Io(e.to_string()))
    }

    /// The default config file path, when a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// The content store directory, resolved against the platform data dir.
    #[must_use]
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from(".arcview"))
                .join(APP_DIR_NAME)
                .join("store")
        })
    }

    /// The recent-documents file, resolved against the platform data dir.
    #[must_use]
    pub fn recent_file(&self) -> PathBuf {
        self.recent_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from(".arcview"))
                .join(APP_DIR_NAME)
                .join("recent.json")
        })
    }

    /// Checks field values for range errors.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.min_pane_extent.is_finite() || self.min_pane_extent <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_pane_extent must be a positive number, got {}",
                self.min_pane_extent
            )));
        }
        if self.transform_workers == 0 {
            return Err(ConfigError::Invalid(
                "transform_workers must be at least 1".to_string(),
            ));
        }
        if self.recent_capacity == 0 {
            return Err(ConfigError::Invalid(
                "recent_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
