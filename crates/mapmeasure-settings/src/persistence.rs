//! Settings Persistence
//!
//! Locates the user's configuration file and loads it, falling back to
//! defaults when it is missing or unusable.

use crate::config::Config;
use crate::error::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_DIR: &str = "mapmeasure";
const CONFIG_FILE: &str = "config.toml";

/// Settings persistence layer
#[derive(Debug, Clone, Default)]
pub struct SettingsPersistence {
    config: Config,
}

impl SettingsPersistence {
    /// Create new persistence layer with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/mapmeasure/config.toml`
    pub fn config_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load settings from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let config = Config::load_from_file(path)?;
        Ok(Self { config })
    }

    /// Load from `path`, falling back to defaults if it is absent or invalid
    pub fn load_or_default_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::new();
        }
        match Self::load_from_file(path) {
            Ok(persistence) => {
                debug!("Loaded config from {}", path.display());
                persistence
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Load the user's config, falling back to defaults
    pub fn load_or_default() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                warn!("{}", e);
                Self::new()
            }
        }
    }

    /// Save settings to file, creating parent directories as needed
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.config.save_to_file(path)
    }

    /// Get reference to config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get mutable reference to config
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
