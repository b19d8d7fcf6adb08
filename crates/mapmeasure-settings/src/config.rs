//! Configuration for the measurement tools
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Travel speeds used for walking/cycling estimates
//! - Label preferences (segment captions, floating label)
//! - Overlay styles per tool family

use mapmeasure_core::{OverlayStyle, ToolKind, TravelSpeeds};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Label preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Caption distance anchor dots with the segment length
    pub show_segment_lengths: bool,
    /// Show the floating label that follows the pointer
    pub show_live_label: bool,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            show_segment_lengths: true,
            show_live_label: true,
        }
    }
}

/// Overlay styles, one per tool family plus the live previews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    pub distance: OverlayStyle,
    pub radius: OverlayStyle,
    pub area: OverlayStyle,
    pub preview: OverlayStyle,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            distance: OverlayStyle::for_tool(ToolKind::Distance),
            radius: OverlayStyle::for_tool(ToolKind::Radius),
            area: OverlayStyle::for_tool(ToolKind::Area),
            preview: OverlayStyle::live_preview(),
        }
    }
}

impl StyleSettings {
    fn entries(&self) -> [(&'static str, &OverlayStyle); 4] {
        [
            ("distance", &self.distance),
            ("radius", &self.radius),
            ("area", &self.area),
            ("preview", &self.preview),
        ]
    }
}

/// Complete measurement configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Travel speeds for time estimates
    pub travel: TravelSpeeds,
    /// Label preferences
    pub labels: LabelSettings,
    /// Overlay styles
    pub styles: StyleSettings,
}

/// File formats a config can be stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )
            .into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        if let Err(e) = config.validate() {
            warn!("Rejected config {}: {}", path.display(), e);
            return Err(e);
        }
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let format = Format::of(path)?;
        self.validate()?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, speed) in [
            ("travel.walking_m_per_min", self.travel.walking_m_per_min),
            ("travel.cycling_m_per_min", self.travel.cycling_m_per_min),
        ] {
            if !(speed.is_finite() && speed > 0.0) {
                return Err(ConfigError::ValueOutOfRange {
                    key: key.to_string(),
                    value: speed.to_string(),
                }
                .into());
            }
        }

        for (name, style) in self.styles.entries() {
            if let Some(reason) = style.problem() {
                return Err(SettingsError::InvalidSetting {
                    key: format!("styles.{name}"),
                    reason,
                });
            }
        }

        Ok(())
    }
}
