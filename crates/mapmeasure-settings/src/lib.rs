//! MapMeasure Settings Crate
//!
//! Handles measurement tool configuration and its persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{Config, LabelSettings, StyleSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
