use std::path::PathBuf;

use crate::domain::{DomainError, StudioSettings};

/// Settings store port for persisting and loading application settings.
pub trait SettingsStore: Send + Sync {
    /// Load settings from persistent storage.
    /// Creates a default settings file if none exists.
    fn load(&self) -> Result<StudioSettings, DomainError>;

    /// Save settings to persistent storage.
    fn save(&self, settings: &StudioSettings) -> Result<(), DomainError>;

    /// Get the path to the settings file.
    fn settings_path(&self) -> PathBuf;

    /// Get the path to the application data directory.
    fn data_dir(&self) -> PathBuf;

    /// Get the path to the logs directory.
    fn logs_dir(&self) -> PathBuf;
}
