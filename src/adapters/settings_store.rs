use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{DomainError, StudioSettings};
use crate::ports::SettingsStore;

/// TOML-based settings store with OS-specific paths.
pub struct TomlSettingsStore {
    data_dir: PathBuf,
}

impl TomlSettingsStore {
    /// Create a new TomlSettingsStore.
    /// Uses OS-specific application data directories.
    pub fn new() -> Result<Self, DomainError> {
        Self::with_data_dir(Self::get_data_dir()?)
    }

    /// Create a store rooted at an explicit directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Result<Self, DomainError> {
        fs::create_dir_all(&data_dir)?;

        info!(data_dir = ?data_dir, "SettingsStore initialized");

        Ok(Self { data_dir })
    }

    /// Get the OS-specific application data directory.
    /// - macOS: ~/Library/Application Support/BannerStudio/
    /// - Windows: %APPDATA%\BannerStudio\
    /// - Linux: ~/.config/BannerStudio/
    fn get_data_dir() -> Result<PathBuf, DomainError> {
        #[cfg(target_os = "macos")]
        let base = dirs::data_dir();

        #[cfg(not(target_os = "macos"))]
        let base = dirs::config_dir();

        base.map(|p| p.join("BannerStudio"))
            .ok_or_else(|| DomainError::Config("Could not find application data directory".to_string()))
    }

    /// Get the OS-specific log directory.
    /// - macOS: ~/Library/Application Support/BannerStudio/logs/
    /// - Windows: %LOCALAPPDATA%\BannerStudio\logs\
    /// - Linux: ~/.local/share/BannerStudio/logs/
    fn get_logs_dir(&self) -> PathBuf {
        #[cfg(target_os = "macos")]
        {
            self.data_dir.join("logs")
        }

        #[cfg(target_os = "windows")]
        {
            dirs::data_local_dir()
                .map(|p| p.join("BannerStudio").join("logs"))
                .unwrap_or_else(|| self.data_dir.join("logs"))
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            dirs::data_dir()
                .map(|p| p.join("BannerStudio").join("logs"))
                .unwrap_or_else(|| self.data_dir.join("logs"))
        }
    }
}

impl SettingsStore for TomlSettingsStore {
    fn load(&self) -> Result<StudioSettings, DomainError> {
        let settings_path = self.settings_path();

        if settings_path.exists() {
            debug!(path = ?settings_path, "Loading settings");
            let content = fs::read_to_string(&settings_path)?;
            let settings: StudioSettings = toml::from_str(&content)?;
            info!(path = ?settings_path, "Settings loaded");
            Ok(settings)
        } else {
            info!(path = ?settings_path, "Settings file not found, creating default");
            let settings = StudioSettings::new();
            self.save(&settings)?;
            Ok(settings)
        }
    }

    fn save(&self, settings: &StudioSettings) -> Result<(), DomainError> {
        let settings_path = self.settings_path();

        if let Some(parent) = settings_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(settings)?;
        fs::write(&settings_path, content)?;

        info!(path = ?settings_path, "Settings saved");
        Ok(())
    }

    fn settings_path(&self) -> PathBuf {
        self.data_dir.join("settings.toml")
    }

    fn data_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    fn logs_dir(&self) -> PathBuf {
        self.get_logs_dir()
    }
}
