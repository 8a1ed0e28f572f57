use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Enable file logging with rotation.
    pub file_logging: bool,
    /// Maximum number of log files to keep.
    pub max_files: u32,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_logging: true,
            max_files: 7,
        }
    }
}

/// Where the banner document is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Key of the persisted banner document; also its file stem.
    pub storage_key: String,
    /// Overrides the OS data directory when set.
    pub data_dir: Option<PathBuf>,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            storage_key: "fabtcg-banner-config-v1".to_string(),
            data_dir: None,
        }
    }
}

/// Media probing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Executable used to read video stream metadata.
    pub ffprobe_path: String,
    /// Upper bound on a single video probe; exceeding it counts as a decode failure.
    pub probe_timeout_secs: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            ffprobe_path: "ffprobe".to_string(),
            probe_timeout_secs: 15,
        }
    }
}

/// Application settings, stored as TOML next to the banner document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StudioSettings {
    pub logging: LoggingSettings,
    pub storage: StorageSettings,
    pub media: MediaSettings,
}

impl StudioSettings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings: StudioSettings = toml::from_str(
            r#"
            [logging]
            level = "debug"

            [media]
            probe_timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert!(settings.logging.file_logging);
        assert_eq!(settings.media.probe_timeout_secs, 3);
        assert_eq!(settings.media.ffprobe_path, "ffprobe");
        assert_eq!(settings.storage.storage_key, "fabtcg-banner-config-v1");
        assert!(settings.storage.data_dir.is_none());
    }
}
