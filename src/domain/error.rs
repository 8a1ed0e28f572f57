use thiserror::Error;

use crate::domain::media::MediaKind;

/// Domain-level errors for Banner Studio.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Unknown device key: {0}")]
    UnknownDeviceKey(String),

    #[error("Unable to decode {kind} metadata: {reason}")]
    Decode { kind: MediaKind, reason: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid colour value: {0}")]
    InvalidColor(String),

    #[error("Locator error: {0}")]
    Locator(String),
}

impl DomainError {
    /// Shorthand for a metadata decode failure.
    pub fn decode(kind: MediaKind, reason: impl Into<String>) -> Self {
        DomainError::Decode {
            kind,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for DomainError {
    fn from(err: toml::de::Error) -> Self {
        DomainError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for DomainError {
    fn from(err: toml::ser::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for DomainError {
    fn from(err: url::ParseError) -> Self {
        DomainError::Locator(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = DomainError::decode(MediaKind::Video, "no video stream found");
        assert_eq!(
            err.to_string(),
            "Unable to decode video metadata: no video stream found"
        );
    }

    #[test]
    fn test_json_error_maps_to_serialization() {
        let err: DomainError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, DomainError::Serialization(_)));
    }
}
