use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::profile::DeviceKey;
use crate::domain::verdict::ValidationVerdict;

/// Kind of media assigned to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a declared MIME-like type. Anything that is not video is treated as an image.
    pub fn from_mime(mime_type: &str) -> Self {
        if mime_type.starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("image"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

/// Where the media in a slot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Default,
    Upload,
}

/// An operator-selected file: display name, declared type and raw bytes.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    bytes: Arc<[u8]>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the contents, cheap to clone into probe tasks.
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Byte length of the file.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }

    /// Lowercased extension of the display name, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        (!ext.is_empty()).then(|| ext.to_ascii_lowercase())
    }
}

/// The media currently assigned to one device class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaSlot {
    pub kind: MediaKind,
    #[serde(alias = "src")]
    pub source_locator: String,
    pub label: String,
    pub source_type: SourceType,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(alias = "meta")]
    pub verdict: ValidationVerdict,
}

/// Partial update for a single media slot. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct MediaSlotPatch {
    pub kind: Option<MediaKind>,
    pub source_locator: Option<String>,
    pub label: Option<String>,
    pub source_type: Option<SourceType>,
    pub file_size: Option<Option<u64>>,
    pub verdict: Option<ValidationVerdict>,
}

impl MediaSlotPatch {
    /// Patch that only replaces the verdict.
    pub fn verdict(verdict: ValidationVerdict) -> Self {
        Self {
            verdict: Some(verdict),
            ..Default::default()
        }
    }
}

impl MediaSlot {
    /// Shallow-merge a patch into this slot.
    pub fn apply(&mut self, patch: MediaSlotPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(source_locator) = patch.source_locator {
            self.source_locator = source_locator;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(source_type) = patch.source_type {
            self.source_type = source_type;
        }
        if let Some(file_size) = patch.file_size {
            self.file_size = file_size;
        }
        if let Some(verdict) = patch.verdict {
            self.verdict = verdict;
        }
    }

    /// Provisional slot for a freshly selected file, verdict pending.
    pub fn pending_upload(file: &UploadedFile, source_locator: String) -> Self {
        Self {
            kind: file.kind(),
            source_locator,
            label: file.name.clone(),
            source_type: SourceType::Upload,
            file_size: Some(file.size()),
            verdict: ValidationVerdict::pending(),
        }
    }
}

/// Exactly one media slot per device key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaSlots {
    pub desktop: MediaSlot,
    pub mobile: MediaSlot,
}

impl MediaSlots {
    pub fn get(&self, device: DeviceKey) -> &MediaSlot {
        match device {
            DeviceKey::Desktop => &self.desktop,
            DeviceKey::Mobile => &self.mobile,
        }
    }

    pub fn get_mut(&mut self, device: DeviceKey) -> &mut MediaSlot {
        match device {
            DeviceKey::Desktop => &mut self.desktop,
            DeviceKey::Mobile => &mut self.mobile,
        }
    }
}

impl Default for MediaSlots {
    fn default() -> Self {
        Self {
            desktop: default_slot(DeviceKey::Desktop),
            mobile: default_slot(DeviceKey::Mobile),
        }
    }
}

static DEFAULT_MEDIA: Lazy<[MediaSlot; 2]> = Lazy::new(|| {
    [
        MediaSlot {
            kind: MediaKind::Image,
            source_locator: "https://images.unsplash.com/photo-1618005198919-d3d4b8880c5d?auto=format&fit=crop&w=1920&q=80".to_string(),
            label: "Default widescreen illustration".to_string(),
            source_type: SourceType::Default,
            file_size: None,
            verdict: ValidationVerdict::known(1920, 1080, "16:9"),
        },
        MediaSlot {
            kind: MediaKind::Image,
            source_locator: "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?auto=format&fit=crop&w=1200&q=80".to_string(),
            label: "Default portrait artwork".to_string(),
            source_type: SourceType::Default,
            file_size: None,
            verdict: ValidationVerdict::known(800, 1200, "3:4"),
        },
    ]
});

/// A fresh, independently owned copy of the built-in media for a device.
pub fn default_slot(device: DeviceKey) -> MediaSlot {
    DEFAULT_MEDIA[device.index()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::verdict::VerdictStatus;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    }

    #[test]
    fn test_pending_upload_slot() {
        let file = UploadedFile::new("hero.MP4", "video/mp4", vec![0u8; 42]);
        let slot = MediaSlot::pending_upload(&file, "blob:banner-studio/1".to_string());
        assert_eq!(slot.kind, MediaKind::Video);
        assert_eq!(slot.label, "hero.MP4");
        assert_eq!(slot.file_size, Some(42));
        assert_eq!(slot.source_type, SourceType::Upload);
        assert_eq!(slot.verdict.status, VerdictStatus::Pending);
        assert_eq!(file.extension().as_deref(), Some("mp4"));
    }

    #[test]
    fn test_default_slots_do_not_alias() {
        let mut first = default_slot(DeviceKey::Desktop);
        first.label.push_str(" (edited)");
        first.verdict.warnings.push("changed".to_string());

        let second = default_slot(DeviceKey::Desktop);
        assert_eq!(second.label, "Default widescreen illustration");
        assert!(second.verdict.warnings.is_empty());
    }

    #[test]
    fn test_apply_patch_is_shallow() {
        let mut slot = default_slot(DeviceKey::Mobile);
        slot.apply(MediaSlotPatch {
            label: Some("Poster".to_string()),
            file_size: Some(Some(10)),
            ..Default::default()
        });
        assert_eq!(slot.label, "Poster");
        assert_eq!(slot.file_size, Some(10));
        assert_eq!(slot.kind, MediaKind::Image);
        assert_eq!(slot.verdict.ratio_label, "3:4");
    }

    #[test]
    fn test_slot_accepts_legacy_keys() {
        let json = r#"{
            "kind": "image",
            "src": "https://example.com/a.png",
            "label": "A",
            "sourceType": "upload",
            "fileSize": 1024,
            "meta": {"width": 10, "height": 5, "ratioValue": 2, "ratioLabel": "2:1", "warnings": [], "status": "ok"}
        }"#;
        let slot: MediaSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.source_locator, "https://example.com/a.png");
        assert_eq!(slot.verdict.width, Some(10));
        assert_eq!(slot.verdict.ratio_value, Some(2.0));
    }
}
