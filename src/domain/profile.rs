use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Device class a media slot is authored for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKey {
    Desktop,
    Mobile,
}

impl DeviceKey {
    /// Every supported device key, desktop first.
    pub const ALL: [DeviceKey; 2] = [DeviceKey::Desktop, DeviceKey::Mobile];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKey::Desktop => "desktop",
            DeviceKey::Mobile => "mobile",
        }
    }

    /// Dense index for per-device tables.
    pub(crate) fn index(&self) -> usize {
        match self {
            DeviceKey::Desktop => 0,
            DeviceKey::Mobile => 1,
        }
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "desktop" => Ok(DeviceKey::Desktop),
            "mobile" => Ok(DeviceKey::Mobile),
            other => Err(DomainError::UnknownDeviceKey(other.to_string())),
        }
    }
}

/// Expected pixel dimensions and aspect ratio for a device class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetProfile {
    pub key: DeviceKey,
    pub label: &'static str,
    pub width: u32,
    pub height: u32,
    /// Always `width / height`.
    pub ratio: f64,
    pub ratio_label: &'static str,
}

static DESKTOP: TargetProfile = TargetProfile {
    key: DeviceKey::Desktop,
    label: "Desktop (1920 × 1080)",
    width: 1920,
    height: 1080,
    ratio: 1920.0 / 1080.0,
    ratio_label: "16:9 widescreen",
};

static MOBILE: TargetProfile = TargetProfile {
    key: DeviceKey::Mobile,
    label: "Mobile (800 × 1200)",
    width: 800,
    height: 1200,
    ratio: 800.0 / 1200.0,
    ratio_label: "3:4 portrait",
};

/// Look up the target profile for a device.
pub fn profile_for(device: DeviceKey) -> &'static TargetProfile {
    match device {
        DeviceKey::Desktop => &DESKTOP,
        DeviceKey::Mobile => &MOBILE,
    }
}

/// Look up a target profile by its string key.
pub fn profile_for_key(key: &str) -> Result<&'static TargetProfile, DomainError> {
    key.parse::<DeviceKey>().map(profile_for)
}
