use serde::{Deserialize, Serialize};

use crate::domain::media::MediaKind;
use crate::domain::profile::TargetProfile;

/// Absolute ratio deviation tolerated for images.
pub const IMAGE_RATIO_TOLERANCE: f64 = 0.03;

/// Absolute ratio deviation tolerated for videos.
/// Container and pixel-aspect metadata is less reliable, hence looser.
pub const VIDEO_RATIO_TOLERANCE: f64 = 0.04;

/// Per-axis pixel delta beyond which an image gets a resolution warning.
pub const IMAGE_RESOLUTION_DELTA: u32 = 200;

/// Outcome classification of a media inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Ok,
    Warning,
    Error,
    /// Placeholder until the asynchronous probe resolves.
    Pending,
}

/// Intrinsic pixel dimensions reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`, or `None` when the height is zero.
    pub fn ratio(&self) -> Option<f64> {
        if self.height == 0 {
            return None;
        }
        let ratio = self.width as f64 / self.height as f64;
        ratio.is_finite().then_some(ratio)
    }
}

/// Result of comparing a media file's dimensions against a target profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub ratio_value: Option<f64>,
    #[serde(default)]
    pub ratio_label: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub status: VerdictStatus,
}

impl ValidationVerdict {
    /// Verdict attached to a slot the moment a file is selected.
    pub fn pending() -> Self {
        Self {
            width: None,
            height: None,
            ratio_value: None,
            ratio_label: String::new(),
            warnings: Vec::new(),
            status: VerdictStatus::Pending,
        }
    }

    /// Verdict for a file whose metadata could not be read.
    pub fn failed(kind: MediaKind) -> Self {
        Self {
            width: None,
            height: None,
            ratio_value: None,
            ratio_label: String::new(),
            warnings: vec![format!("Unable to read {} metadata", kind)],
            status: VerdictStatus::Error,
        }
    }

    /// Verdict for built-in assets whose dimensions are known ahead of time.
    pub fn known(width: u32, height: u32, ratio_label: &str) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ratio_value: Dimensions::new(width, height).ratio(),
            ratio_label: ratio_label.to_string(),
            warnings: Vec::new(),
            status: VerdictStatus::Ok,
        }
    }

    fn resolved(dims: Dimensions, ratio_value: f64, warnings: Vec<String>) -> Self {
        let status = if warnings.is_empty() {
            VerdictStatus::Ok
        } else {
            VerdictStatus::Warning
        };
        Self {
            width: Some(dims.width),
            height: Some(dims.height),
            ratio_value: Some(ratio_value),
            ratio_label: ratio_label(ratio_value),
            warnings,
            status,
        }
    }

    /// True while the probe for this verdict has not resolved.
    pub fn is_loading(&self) -> bool {
        self.status == VerdictStatus::Pending
    }

    /// Lines shown under the media field in the admin panel.
    pub fn summary(&self, target: &TargetProfile) -> Vec<String> {
        if self.warnings.is_empty() {
            vec![format!("Looks perfect for {}", target.ratio_label)]
        } else {
            self.warnings.clone()
        }
    }
}

/// Render an aspect ratio as `"<value>:1"` rounded to two places, or `"n/a"`.
pub fn ratio_label(value: f64) -> String {
    if value.is_nan() || value <= 0.0 {
        return "n/a".to_string();
    }
    let rounded = ((value + f64::EPSILON) * 100.0).round() / 100.0;
    format!("{}:1", rounded)
}

/// Dispatch to the evaluation rules for the given media kind.
pub fn evaluate(kind: MediaKind, dims: Dimensions, target: &TargetProfile) -> ValidationVerdict {
    match kind {
        MediaKind::Image => evaluate_image(dims, target),
        MediaKind::Video => evaluate_video(dims, target),
    }
}

/// Apply the image rules: ratio within 0.03, resolution within 200px, not undersized.
pub fn evaluate_image(dims: Dimensions, target: &TargetProfile) -> ValidationVerdict {
    let Some(ratio_value) = dims.ratio() else {
        return ValidationVerdict::failed(MediaKind::Image);
    };

    let mut warnings = Vec::new();
    if (ratio_value - target.ratio).abs() > IMAGE_RATIO_TOLERANCE {
        warnings.push(format!(
            "Ratio is {}, target {}",
            ratio_label(ratio_value),
            target.ratio_label
        ));
    }
    if dims.width.abs_diff(target.width) > IMAGE_RESOLUTION_DELTA
        || dims.height.abs_diff(target.height) > IMAGE_RESOLUTION_DELTA
    {
        warnings.push(format!(
            "Resolution {}×{} differs from {}×{}",
            dims.width, dims.height, target.width, target.height
        ));
    }
    if dims.width < target.width || dims.height < target.height {
        warnings.push("Image is smaller than recommended and may appear soft".to_string());
    }

    ValidationVerdict::resolved(dims, ratio_value, warnings)
}

/// Apply the video rules: ratio within 0.04 and not undersized.
pub fn evaluate_video(dims: Dimensions, target: &TargetProfile) -> ValidationVerdict {
    let Some(ratio_value) = dims.ratio() else {
        return ValidationVerdict::failed(MediaKind::Video);
    };

    let mut warnings = Vec::new();
    if (ratio_value - target.ratio).abs() > VIDEO_RATIO_TOLERANCE {
        warnings.push(format!(
            "Video ratio {} differs from {}",
            ratio_label(ratio_value),
            target.ratio_label
        ));
    }
    if dims.width < target.width || dims.height < target.height {
        warnings.push("Video resolution is under target, consider exporting larger".to_string());
    }

    ValidationVerdict::resolved(dims, ratio_value, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{profile_for, DeviceKey};

    #[test]
    fn test_ratio_label_formatting() {
        assert_eq!(ratio_label(16.0 / 9.0), "1.78:1");
        assert_eq!(ratio_label(1.6), "1.6:1");
        assert_eq!(ratio_label(2.0), "2:1");
        assert_eq!(ratio_label(800.0 / 1200.0), "0.67:1");
        assert_eq!(ratio_label(0.0), "n/a");
        assert_eq!(ratio_label(-1.0), "n/a");
        assert_eq!(ratio_label(f64::NAN), "n/a");
    }

    #[test]
    fn test_image_on_target_is_ok() {
        let verdict = evaluate_image(Dimensions::new(1920, 1080), profile_for(DeviceKey::Desktop));
        assert_eq!(verdict.status, VerdictStatus::Ok);
        assert!(verdict.warnings.is_empty());
        assert_eq!(verdict.ratio_label, "1.78:1");
    }

    #[test]
    fn test_image_ratio_mismatch() {
        let verdict = evaluate_image(Dimensions::new(1920, 1200), profile_for(DeviceKey::Desktop));
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(verdict.ratio_value, Some(1.6));
        assert_eq!(verdict.warnings, vec!["Ratio is 1.6:1, target 16:9 widescreen".to_string()]);
    }

    #[test]
    fn test_image_resolution_and_softness() {
        let verdict = evaluate_image(Dimensions::new(1600, 820), profile_for(DeviceKey::Desktop));
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert!(verdict
            .warnings
            .contains(&"Resolution 1600×820 differs from 1920×1080".to_string()));
        assert!(verdict
            .warnings
            .contains(&"Image is smaller than recommended and may appear soft".to_string()));
    }

    #[test]
    fn test_image_larger_than_target_within_ratio() {
        // 3840x2160 keeps the ratio but is far beyond the 200px window
        let verdict = evaluate_image(Dimensions::new(3840, 2160), profile_for(DeviceKey::Desktop));
        assert_eq!(
            verdict.warnings,
            vec!["Resolution 3840×2160 differs from 1920×1080".to_string()]
        );
    }

    #[test]
    fn test_video_tolerance_and_undersize() {
        let verdict = evaluate_video(Dimensions::new(780, 1150), profile_for(DeviceKey::Mobile));
        assert_eq!(verdict.status, VerdictStatus::Warning);
        assert_eq!(
            verdict.warnings,
            vec!["Video resolution is under target, consider exporting larger".to_string()]
        );
    }

    #[test]
    fn test_video_ratio_mismatch() {
        let verdict = evaluate_video(Dimensions::new(2400, 1350), profile_for(DeviceKey::Mobile));
        assert_eq!(
            verdict.warnings,
            vec!["Video ratio 1.78:1 differs from 3:4 portrait".to_string()]
        );
    }

    #[test]
    fn test_tolerances_are_distinct() {
        // Deviation of ~0.035 sits between the image and video tolerances
        let dims = Dimensions::new(1000, 1425);
        let target = profile_for(DeviceKey::Mobile);
        let deviation = (dims.ratio().unwrap() - target.ratio).abs();
        assert!(deviation > IMAGE_RATIO_TOLERANCE && deviation < VIDEO_RATIO_TOLERANCE);

        let image = evaluate_image(dims, target);
        assert!(image.warnings.iter().any(|w| w.starts_with("Ratio is")));
        let video = evaluate_video(dims, target);
        assert!(video.warnings.is_empty());
        assert_eq!(video.status, VerdictStatus::Ok);
    }

    #[test]
    fn test_zero_height_is_failure() {
        let verdict = evaluate_image(Dimensions::new(1920, 0), profile_for(DeviceKey::Desktop));
        assert_eq!(verdict.status, VerdictStatus::Error);
        assert_eq!(verdict.warnings, vec!["Unable to read image metadata".to_string()]);
        assert!(verdict.width.is_none() && verdict.height.is_none());
    }

    #[test]
    fn test_summary_lines() {
        let target = profile_for(DeviceKey::Desktop);
        let ok = ValidationVerdict::known(1920, 1080, "16:9");
        assert_eq!(ok.summary(target), vec!["Looks perfect for 16:9 widescreen".to_string()]);

        let failed = ValidationVerdict::failed(MediaKind::Video);
        assert_eq!(failed.summary(target), vec!["Unable to read video metadata".to_string()]);
        assert!(ValidationVerdict::pending().is_loading());
    }

    #[test]
    fn test_verdict_tolerates_sparse_json() {
        let verdict: ValidationVerdict = serde_json::from_str(
            r#"{"warnings":["Unable to read image metadata"],"status":"error"}"#,
        )
        .unwrap();
        assert_eq!(verdict, ValidationVerdict::failed(MediaKind::Image));

        let pending: ValidationVerdict = serde_json::from_str(
            r#"{"loading":true,"warnings":[],"ratioLabel":"","status":"pending"}"#,
        )
        .unwrap();
        assert_eq!(pending, ValidationVerdict::pending());
    }
}
