use std::sync::Arc;

use tracing::{debug, warn};

use crate::adapters::{FfprobeVideoProbe, ImageHeaderProbe};
use crate::domain::settings::MediaSettings;
use crate::domain::{evaluate, MediaKind, TargetProfile, UploadedFile, ValidationVerdict};
use crate::ports::MediaProbe;

/// Turns an uploaded file into a validation verdict against a target profile.
///
/// Inspection never fails: an unreadable file produces an `error` verdict.
#[derive(Clone)]
pub struct MediaInspector {
    image: Arc<dyn MediaProbe>,
    video: Arc<dyn MediaProbe>,
}

impl MediaInspector {
    pub fn new(image: Arc<dyn MediaProbe>, video: Arc<dyn MediaProbe>) -> Self {
        Self { image, video }
    }

    /// Header-based image probing plus ffprobe for video.
    pub fn from_settings(settings: &MediaSettings) -> Self {
        Self::new(
            Arc::new(ImageHeaderProbe::new()),
            Arc::new(FfprobeVideoProbe::new(settings)),
        )
    }

    /// Inspect a file using the probe matching its declared type.
    pub async fn inspect(&self, file: &UploadedFile, target: &TargetProfile) -> ValidationVerdict {
        match file.kind() {
            MediaKind::Image => self.inspect_image(file, target).await,
            MediaKind::Video => self.inspect_video(file, target).await,
        }
    }

    pub async fn inspect_image(&self, file: &UploadedFile, target: &TargetProfile) -> ValidationVerdict {
        Self::run(self.image.as_ref(), file, target).await
    }

    pub async fn inspect_video(&self, file: &UploadedFile, target: &TargetProfile) -> ValidationVerdict {
        Self::run(self.video.as_ref(), file, target).await
    }

    async fn run(probe: &dyn MediaProbe, file: &UploadedFile, target: &TargetProfile) -> ValidationVerdict {
        let kind = probe.kind();
        match probe.probe(file).await {
            Ok(dims) => {
                let verdict = evaluate(kind, dims, target);
                debug!(
                    file = %file.name,
                    target = %target.key,
                    width = dims.width,
                    height = dims.height,
                    status = ?verdict.status,
                    warnings = verdict.warnings.len(),
                    "Media inspected"
                );
                verdict
            }
            Err(e) => {
                warn!(file = %file.name, kind = %kind, error = %e, "Unable to read media metadata");
                ValidationVerdict::failed(kind)
            }
        }
    }
}
