use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::settings::MediaSettings;
use crate::domain::{Dimensions, DomainError, MediaKind, UploadedFile};
use crate::ports::MediaProbe;

/// Reads video dimensions by running `ffprobe` against a scratch copy of the upload.
pub struct FfprobeVideoProbe {
    ffprobe_path: PathBuf,
    timeout: Duration,
    scratch_dir: PathBuf,
    next_id: AtomicU64,
}

impl FfprobeVideoProbe {
    /// Create a probe writing scratch files under the system temp directory.
    pub fn new(settings: &MediaSettings) -> Self {
        Self::with_scratch_dir(settings, std::env::temp_dir())
    }

    pub fn with_scratch_dir(settings: &MediaSettings, scratch_dir: PathBuf) -> Self {
        Self {
            ffprobe_path: PathBuf::from(&settings.ffprobe_path),
            timeout: Duration::from_secs(settings.probe_timeout_secs),
            scratch_dir,
            next_id: AtomicU64::new(0),
        }
    }

    fn scratch_path(&self, file: &UploadedFile) -> PathBuf {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let ext = file.extension().unwrap_or_else(|| "bin".to_string());
        self.scratch_dir
            .join(format!("banner-probe-{}-{}.{}", std::process::id(), id, ext))
    }

    async fn run_ffprobe(&self, path: &Path) -> Result<Dimensions, DomainError> {
        let mut command = Command::new(&self.ffprobe_path);
        command
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=codec_type,width,height",
                "-print_format",
                "json",
            ])
            .arg(path)
            .kill_on_drop(true);

        let out = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                DomainError::decode(
                    MediaKind::Video,
                    format!("ffprobe timed out after {}s", self.timeout.as_secs()),
                )
            })?
            .map_err(|e| DomainError::decode(MediaKind::Video, format!("failed to run ffprobe: {}", e)))?;

        if !out.status.success() {
            return Err(DomainError::decode(
                MediaKind::Video,
                format!("ffprobe failed: {}", String::from_utf8_lossy(&out.stderr).trim()),
            ));
        }

        parse_probe_output(&out.stdout)
    }
}

#[async_trait]
impl MediaProbe for FfprobeVideoProbe {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    async fn probe(&self, file: &UploadedFile) -> Result<Dimensions, DomainError> {
        if file.size() == 0 {
            return Err(DomainError::decode(MediaKind::Video, "file is empty"));
        }

        let scratch = ScratchFile::new(self.scratch_path(file));
        tokio::fs::write(scratch.path(), file.bytes()).await?;
        debug!(path = ?scratch.path(), size = file.size(), "Probing video");

        self.run_ffprobe(scratch.path()).await
    }
}

/// Temporary copy of an upload, removed when dropped.
struct ScratchFile {
    path: PathBuf,
}

impl ScratchFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = ?self.path, error = %e, "Failed to remove probe scratch file");
            }
        }
    }
}

#[derive(Deserialize)]
struct ProbeStream {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct ProbeOut {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

/// Extract the first video stream's dimensions from ffprobe JSON output.
fn parse_probe_output(stdout: &[u8]) -> Result<Dimensions, DomainError> {
    let parsed: ProbeOut = serde_json::from_slice(stdout).map_err(|e| {
        DomainError::decode(MediaKind::Video, format!("ffprobe json parse failed: {}", e))
    })?;

    let stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref().map_or(true, |t| t == "video"))
        .ok_or_else(|| DomainError::decode(MediaKind::Video, "no video stream found"))?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(Dimensions::new(width, height)),
        _ => Err(DomainError::decode(MediaKind::Video, "missing video dimensions from ffprobe")),
    }
}
