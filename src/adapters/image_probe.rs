use std::io::Cursor;

use async_trait::async_trait;
use image::ImageReader;
use tracing::debug;

use crate::domain::{Dimensions, DomainError, MediaKind, UploadedFile};
use crate::ports::MediaProbe;

/// Reads image dimensions from the encoded header without decoding pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageHeaderProbe;

impl ImageHeaderProbe {
    pub fn new() -> Self {
        Self
    }

    fn read_dimensions(bytes: &[u8]) -> Result<Dimensions, DomainError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DomainError::decode(MediaKind::Image, e.to_string()))?;

        let format = reader.format();
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| DomainError::decode(MediaKind::Image, e.to_string()))?;

        debug!(?format, width, height, "Image header decoded");
        Ok(Dimensions::new(width, height))
    }
}

#[async_trait]
impl MediaProbe for ImageHeaderProbe {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    async fn probe(&self, file: &UploadedFile) -> Result<Dimensions, DomainError> {
        if file.size() == 0 {
            return Err(DomainError::decode(MediaKind::Image, "file is empty"));
        }

        // Header parsing is cheap but still blocking I/O over the buffer
        let bytes = file.shared_bytes();
        tokio::task::spawn_blocking(move || Self::read_dimensions(&bytes))
            .await
            .map_err(|e| DomainError::decode(MediaKind::Image, format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::GrayImage::new(width, height);
        let mut buf = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[tokio::test]
    async fn test_probe_png_dimensions() {
        let file = UploadedFile::new("wide.png", "image/png", png_bytes(64, 36));
        let dims = ImageHeaderProbe::new().probe(&file).await.unwrap();
        assert_eq!(dims, Dimensions::new(64, 36));
    }

    #[tokio::test]
    async fn test_probe_ignores_declared_extension() {
        // Format is sniffed from the bytes, not the name
        let file = UploadedFile::new("photo.jpg", "image/jpeg", png_bytes(8, 12));
        let dims = ImageHeaderProbe::new().probe(&file).await.unwrap();
        assert_eq!(dims, Dimensions::new(8, 12));
    }

    #[tokio::test]
    async fn test_probe_rejects_garbage_and_empty() {
        let probe = ImageHeaderProbe::new();

        let garbage = UploadedFile::new("broken.png", "image/png", b"definitely not an image".to_vec());
        let err = probe.probe(&garbage).await.unwrap_err();
        assert!(matches!(err, DomainError::Decode { kind: MediaKind::Image, .. }));

        let empty = UploadedFile::new("empty.png", "image/png", Vec::new());
        assert!(probe.probe(&empty).await.is_err());
    }
}
