use async_trait::async_trait;

use crate::domain::{Dimensions, DomainError, MediaKind, UploadedFile};

/// Port for reading the intrinsic pixel dimensions of a media file.
///
/// Implementations decode only as much of the file as they need and must
/// release any temporary resource they create, on success and failure alike.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Kind of media this probe understands.
    fn kind(&self) -> MediaKind;

    /// Read width and height from the file.
    async fn probe(&self, file: &UploadedFile) -> Result<Dimensions, DomainError>;
}
