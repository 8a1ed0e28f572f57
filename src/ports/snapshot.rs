use crate::domain::DomainError;

/// Key-value storage of the persisted banner document.
pub trait SnapshotStore: Send + Sync {
    /// Read the stored document, `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, DomainError>;

    /// Replace the stored document.
    fn write(&self, document: &str) -> Result<(), DomainError>;
}
