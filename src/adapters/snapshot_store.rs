use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::domain::DomainError;
use crate::ports::SnapshotStore;

/// Stores the banner document as `<data_dir>/<storage_key>.json`.
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(data_dir: &Path, storage_key: &str) -> Self {
        Self {
            path: data_dir.join(format!("{}.json", storage_key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn read(&self) -> Result<Option<String>, DomainError> {
        if !self.path.exists() {
            debug!(path = ?self.path, "No stored banner document");
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| DomainError::Persistence(format!("read {}: {}", self.path.display(), e)))?;
        Ok(Some(content))
    }

    fn write(&self, document: &str) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename atomically
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, document)
            .map_err(|e| DomainError::Persistence(format!("write {}: {}", temp_path.display(), e)))?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(DomainError::Persistence(format!(
                "rename to {}: {}",
                self.path.display(),
                e
            )));
        }

        debug!(path = ?self.path, bytes = document.len(), "Banner document saved");
        Ok(())
    }
}

/// In-memory document store for ephemeral sessions.
#[derive(Default)]
pub struct MemorySnapshotStore {
    document: RwLock<Option<String>>,
    reject_writes: AtomicBool,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing document.
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(Some(document.into())),
            reject_writes: AtomicBool::new(false),
        }
    }

    /// Make every subsequent write fail, as a full quota would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
        info!(reject, "MemorySnapshotStore write rejection changed");
    }

    pub fn document(&self) -> Option<String> {
        self.document.read().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn read(&self) -> Result<Option<String>, DomainError> {
        Ok(self.document.read().clone())
    }

    fn write(&self, document: &str) -> Result<(), DomainError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("storage quota exceeded".to_string()));
        }
        *self.document.write() = Some(document.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = env::temp_dir().join("banner_snapshot_test");
        let _ = fs::remove_dir_all(&temp_dir);

        let store = JsonFileSnapshotStore::new(&temp_dir, "fabtcg-banner-config-v1");
        assert!(store.path().ends_with("fabtcg-banner-config-v1.json"));
        assert_eq!(store.read().unwrap(), None);

        store.write(r#"{"title":"Saved"}"#).unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some(r#"{"title":"Saved"}"#));
        assert!(!store.path().with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(&temp_dir);
    }

    #[test]
    fn test_memory_store_rejects_writes() {
        let store = MemorySnapshotStore::with_document("{}");
        store.set_reject_writes(true);
        assert!(matches!(store.write("[]"), Err(DomainError::Persistence(_))));
        assert_eq!(store.document().as_deref(), Some("{}"));

        store.set_reject_writes(false);
        store.write("[]").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("[]"));
    }
}
