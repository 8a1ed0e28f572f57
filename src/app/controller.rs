use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{JsonFileSnapshotStore, TomlSettingsStore};
use crate::app::{LocatorRegistry, MediaInspector};
use crate::domain::banner::ConfigurationPatch;
use crate::domain::color::hex_to_rgba;
use crate::domain::{
    active_media, profile_for, Configuration, ConfigurationStore, DeviceKey, DomainError,
    MediaSlot, MediaSlotPatch, UploadedFile,
};
use crate::infrastructure::init_logging;
use crate::ports::{SettingsStore, SnapshotStore};

/// Alpha applied to the overlay background colour picker.
const OVERLAY_BACKGROUND_ALPHA: f32 = 0.7;

/// Alpha applied to the media tint colour picker.
const BACKGROUND_TINT_ALPHA: f32 = 0.35;

/// Application controller that owns the banner state and orchestrates media uploads.
pub struct BannerController {
    store: RwLock<ConfigurationStore>,
    snapshots: Arc<dyn SnapshotStore>,
    inspector: MediaInspector,
    locators: LocatorRegistry,
    persist_lock: Mutex<()>,
    _log_guard: Option<WorkerGuard>,
}

impl BannerController {
    /// Initialize the controller from the user's settings and stored document.
    /// This sets up settings, logging, persistence and media probing.
    pub fn new() -> Result<Self, DomainError> {
        // Step 1: Initialize settings store
        let settings_store = TomlSettingsStore::new()?;

        // Step 2: Load settings
        let settings = settings_store.load()?;

        // Step 3: Initialize logging
        let log_guard = init_logging(
            &settings_store.logs_dir(),
            &settings.logging.level,
            settings.logging.file_logging,
            settings.logging.max_files as usize,
        )?;

        info!("Banner Studio starting up");

        // Step 4: Wire persistence and probes
        let data_dir = settings
            .storage
            .data_dir
            .clone()
            .unwrap_or_else(|| settings_store.data_dir());
        let snapshots = Arc::new(JsonFileSnapshotStore::new(&data_dir, &settings.storage.storage_key));
        let inspector = MediaInspector::from_settings(&settings.media);

        let mut controller = Self::with_parts(snapshots, inspector);
        controller._log_guard = log_guard;

        info!(data_dir = ?data_dir, "BannerController initialized");
        Ok(controller)
    }

    /// Build a controller from explicit collaborators, restoring the stored document.
    pub fn with_parts(snapshots: Arc<dyn SnapshotStore>, inspector: MediaInspector) -> Self {
        let persisted = match snapshots.read() {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Unable to read stored banner config");
                None
            }
        };

        // Uploads from an earlier session left locators nothing can resolve
        let locators = LocatorRegistry::new();
        let mut store = ConfigurationStore::load(persisted.as_deref());
        let dropped = store.forget_locators(|locator| locators.is_dead(locator));
        if dropped > 0 {
            info!(dropped, "Restored configuration referenced expired uploads");
        }

        Self {
            store: RwLock::new(store),
            snapshots,
            inspector,
            locators,
            persist_lock: Mutex::new(()),
            _log_guard: None,
        }
    }

    /// Get the current configuration.
    pub fn config(&self) -> Configuration {
        self.store.read().config().clone()
    }

    /// Shallow-merge top-level fields.
    pub fn update(&self, patch: ConfigurationPatch) -> Configuration {
        let config = self.store.write().update(patch).clone();
        self.persist();
        config
    }

    /// Shallow-merge into one media slot.
    pub fn update_media(&self, device: DeviceKey, patch: MediaSlotPatch) -> Configuration {
        let config = self.store.write().update_media(device, patch).clone();
        self.persist();
        config
    }

    /// Restore the recommended defaults.
    pub fn reset_all(&self) -> Configuration {
        let config = self.store.write().reset_all().clone();
        info!("Configuration reset to defaults");
        self.persist();
        config
    }

    /// Put the built-in media back into a slot.
    pub fn reset_media(&self, device: DeviceKey) -> MediaSlot {
        let slot = self.store.write().reset_media(device).clone();
        info!(device = %device, "Media reset to default");
        self.persist();
        slot
    }

    /// Assign an uploaded file to a slot and start probing it.
    ///
    /// The slot shows a pending verdict immediately. The returned task resolves
    /// to whether its verdict was applied; it is discarded when a newer upload
    /// or a reset reached the same slot first. Must be called within a Tokio runtime.
    ///
    /// Once a verdict is applied, locators the configuration no longer references
    /// are released. Every other locator lives until `release_unreferenced` or `shutdown`.
    pub fn upload_media(
        self: &Arc<Self>,
        device: DeviceKey,
        file: UploadedFile,
    ) -> Result<JoinHandle<bool>, DomainError> {
        let locator = self.locators.allocate(&file)?;
        let ticket = self
            .store
            .write()
            .begin_upload(device, &file, locator.to_string());
        info!(
            device = %device,
            file = %file.name,
            kind = %file.kind(),
            size = file.size(),
            generation = ticket.generation,
            "Media upload started"
        );
        self.persist();

        let controller = Arc::clone(self);
        Ok(tokio::spawn(async move {
            let verdict = controller.inspector.inspect(&file, profile_for(device)).await;
            let applied = controller.store.write().apply_verdict(ticket, verdict);
            if applied {
                let writer = Arc::clone(&controller);
                if let Err(e) = tokio::task::spawn_blocking(move || writer.persist()).await {
                    warn!(error = %e, "Persist task failed");
                }
                controller.release_unreferenced();
            }
            applied
        }))
    }

    /// Use an uploaded image as the overlay graphic.
    pub fn upload_overlay_image(&self, file: UploadedFile) -> Result<Configuration, DomainError> {
        let locator = self.locators.allocate(&file)?;
        debug!(file = %file.name, locator = %locator, "Overlay image uploaded");
        Ok(self.update(ConfigurationPatch {
            overlay_image: Some(locator.to_string()),
            overlay_image_alt: Some(file.name),
            ..Default::default()
        }))
    }

    /// Set the overlay background from a colour picker value.
    pub fn set_overlay_background_hex(&self, hex: &str) -> Result<Configuration, DomainError> {
        let rgba = hex_to_rgba(hex, OVERLAY_BACKGROUND_ALPHA)?;
        Ok(self.update(ConfigurationPatch {
            overlay_background: Some(rgba),
            ..Default::default()
        }))
    }

    /// Set the media tint from a colour picker value.
    pub fn set_background_tint_hex(&self, hex: &str) -> Result<Configuration, DomainError> {
        let rgba = hex_to_rgba(hex, BACKGROUND_TINT_ALPHA)?;
        Ok(self.update(ConfigurationPatch {
            background_tint: Some(rgba),
            ..Default::default()
        }))
    }

    /// Media shown when previewing on the given device.
    pub fn active_media(&self, viewing_device: DeviceKey) -> MediaSlot {
        active_media(self.store.read().config(), viewing_device).clone()
    }

    /// Contents behind a transient locator, for the preview surface.
    pub fn resolve_locator(&self, locator: &str) -> Option<Arc<[u8]>> {
        self.locators.resolve(locator)
    }

    /// Release locators no longer referenced by the configuration.
    ///
    /// Call after the preview has rendered the current configuration.
    pub fn release_unreferenced(&self) -> usize {
        let store = self.store.read();
        let config = store.config();
        let referenced: HashSet<&str> = [
            config.media.desktop.source_locator.as_str(),
            config.media.mobile.source_locator.as_str(),
            config.overlay_image.as_str(),
        ]
        .into_iter()
        .filter(|locator| LocatorRegistry::is_transient(locator))
        .collect();
        self.locators.release_except(&referenced)
    }

    /// Release every transient locator. Returns how many were released.
    pub fn shutdown(&self) -> usize {
        let released = self.locators.release_all();
        info!(released, "BannerController shut down");
        released
    }

    /// Write the current configuration. Failures are logged and never roll back the change.
    ///
    /// Blocks on the snapshot store; async callers go through `spawn_blocking`.
    fn persist(&self) {
        let _ordered = self.persist_lock.lock();
        let document = match self.store.read().to_json() {
            Ok(document) => document,
            Err(e) => {
                warn!(error = %e, "Unable to serialize banner config");
                return;
            }
        };
        if let Err(e) = self.snapshots.write(&document) {
            warn!(error = %e, "Unable to persist banner config");
        }
    }
}
