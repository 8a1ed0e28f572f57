use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::domain::banner::{Configuration, ConfigurationPatch};
use crate::domain::media::{default_slot, MediaSlot, MediaSlotPatch, MediaSlots, UploadedFile};
use crate::domain::profile::DeviceKey;
use crate::domain::verdict::ValidationVerdict;
use crate::domain::DomainError;

/// Generation marker captured when a probe is dispatched for a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeTicket {
    pub device: DeviceKey,
    pub generation: u64,
}

/// Owner of the in-memory banner configuration.
///
/// Each media slot carries a generation counter. Uploads and resets advance
/// it, and a probe result is applied only while its ticket still matches.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    config: Configuration,
    generations: [u64; 2],
}

impl Default for ConfigurationStore {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl ConfigurationStore {
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            generations: [0; 2],
        }
    }

    /// Build a store from a persisted document, falling back to defaults.
    pub fn load(persisted: Option<&str>) -> Self {
        Self::new(load_configuration(persisted))
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Shallow-merge top-level fields.
    ///
    /// Replacing `media` wholesale supersedes in-flight probes on both slots.
    pub fn update(&mut self, patch: ConfigurationPatch) -> &Configuration {
        if patch.media.is_some() {
            for device in DeviceKey::ALL {
                self.advance(device);
            }
        }
        self.config.apply(patch);
        &self.config
    }

    /// Shallow-merge into one media slot, leaving the other untouched.
    pub fn update_media(&mut self, device: DeviceKey, patch: MediaSlotPatch) -> &Configuration {
        self.config.media.get_mut(device).apply(patch);
        &self.config
    }

    /// Restore every field to its default, superseding in-flight probes on both slots.
    pub fn reset_all(&mut self) -> &Configuration {
        for device in DeviceKey::ALL {
            self.advance(device);
        }
        self.config = Configuration::default();
        &self.config
    }

    /// Put the built-in media back into a slot. Any pending probe for it is discarded.
    pub fn reset_media(&mut self, device: DeviceKey) -> &MediaSlot {
        self.advance(device);
        let slot = self.config.media.get_mut(device);
        *slot = default_slot(device);
        slot
    }

    /// Assign a freshly selected file to a slot with a pending verdict.
    ///
    /// The returned ticket must accompany the eventual probe result.
    pub fn begin_upload(
        &mut self,
        device: DeviceKey,
        file: &UploadedFile,
        source_locator: String,
    ) -> ProbeTicket {
        let generation = self.advance(device);
        *self.config.media.get_mut(device) = MediaSlot::pending_upload(file, source_locator);
        debug!(device = %device, generation, file = %file.name, "Upload assigned");
        ProbeTicket { device, generation }
    }

    /// Apply a probe result if its ticket is still current. Returns whether it was applied.
    pub fn apply_verdict(&mut self, ticket: ProbeTicket, verdict: ValidationVerdict) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.update_media(ticket.device, MediaSlotPatch::verdict(verdict));
        true
    }

    pub fn is_current(&self, ticket: ProbeTicket) -> bool {
        self.generations[ticket.device.index()] == ticket.generation
    }

    /// Drop references to locators that no longer resolve.
    ///
    /// Slots pointing at a dead locator go back to their default media and the
    /// overlay image is cleared. Returns how many references were dropped.
    pub fn forget_locators(&mut self, is_dead: impl Fn(&str) -> bool) -> usize {
        let mut dropped = 0;
        for device in DeviceKey::ALL {
            if is_dead(&self.config.media.get(device).source_locator) {
                self.reset_media(device);
                dropped += 1;
            }
        }
        if is_dead(&self.config.overlay_image) {
            self.config.overlay_image = Configuration::default().overlay_image;
            dropped += 1;
        }
        if dropped > 0 {
            debug!(dropped, "Dead locators dropped from configuration");
        }
        dropped
    }

    /// Serialize the configuration for persistence.
    pub fn to_json(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string(&self.config)?)
    }

    fn advance(&mut self, device: DeviceKey) -> u64 {
        let generation = &mut self.generations[device.index()];
        *generation += 1;
        *generation
    }
}

/// Merge a persisted document over the defaults.
///
/// Never fails: missing, unparsable or non-object input yields the defaults.
pub fn load_configuration(persisted: Option<&str>) -> Configuration {
    let Some(raw) = persisted else {
        return Configuration::default();
    };

    match merge_persisted(raw) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Unable to load stored banner config, using defaults");
            Configuration::default()
        }
    }
}

/// Field-by-field merge of `raw` over the defaults.
///
/// Persisted top-level fields win when their shape deserializes; unknown
/// fields are ignored. Each media slot is merged independently.
pub fn merge_persisted(raw: &str) -> Result<Configuration, DomainError> {
    let persisted = match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => map,
        other => {
            return Err(DomainError::Serialization(format!(
                "expected a JSON object, found {}",
                json_type(&other)
            )))
        }
    };

    let mut merged = match serde_json::to_value(Configuration::default())? {
        Value::Object(map) => map,
        _ => {
            return Err(DomainError::Serialization(
                "default configuration is not an object".to_string(),
            ))
        }
    };

    let media = merge_media(persisted.get("media"));

    for (key, value) in persisted {
        if key == "media" {
            continue;
        }
        let Some(field) = merged.get_mut(&key) else {
            debug!(field = %key, "Ignoring unknown persisted field");
            continue;
        };
        let previous = std::mem::replace(field, value);
        if serde_json::from_value::<Configuration>(Value::Object(merged.clone())).is_err() {
            warn!(field = %key, "Persisted field has unexpected shape, keeping default");
            merged.insert(key, previous);
        }
    }

    let mut config: Configuration = serde_json::from_value(Value::Object(merged))?;
    config.media = media;
    Ok(config)
}

fn merge_media(persisted: Option<&Value>) -> MediaSlots {
    let slots = persisted.and_then(Value::as_object);
    let pick = |device: DeviceKey| -> MediaSlot {
        let Some(value) = slots.and_then(|m: &Map<String, Value>| m.get(device.as_str())) else {
            return default_slot(device);
        };
        match serde_json::from_value::<MediaSlot>(value.clone()) {
            Ok(slot) => slot,
            Err(e) => {
                warn!(device = %device, error = %e, "Stored media slot is malformed, using default");
                default_slot(device)
            }
        }
    };

    MediaSlots {
        desktop: pick(DeviceKey::Desktop),
        mobile: pick(DeviceKey::Mobile),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
