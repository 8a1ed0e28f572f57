use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::domain::{DomainError, UploadedFile};

const LOCATOR_SCHEME_PREFIX: &str = "blob:banner-studio/";

#[derive(Default)]
struct RegistryState {
    next_id: u64,
    live: HashMap<String, Arc<[u8]>>,
}

/// Owns every transient locator handed out for uploaded files.
///
/// Locators look like `blob:banner-studio/<session>/<n>`. The session segment
/// is fresh per registry, so a locator persisted by an earlier run never
/// resolves to another file. A locator stays resolvable until it is released;
/// each one is released at most once, and `release_all` drops whatever is
/// left at teardown.
pub struct LocatorRegistry {
    session: Uuid,
    state: Mutex<RegistryState>,
}

impl Default for LocatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorRegistry {
    pub fn new() -> Self {
        Self {
            session: Uuid::new_v4(),
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Create a locator referencing the file's contents.
    pub fn allocate(&self, file: &UploadedFile) -> Result<Url, DomainError> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let locator = Url::parse(&format!(
            "{}{}/{}",
            LOCATOR_SCHEME_PREFIX,
            self.session.simple(),
            state.next_id
        ))?;
        state.live.insert(locator.to_string(), file.shared_bytes());
        debug!(locator = %locator, file = %file.name, size = file.size(), "Locator allocated");
        Ok(locator)
    }

    /// Contents behind a live locator.
    pub fn resolve(&self, locator: &str) -> Option<Arc<[u8]>> {
        self.state.lock().live.get(locator).cloned()
    }

    /// Whether `locator` was produced by this kind of registry, in any session.
    pub fn is_transient(locator: &str) -> bool {
        locator.starts_with(LOCATOR_SCHEME_PREFIX)
    }

    /// Whether `locator` is a `blob:` URL this registry cannot resolve.
    ///
    /// Such locators come from an earlier session and point at nothing.
    pub fn is_dead(&self, locator: &str) -> bool {
        locator.starts_with("blob:") && !self.state.lock().live.contains_key(locator)
    }

    pub fn live_count(&self) -> usize {
        self.state.lock().live.len()
    }

    /// Release live locators that are not in `referenced`. Returns how many were released.
    pub fn release_except(&self, referenced: &HashSet<&str>) -> usize {
        let mut state = self.state.lock();
        let before = state.live.len();
        state.live.retain(|locator, _| referenced.contains(locator.as_str()));
        let released = before - state.live.len();
        if released > 0 {
            debug!(released, "Unreferenced locators released");
        }
        released
    }

    /// Release every live locator. Returns how many were released.
    pub fn release_all(&self) -> usize {
        let released = {
            let mut state = self.state.lock();
            let count = state.live.len();
            state.live.clear();
            count
        };
        info!(released, "All transient locators released");
        released
    }
}
