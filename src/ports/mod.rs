pub mod probe;
pub mod settings;
pub mod snapshot;

pub use probe::MediaProbe;
pub use settings::SettingsStore;
pub use snapshot::SnapshotStore;
