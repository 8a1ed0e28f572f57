pub mod ffprobe;
pub mod image_probe;
pub mod settings_store;
pub mod snapshot_store;

pub use ffprobe::FfprobeVideoProbe;
pub use image_probe::ImageHeaderProbe;
pub use settings_store::TomlSettingsStore;
pub use snapshot_store::{JsonFileSnapshotStore, MemorySnapshotStore};
