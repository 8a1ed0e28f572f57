#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use app::{BannerController, LocatorRegistry, MediaInspector};
pub use domain::{
    active_media, load_configuration, profile_for, profile_for_key, Configuration,
    ConfigurationPatch, ConfigurationStore, DeviceKey, Dimensions, DomainError, MediaKind,
    MediaSlot, MediaSlotPatch, StudioSettings, TargetProfile, UploadedFile, ValidationVerdict,
    VerdictStatus,
};
pub use infrastructure::init_logging;
