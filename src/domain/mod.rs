pub mod banner;
pub mod color;
pub mod error;
pub mod media;
pub mod preview;
pub mod profile;
pub mod settings;
pub mod store;
pub mod verdict;

pub use banner::{Configuration, ConfigurationPatch, TransitionSettings, TransitionStyle};
pub use error::DomainError;
pub use media::{default_slot, MediaKind, MediaSlot, MediaSlotPatch, MediaSlots, SourceType, UploadedFile};
pub use preview::active_media;
pub use profile::{profile_for, profile_for_key, DeviceKey, TargetProfile};
pub use settings::StudioSettings;
pub use store::{load_configuration, ConfigurationStore, ProbeTicket};
pub use verdict::{evaluate, Dimensions, ValidationVerdict, VerdictStatus};
