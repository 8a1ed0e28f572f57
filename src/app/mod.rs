pub mod controller;
pub mod inspector;
pub mod locators;

pub use controller::BannerController;
pub use inspector::MediaInspector;
pub use locators::LocatorRegistry;
