use crate::domain::banner::Configuration;
use crate::domain::media::MediaSlot;
use crate::domain::profile::DeviceKey;

/// Choose the media slot shown when previewing on `viewing_device`.
///
/// Mobile gets its own slot unless unified media is switched on; desktop
/// always shows the desktop slot.
pub fn active_media(config: &Configuration, viewing_device: DeviceKey) -> &MediaSlot {
    match viewing_device {
        DeviceKey::Mobile if !config.use_unified_media => &config.media.mobile,
        _ => &config.media.desktop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_distinct_slots(unified: bool) -> Configuration {
        let mut config = Configuration::default();
        config.media.mobile.label = "Mobile art".to_string();
        config.use_unified_media = unified;
        config
    }

    #[test]
    fn test_mobile_uses_own_slot_when_not_unified() {
        let config = config_with_distinct_slots(false);
        assert_eq!(active_media(&config, DeviceKey::Mobile).label, "Mobile art");
    }

    #[test]
    fn test_unified_media_uses_desktop_slot() {
        let config = config_with_distinct_slots(true);
        assert_eq!(active_media(&config, DeviceKey::Mobile), &config.media.desktop);
    }

    #[test]
    fn test_desktop_ignores_flag() {
        for unified in [false, true] {
            let config = config_with_distinct_slots(unified);
            assert_eq!(active_media(&config, DeviceKey::Desktop), &config.media.desktop);
        }
    }
}
