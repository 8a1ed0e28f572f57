use serde::{Deserialize, Serialize};

use crate::domain::media::MediaSlots;

/// Font families offered in the admin panel.
pub const FONT_OPTIONS: [&str; 6] = [
    "Playfair Display",
    "Inter",
    "Poppins",
    "Montserrat",
    "Space Grotesk",
    "Cormorant Garamond",
];

/// What the overlay surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayType {
    Text,
    Image,
}

impl OverlayType {
    pub const ALL: [OverlayType; 2] = [OverlayType::Text, OverlayType::Image];

    pub fn label(&self) -> &'static str {
        match self {
            OverlayType::Text => "Text + CTA",
            OverlayType::Image => "Image overlay",
        }
    }
}

/// Anchor of the overlay on desktop layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPosition {
    TopLeft,
    TopRight,
    CenterLeft,
    CenterRight,
    BottomLeft,
    BottomRight,
}

impl OverlayPosition {
    pub const ALL: [OverlayPosition; 6] = [
        OverlayPosition::TopLeft,
        OverlayPosition::TopRight,
        OverlayPosition::CenterLeft,
        OverlayPosition::CenterRight,
        OverlayPosition::BottomLeft,
        OverlayPosition::BottomRight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OverlayPosition::TopLeft => "Top left",
            OverlayPosition::TopRight => "Top right",
            OverlayPosition::CenterLeft => "Center left",
            OverlayPosition::CenterRight => "Center right",
            OverlayPosition::BottomLeft => "Bottom left",
            OverlayPosition::BottomRight => "Bottom right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    Center,
    Right,
}

/// Call-to-action button look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Solid,
    Ghost,
    Soft,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 3] = [ButtonStyle::Solid, ButtonStyle::Ghost, ButtonStyle::Soft];

    pub fn label(&self) -> &'static str {
        match self {
            ButtonStyle::Solid => "Solid",
            ButtonStyle::Ghost => "Ghost",
            ButtonStyle::Soft => "Soft gradient",
        }
    }
}

/// Transition from the hero banner into the next page block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionStyle {
    SoftFade,
    Angled,
    Wave,
}

impl TransitionStyle {
    pub const ALL: [TransitionStyle; 3] = [
        TransitionStyle::SoftFade,
        TransitionStyle::Angled,
        TransitionStyle::Wave,
    ];

    /// Option label in the style picker.
    pub fn label(&self) -> &'static str {
        match self {
            TransitionStyle::SoftFade => "Soft fade",
            TransitionStyle::Angled => "Angled slice",
            TransitionStyle::Wave => "Wave flourish",
        }
    }

    /// Heading of the transition showcase.
    pub fn showcase_label(&self) -> &'static str {
        match self {
            TransitionStyle::SoftFade => "Soft fade blend",
            TransitionStyle::Angled => "Angled slice reveal",
            TransitionStyle::Wave => "Wave flourish",
        }
    }

    pub fn detail(&self) -> &'static str {
        match self {
            TransitionStyle::SoftFade => "Ideal for calm content transitions.",
            TransitionStyle::Angled => "Adds energy between sections.",
            TransitionStyle::Wave => "Organic motion for playful drops.",
        }
    }

    /// Short word drawn on the bridge between the two blocks.
    pub fn bridge_label(&self) -> &'static str {
        match self {
            TransitionStyle::SoftFade => "Fade",
            TransitionStyle::Angled => "Slice",
            TransitionStyle::Wave => "Wave",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSettings {
    pub style: TransitionStyle,
    pub color: String,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            style: TransitionStyle::SoftFade,
            color: "#fcd34d".to_string(),
        }
    }
}

/// Every setting of the hero banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub title: String,
    pub subtitle: String,
    pub tagline: String,
    pub overlay_type: OverlayType,
    pub overlay_image: String,
    pub overlay_image_alt: String,
    pub overlay_background: String,
    pub overlay_shadow: bool,
    pub overlay_glow: bool,
    pub overlay_background_blur: u32,
    pub overlay_position_desktop: OverlayPosition,
    pub mobile_text_alignment: TextAlignment,
    pub title_size: u32,
    pub subtitle_size: u32,
    pub tagline_size: u32,
    pub title_font: String,
    pub body_font: String,
    pub text_color: String,
    pub subtitle_color: String,
    pub accent_color: String,
    pub button_text: String,
    pub button_url: String,
    pub button_style: ButtonStyle,
    pub show_overlay_background: bool,
    pub show_overlay_border: bool,
    pub background_tint: String,
    pub transitions: TransitionSettings,
    pub use_unified_media: bool,
    pub video_autoplay: bool,
    pub video_muted: bool,
    pub allow_video_sound: bool,
    pub mobile_overlay_inset: u32,
    pub admin_notes: String,
    pub media: MediaSlots,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            title: "Monarch: Prism Ascendant".to_string(),
            subtitle: "First edition cold foil hero drop".to_string(),
            tagline: "Featured product".to_string(),
            overlay_type: OverlayType::Text,
            overlay_image: String::new(),
            overlay_image_alt: "Overlay graphic".to_string(),
            overlay_background: "rgba(15, 23, 42, 0.72)".to_string(),
            overlay_shadow: true,
            overlay_glow: true,
            overlay_background_blur: 18,
            overlay_position_desktop: OverlayPosition::BottomLeft,
            mobile_text_alignment: TextAlignment::Center,
            title_size: 54,
            subtitle_size: 22,
            tagline_size: 14,
            title_font: "Playfair Display".to_string(),
            body_font: "Inter".to_string(),
            text_color: "#ffffff".to_string(),
            subtitle_color: "#e2e8f0".to_string(),
            accent_color: "#fcd34d".to_string(),
            button_text: "Explore drop".to_string(),
            button_url: "https://fabtcg.com/products".to_string(),
            button_style: ButtonStyle::Solid,
            show_overlay_background: true,
            show_overlay_border: false,
            background_tint: "rgba(2, 6, 23, 0.35)".to_string(),
            transitions: TransitionSettings::default(),
            use_unified_media: false,
            video_autoplay: true,
            video_muted: true,
            allow_video_sound: false,
            mobile_overlay_inset: 16,
            admin_notes: "Swap hero art when releases change. Use mobile preview before publishing."
                .to_string(),
            media: MediaSlots::default(),
        }
    }
}

/// Top-level fields to shallow-merge into a [`Configuration`].
///
/// `media` replaces both slots wholesale; per-slot edits go through
/// `ConfigurationStore::update_media`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub overlay_type: Option<OverlayType>,
    pub overlay_image: Option<String>,
    pub overlay_image_alt: Option<String>,
    pub overlay_background: Option<String>,
    pub overlay_shadow: Option<bool>,
    pub overlay_glow: Option<bool>,
    pub overlay_background_blur: Option<u32>,
    pub overlay_position_desktop: Option<OverlayPosition>,
    pub mobile_text_alignment: Option<TextAlignment>,
    pub title_size: Option<u32>,
    pub subtitle_size: Option<u32>,
    pub tagline_size: Option<u32>,
    pub title_font: Option<String>,
    pub body_font: Option<String>,
    pub text_color: Option<String>,
    pub subtitle_color: Option<String>,
    pub accent_color: Option<String>,
    pub button_text: Option<String>,
    pub button_url: Option<String>,
    pub button_style: Option<ButtonStyle>,
    pub show_overlay_background: Option<bool>,
    pub show_overlay_border: Option<bool>,
    pub background_tint: Option<String>,
    pub transitions: Option<TransitionSettings>,
    pub use_unified_media: Option<bool>,
    pub video_autoplay: Option<bool>,
    pub video_muted: Option<bool>,
    pub allow_video_sound: Option<bool>,
    pub mobile_overlay_inset: Option<u32>,
    pub admin_notes: Option<String>,
    pub media: Option<MediaSlots>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = value;
            }
        )+
    };
}

impl Configuration {
    /// Shallow-merge every field present in `patch`.
    pub fn apply(&mut self, patch: ConfigurationPatch) {
        merge_fields!(
            self,
            patch,
            title,
            subtitle,
            tagline,
            overlay_type,
            overlay_image,
            overlay_image_alt,
            overlay_background,
            overlay_shadow,
            overlay_glow,
            overlay_background_blur,
            overlay_position_desktop,
            mobile_text_alignment,
            title_size,
            subtitle_size,
            tagline_size,
            title_font,
            body_font,
            text_color,
            subtitle_color,
            accent_color,
            button_text,
            button_url,
            button_style,
            show_overlay_background,
            show_overlay_border,
            background_tint,
            transitions,
            use_unified_media,
            video_autoplay,
            video_muted,
            allow_video_sound,
            mobile_overlay_inset,
            admin_notes,
            media,
        );
    }

    /// Whether the preview video should play muted.
    pub fn effective_video_muted(&self) -> bool {
        self.video_muted || !self.allow_video_sound
    }
}
