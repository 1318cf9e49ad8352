//! Mobile UI configuration
//!
//! Defaults match the markup every page ships with. A page may override any
//! subset through a JSON blob; missing keys keep their defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SiteError, SiteResult};

/// Widest viewport (logical px) that still gets mobile behavior
pub const MOBILE_BREAKPOINT: u32 = 768;

/// Quiet period after the last scroll before the slide index is recomputed
pub const SETTLE_WINDOW_MS: u64 = 100;

/// Minimum vertical travel (px) for a touch to count as a swipe
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Background layer speed relative to the scroll
pub const PARALLAX_SPEED: f64 = 0.5;

/// Tunables and DOM anchors for the mobile controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub breakpoint: u32,
    pub settle_ms: u64,
    pub swipe_threshold: f64,
    pub parallax_speed: f64,
    /// Style flag toggled on overlays, menu button and indicators
    pub active_class: String,
    pub selectors: Selectors,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            breakpoint: MOBILE_BREAKPOINT,
            settle_ms: SETTLE_WINDOW_MS,
            swipe_threshold: SWIPE_THRESHOLD,
            parallax_speed: PARALLAX_SPEED,
            active_class: "active".to_string(),
            selectors: Selectors::default(),
        }
    }
}

impl UiConfig {
    /// Parse and validate a JSON override.
    pub fn from_json(json: &str) -> SiteResult<Self> {
        let config: UiConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a page override, falling back to defaults when it is unusable.
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring config override, using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json_pretty(&self) -> SiteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn settle_window(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Reject values the controller cannot act on.
    pub fn validate(&self) -> SiteResult<()> {
        if self.breakpoint == 0 {
            return Err(SiteError::InvalidConfig(
                "breakpoint must be greater than zero".to_string(),
            ));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(SiteError::InvalidConfig(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        if !self.parallax_speed.is_finite() {
            return Err(SiteError::InvalidConfig(
                "parallax_speed must be finite".to_string(),
            ));
        }
        if self.active_class.trim().is_empty() {
            return Err(SiteError::InvalidConfig(
                "active_class must not be empty".to_string(),
            ));
        }
        if let Some(name) = self.selectors.first_empty() {
            return Err(SiteError::InvalidConfig(format!(
                "selector '{}' must not be empty",
                name
            )));
        }
        Ok(())
    }
}

/// CSS selectors for every anchor the controller looks up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub menu_button: String,
    pub nav_overlay: String,
    pub popup: String,
    pub popup_name: String,
    pub popup_info: String,
    pub popup_desc: String,
    pub popup_content: String,
    pub gallery_images: String,
    pub image_popup: String,
    pub large_image: String,
    pub cards: String,
    pub slides_container: String,
    pub slide: String,
    pub slide_background: String,
    pub indicator: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            menu_button: "#mobile-menu-btn".to_string(),
            nav_overlay: "#mobile-nav".to_string(),
            popup: "#mobile-popup".to_string(),
            popup_name: ".popup-name-mobile".to_string(),
            popup_info: ".popup-info-mobile".to_string(),
            popup_desc: ".popup-desc-mobile".to_string(),
            popup_content: ".popup-content-mobile".to_string(),
            gallery_images: ".popup-gallery-img-mobile".to_string(),
            image_popup: "#mobile-image-popup".to_string(),
            large_image: "#mobile-large-img".to_string(),
            cards: ".party-card, .figure-card".to_string(),
            slides_container: ".slides-container".to_string(),
            slide: ".slide".to_string(),
            slide_background: ".slide-bg".to_string(),
            indicator: ".indicator".to_string(),
        }
    }
}

impl Selectors {
    fn first_empty(&self) -> Option<&'static str> {
        [
            ("menu_button", &self.menu_button),
            ("nav_overlay", &self.nav_overlay),
            ("popup", &self.popup),
            ("popup_name", &self.popup_name),
            ("popup_info", &self.popup_info),
            ("popup_desc", &self.popup_desc),
            ("popup_content", &self.popup_content),
            ("gallery_images", &self.gallery_images),
            ("image_popup", &self.image_popup),
            ("large_image", &self.large_image),
            ("cards", &self.cards),
            ("slides_container", &self.slides_container),
            ("slide", &self.slide),
            ("slide_background", &self.slide_background),
            ("indicator", &self.indicator),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}
