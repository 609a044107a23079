//! Host-supplied configuration.
//!
//! Every field has a default matching the site markup, so the host may pass
//! `{}` (or nothing) and override only what differs.

use std::num::NonZeroUsize;

use serde::Deserialize;

use crate::error::{FolioError, Result};
use crate::lightbox::DEFAULT_CANCEL_KEY;
use crate::pager::DEFAULT_PAGE_SIZE;

/// Alt text shown in the lightbox when the source image has none.
pub const DEFAULT_FALLBACK_ALT: &str = "Zoomed project image";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub page_size: usize,
    pub cancel_key: String,
    pub fallback_alt: String,
    pub selectors: Selectors,
    pub classes: ClassNames,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            cancel_key: DEFAULT_CANCEL_KEY.to_owned(),
            fallback_alt: DEFAULT_FALLBACK_ALT.to_owned(),
            selectors: Selectors::default(),
            classes: ClassNames::default(),
        }
    }
}

/// Element ids and CSS selectors the web layer queries at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub grid_id: String,
    pub card: String,
    pub tags_attribute: String,
    pub filter_control: String,
    pub filter_attribute: String,
    pub load_more_id: String,
    pub load_hint_id: String,
    pub empty_state_id: String,
    pub lightbox_id: String,
    pub lightbox_image_id: String,
    pub zoomable_image: String,
    pub close_target: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            grid_id: "projectGrid".to_owned(),
            card: ".p-card".to_owned(),
            tags_attribute: "data-tags".to_owned(),
            filter_control: ".pill[data-filter]".to_owned(),
            filter_attribute: "data-filter".to_owned(),
            load_more_id: "loadMoreBtn".to_owned(),
            load_hint_id: "loadHint".to_owned(),
            empty_state_id: "emptyState".to_owned(),
            lightbox_id: "lightbox".to_owned(),
            lightbox_image_id: "lightboxImg".to_owned(),
            zoomable_image: "img.zoomable".to_owned(),
            close_target: "[data-close='true']".to_owned(),
        }
    }
}

/// Presentation classes toggled by the projections.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    pub hidden: String,
    pub active: String,
    pub open: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            hidden: "is-hidden".to_owned(),
            active: "is-active".to_owned(),
            open: "is-open".to_owned(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.page_size()?;
        let fields: [(&'static str, &str); 17] = [
            ("cancel_key", self.cancel_key.as_str()),
            ("fallback_alt", self.fallback_alt.as_str()),
            ("selectors.grid_id", self.selectors.grid_id.as_str()),
            ("selectors.card", self.selectors.card.as_str()),
            ("selectors.tags_attribute", self.selectors.tags_attribute.as_str()),
            ("selectors.filter_control", self.selectors.filter_control.as_str()),
            ("selectors.filter_attribute", self.selectors.filter_attribute.as_str()),
            ("selectors.load_more_id", self.selectors.load_more_id.as_str()),
            ("selectors.load_hint_id", self.selectors.load_hint_id.as_str()),
            ("selectors.empty_state_id", self.selectors.empty_state_id.as_str()),
            ("selectors.lightbox_id", self.selectors.lightbox_id.as_str()),
            ("selectors.lightbox_image_id", self.selectors.lightbox_image_id.as_str()),
            ("selectors.zoomable_image", self.selectors.zoomable_image.as_str()),
            ("selectors.close_target", self.selectors.close_target.as_str()),
            ("classes.hidden", self.classes.hidden.as_str()),
            ("classes.active", self.classes.active.as_str()),
            ("classes.open", self.classes.open.as_str()),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some(&(field, _)) => Err(FolioError::EmptyField { field }),
            None => Ok(()),
        }
    }

    /// Page size as a non-zero count.
    pub fn page_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.page_size).ok_or(FolioError::InvalidPageSize {
            page_size: self.page_size,
        })
    }
}
