//! Single-slot lightbox viewer.
//!
//! Two states, [`ViewerState::Closed`] (initial) and [`ViewerState::Open`].
//! Every transition is total: opening while open replaces the image,
//! closing while closed does nothing.

use tracing::{debug, trace};

/// Key that closes an open viewer unless configured otherwise.
pub const DEFAULT_CANCEL_KEY: &str = "Escape";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewerState {
    #[default]
    Closed,
    Open {
        image_src: String,
        image_alt: String,
    },
}

impl ViewerState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// `(src, alt)` of the shown image, if any.
    #[must_use]
    pub fn image(&self) -> Option<(&str, &str)> {
        match self {
            Self::Closed => None,
            Self::Open {
                image_src,
                image_alt,
            } => Some((image_src.as_str(), image_alt.as_str())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lightbox {
    state: ViewerState,
    cancel_key: String,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new(DEFAULT_CANCEL_KEY)
    }
}

impl Lightbox {
    #[must_use]
    pub fn new(cancel_key: impl Into<String>) -> Self {
        Self {
            state: ViewerState::Closed,
            cancel_key: cancel_key.into(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Background scrolling is suppressed for as long as the viewer is open.
    #[must_use]
    pub const fn scroll_locked(&self) -> bool {
        self.state.is_open()
    }

    /// Show `src`/`alt`, replacing whatever is currently shown.
    pub fn open(&mut self, src: impl Into<String>, alt: impl Into<String>) {
        let image_src = src.into();
        debug!(
            src = %image_src,
            replaced = self.state.is_open(),
            "lightbox opened"
        );
        self.state = ViewerState::Open {
            image_src,
            image_alt: alt.into(),
        };
    }

    /// Close the viewer. Returns `true` if it was open.
    pub fn close(&mut self) -> bool {
        if !self.state.is_open() {
            trace!("lightbox already closed");
            return false;
        }
        self.state = ViewerState::Closed;
        debug!("lightbox closed");
        true
    }

    /// Close on the cancel key while open. Returns `true` if the key closed
    /// the viewer.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key != self.cancel_key || !self.state.is_open() {
            return false;
        }
        self.close()
    }
}
