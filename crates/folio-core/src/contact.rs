//! Contact page helper.
//!
//! Submission itself is left to the browser; this module only decides
//! whether to show the "sending" state and drives the copy-email toast.

use tracing::debug;

/// How long a toast stays visible.
pub const TOAST_DURATION_MS: f64 = 2200.0;

pub const COPY_SUCCESS_MESSAGE: &str = "Email copied!";
pub const COPY_FAILURE_MESSAGE: &str = "Copy not supported on this device.";

/// Label shown on the submit button while the form is sending.
pub const SENDING_LABEL: &str = "Sending...";
pub const LOADING_CLASS: &str = "is-loading";

/// A filled honeypot field means the form was completed by a bot.
#[must_use]
pub fn honeypot_tripped(value: &str) -> bool {
    !value.trim().is_empty()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactForm {
    state: SubmitState,
}

impl ContactForm {
    #[must_use]
    pub const fn state(&self) -> SubmitState {
        self.state
    }

    /// Handle a submit. Never blocks the native submission.
    ///
    /// Returns `true` when the submit button should switch to its loading
    /// state; a tripped honeypot or a repeated submit leaves it untouched.
    pub fn on_submit(&mut self, honeypot: &str) -> bool {
        if honeypot_tripped(honeypot) {
            debug!("contact honeypot filled; skipping loading state");
            return false;
        }
        if self.state == SubmitState::Sending {
            return false;
        }
        self.state = SubmitState::Sending;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Unsupported,
}

impl CopyOutcome {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Copied => COPY_SUCCESS_MESSAGE,
            Self::Unsupported => COPY_FAILURE_MESSAGE,
        }
    }
}

/// Transient notification. Time is supplied by the host in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Toast {
    message: Option<String>,
    hide_at_ms: f64,
}

impl Toast {
    /// Show `message`, restarting the timer if a toast is already up.
    pub fn show(&mut self, message: impl Into<String>, now_ms: f64) {
        self.message = Some(message.into());
        self.hide_at_ms = now_ms + TOAST_DURATION_MS;
    }

    #[must_use]
    pub fn is_visible(&self, now_ms: f64) -> bool {
        self.message.is_some() && now_ms < self.hide_at_ms
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Timestamp at which the toast should be hidden.
    #[must_use]
    pub const fn hide_at_ms(&self) -> f64 {
        self.hide_at_ms
    }

    /// Milliseconds until the toast hides, zero once it has expired.
    #[must_use]
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        if self.is_visible(now_ms) {
            self.hide_at_ms - now_ms
        } else {
            0.0
        }
    }
}
