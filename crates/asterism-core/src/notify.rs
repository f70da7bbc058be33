//! Transient, non-blocking on-screen messages.
//!
//! Only one message is visible at a time; showing a new one replaces it. The
//! timeline below is sampled by the front-end every frame.

use crate::constants::{
    NOTIFY_FADE_IN_DELAY_MS, NOTIFY_FADE_OUT_START_MS, NOTIFY_HIDDEN_SCALE, NOTIFY_SHOWN_SCALE,
    NOTIFY_TRANSITION_MS,
};
use crate::tween::ease_out_quad;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
        }
    }

    /// CSS background color.
    pub fn background(self) -> &'static str {
        match self {
            Severity::Info => "rgba(60, 140, 255, 0.85)",
            Severity::Success => "rgba(40, 180, 99, 0.85)",
            Severity::Warning => "rgba(255, 165, 0, 0.85)",
        }
    }

    /// CSS text color.
    pub fn foreground(self) -> &'static str {
        match self {
            Severity::Info => "#E0F0FF",
            Severity::Success => "#E0F8E0",
            Severity::Warning => "#FFF8E0",
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Appearance of a message `age_ms` after it was shown.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotificationLook {
    pub opacity: f32,
    pub scale: f32,
}

/// Total time a message stays in the document.
pub const NOTIFY_LIFETIME_MS: f64 = NOTIFY_FADE_OUT_START_MS + NOTIFY_TRANSITION_MS;

/// `None` once the message should be removed.
pub fn notification_look(age_ms: f64) -> Option<NotificationLook> {
    let fade_in_end = NOTIFY_FADE_IN_DELAY_MS + NOTIFY_TRANSITION_MS;
    let look = if age_ms < NOTIFY_FADE_IN_DELAY_MS {
        NotificationLook {
            opacity: 0.0,
            scale: 1.0,
        }
    } else if age_ms < fade_in_end {
        let k = ease_out_quad(((age_ms - NOTIFY_FADE_IN_DELAY_MS) / NOTIFY_TRANSITION_MS) as f32);
        NotificationLook {
            opacity: k,
            scale: 1.0 + (NOTIFY_SHOWN_SCALE - 1.0) * k,
        }
    } else if age_ms < NOTIFY_FADE_OUT_START_MS {
        NotificationLook {
            opacity: 1.0,
            scale: NOTIFY_SHOWN_SCALE,
        }
    } else if age_ms < NOTIFY_LIFETIME_MS {
        let k = ease_out_quad(((age_ms - NOTIFY_FADE_OUT_START_MS) / NOTIFY_TRANSITION_MS) as f32);
        NotificationLook {
            opacity: 1.0 - k,
            scale: NOTIFY_SHOWN_SCALE + (NOTIFY_HIDDEN_SCALE - NOTIFY_SHOWN_SCALE) * k,
        }
    } else {
        return None;
    };
    Some(look)
}
