//! User-visible notices.
//!
//! Every failure path of the shake-alert feature ends in one of these,
//! shown through the [`NoticePort`](super::ports::NoticePort).  Each
//! dispatch outcome maps to its own variant so the user can always tell
//! which channel worked, or that none did.

use crate::error::SensorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    // ── Sensor ────────────────────────────────────────────
    /// Browser-hosted build; shake detection cannot work.
    ShakeUnsupportedHost,
    /// Device has no accelerometer.
    ShakeUnavailable,
    /// Availability query failed.
    ShakeCheckFailed,
    /// Subscribing to the accelerometer failed.
    ShakeInitFailed,

    // ── Dispatch ──────────────────────────────────────────
    AlertSentSms,
    AlertSentMessagingApp,
    AlertFailed,
    NoEmergencyNumber,
    /// A shake was accepted while earlier alerts were still pending.
    AlertDropped,

    // ── Emergency number settings ─────────────────────────
    NumberSaved,
    NumberInvalid,
    NumberSaveFailed,
}

impl Notice {
    pub(crate) fn from_sensor_error(e: SensorError) -> Self {
        match e {
            SensorError::UnsupportedHost => Self::ShakeUnsupportedHost,
            SensorError::Unavailable => Self::ShakeUnavailable,
            SensorError::QueryFailed => Self::ShakeCheckFailed,
            SensorError::SubscribeFailed => Self::ShakeInitFailed,
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::AlertSentSms | Self::AlertSentMessagingApp | Self::NumberSaved => {
                Severity::Success
            }
            Self::ShakeUnsupportedHost | Self::ShakeUnavailable => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn title(self) -> &'static str {
        match self.severity() {
            Severity::Success => "Success",
            Severity::Warning => "Notice",
            Severity::Error => "Error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::ShakeUnsupportedHost => "Shake detection is not available in web environments.",
            Self::ShakeUnavailable => "Shake detection is not available on this device.",
            Self::ShakeCheckFailed => "Could not check whether shake detection is available.",
            Self::ShakeInitFailed => "Could not start the shake detector.",
            Self::AlertSentSms => "Emergency message sent by SMS.",
            Self::AlertSentMessagingApp => "Emergency message sent by WhatsApp.",
            Self::AlertFailed => "Could not send the emergency message.",
            Self::NoEmergencyNumber => "No emergency number configured.",
            Self::AlertDropped => "Emergency alerts are still being sent. Shake again shortly.",
            Self::NumberSaved => "Emergency number saved.",
            Self::NumberInvalid => "Please enter a valid 10-digit phone number.",
            Self::NumberSaveFailed => "Could not save the emergency number.",
        }
    }
}
