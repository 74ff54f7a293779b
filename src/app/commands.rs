//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (screen
//! lifecycle, the settings form) that the
//! [`ShakeAlertService`](super::service::ShakeAlertService) interprets.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// The home screen gained (`true`) or lost (`false`) user focus.
    FocusChanged(bool),

    /// The home screen is being torn down; release the sensor.
    Unmount,

    /// Validate and persist a new emergency number from the settings form.
    SaveEmergencyNumber(String),
}
