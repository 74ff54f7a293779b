//! Shake-alert configuration parameters
//!
//! Named constants for the detector and dispatcher, plus the
//! [`ShakeConfig`] bundle built from them at startup.  The values are fixed
//! for the lifetime of a service instance; nothing here is tuned at runtime.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Force (sum of absolute axis readings, in g) a sample must exceed to count
/// as a shake.
pub const THRESHOLD: f32 = 5.0;

/// Minimum time between two accepted shakes, in milliseconds.
pub const TIMEOUT_MS: u64 = 1000;

/// Accelerometer update interval requested on subscribe.
pub const SAMPLE_INTERVAL_MS: u32 = 100;

/// Fixed alert text sent to the emergency contact.
pub const ALERT_MESSAGE: &str = "Emergency! I need help.";

/// Storage namespace for everything this crate persists.
pub const STORAGE_NAMESPACE: &str = "shakealert";

/// Storage slot holding the emergency number.
pub const EMERGENCY_NUMBER_KEY: &str = "numeroEmergencia";

/// Deep-link prefix of the fallback messaging application.
pub const MESSAGING_APP_URL: &str = "whatsapp://send";

/// What to do when the SMS channel cannot deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Open the messaging app pre-filled with number and alert text.
    #[default]
    MessagingApp,
    /// Report failure straight away.
    Disabled,
}

/// Core shake-alert configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShakeConfig {
    // --- Detection ---
    /// Force threshold in g (exclusive)
    pub threshold_g: f32,
    /// Debounce window between accepted shakes (milliseconds)
    pub cooldown_ms: u64,
    /// Requested accelerometer update interval (milliseconds)
    pub sample_interval_ms: u32,

    // --- Dispatch ---
    /// Alert text sent over every channel
    pub alert_message: String,
    /// Behaviour after the SMS channel fails
    pub fallback: FallbackPolicy,
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            threshold_g: THRESHOLD,
            cooldown_ms: TIMEOUT_MS,
            sample_interval_ms: SAMPLE_INTERVAL_MS, // 10 Hz

            alert_message: ALERT_MESSAGE.to_owned(),
            fallback: FallbackPolicy::MessagingApp,
        }
    }
}

impl ShakeConfig {
    /// Reject values that would disable or break detection.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.threshold_g.is_finite() || self.threshold_g <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "threshold_g must be a positive finite number",
            ));
        }
        if self.cooldown_ms == 0 {
            return Err(ConfigError::ValidationFailed("cooldown_ms must be non-zero"));
        }
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "sample_interval_ms must be non-zero",
            ));
        }
        if self.alert_message.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("alert_message must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
