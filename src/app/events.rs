//! Outbound application events.
//!
//! The service and dispatcher emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them: log to the console, feed analytics, etc.

use crate::detector::ShakeEvent;
use crate::dispatch::DispatchOutcome;
use crate::sampler::Availability;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The accelerometer availability was (re)determined.
    SensorChecked(Availability),

    /// A subscription was created.
    SamplingStarted,

    /// The subscription was removed.
    SamplingStopped,

    /// A shake was accepted and queued for dispatch.
    ShakeDetected(ShakeEvent),

    /// A shake was ignored because of the cooldown window.
    ShakeDebounced { force_g: f32, since_last_ms: u64 },

    /// A shake was accepted but the dispatch queue was full.
    DispatchDropped(ShakeEvent),

    /// A dispatch attempt finished.
    DispatchFinished(DispatchOutcome),

    /// A new emergency number was persisted.
    EmergencyNumberSaved,
}
