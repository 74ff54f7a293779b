//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade, one tagged line per event.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::SensorChecked(availability) => {
                info!("SENSOR | availability={:?}", availability);
            }
            AppEvent::SamplingStarted => info!("SENSOR | sampling started"),
            AppEvent::SamplingStopped => info!("SENSOR | sampling stopped"),
            AppEvent::ShakeDetected(shake) => {
                info!("SHAKE | accepted at={}ms force={:.2}g", shake.at_ms, shake.force_g);
            }
            AppEvent::ShakeDebounced {
                force_g,
                since_last_ms,
            } => {
                info!(
                    "SHAKE | debounced force={:.2}g since_last={}ms",
                    force_g, since_last_ms
                );
            }
            AppEvent::DispatchDropped(shake) => {
                warn!("SHAKE | dropped at={}ms (queue full)", shake.at_ms);
            }
            AppEvent::DispatchFinished(outcome) => {
                info!("SEND | outcome={:?}", outcome);
            }
            AppEvent::EmergencyNumberSaved => info!("CONFIG | emergency number saved"),
        }
    }
}
