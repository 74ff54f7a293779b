//! Application service: the hexagonal core of the home screen.
//!
//! [`ShakeAlertService`] owns the motion sampler and the shake detector.
//! It turns buffered accelerometer samples into queued dispatch requests
//! and reacts to screen lifecycle commands.  Dispatching itself happens on
//! the other side of the [`DispatchQueue`], so a slow send never stalls
//! sample processing.
//!
//! ```text
//!  AccelerometerPort ──▶ ┌──────────────────────┐ ──▶ DispatchQueue ──▶ Dispatcher
//!                        │  ShakeAlertService   │
//!        ClockPort ────▶ │  Sampler · Detector  │ ──▶ EventSink / NoticePort
//!                        └──────────────────────┘
//! ```

use log::{info, warn};

use crate::config::ShakeConfig;
use crate::contact::EmergencyContactStore;
use crate::detector::{ShakeDecision, ShakeDetector};
use crate::dispatch::DispatchQueue;
use crate::error::ContactError;
use crate::sampler::{MotionSampler, ShakeStatus};

use super::commands::AppCommand;
use super::events::AppEvent;
use super::notices::Notice;
use super::ports::{AccelerometerPort, ClockPort, EventSink, NoticePort, StoragePort};

// ───────────────────────────────────────────────────────────────
// ShakeAlertService
// ───────────────────────────────────────────────────────────────

pub struct ShakeAlertService<A: AccelerometerPort> {
    sampler: MotionSampler<A>,
    detector: ShakeDetector,
    samples_seen: u64,
}

impl<A: AccelerometerPort> ShakeAlertService<A> {
    /// Construct the service.  Sampling does not begin until [`start`]
    /// has confirmed the sensor and the screen reports focus.
    ///
    /// [`start`]: Self::start
    pub fn new(config: &ShakeConfig, accelerometer: A) -> Self {
        Self {
            sampler: MotionSampler::new(accelerometer, config.sample_interval_ms),
            detector: ShakeDetector::new(config),
            samples_seen: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Check sensor availability (once per screen mount).
    pub async fn start(
        &mut self,
        notices: &mut impl NoticePort,
        sink: &mut impl EventSink,
    ) -> ShakeStatus {
        self.sampler.check_availability(notices, sink).await;
        let status = self.sampler.status();
        info!("ShakeAlertService started: {}", status.label());
        status
    }

    // ── Per-tick processing ───────────────────────────────────

    /// Drain buffered samples through the detector, queueing every accepted
    /// shake.  Returns the number of shakes queued for dispatch.
    ///
    /// A shake that finds the queue full is dropped and the user is told.
    pub fn tick(
        &mut self,
        clock: &impl ClockPort,
        requests: &DispatchQueue,
        notices: &mut impl NoticePort,
        sink: &mut impl EventSink,
    ) -> usize {
        let detector = &mut self.detector;
        let mut queued = 0;

        let drained = self.sampler.drain(|sample| {
            match detector.process(sample, clock.now_ms()) {
                ShakeDecision::Still => {}
                ShakeDecision::Debounced {
                    force_g,
                    since_last_ms,
                } => sink.emit(&AppEvent::ShakeDebounced {
                    force_g,
                    since_last_ms,
                }),
                ShakeDecision::Shake(event) => {
                    if requests.try_send(event).is_ok() {
                        queued += 1;
                        sink.emit(&AppEvent::ShakeDetected(event));
                    } else {
                        warn!("Dispatch queue full, dropping shake at {} ms", event.at_ms);
                        notices.show(&Notice::AlertDropped);
                        sink.emit(&AppEvent::DispatchDropped(event));
                    }
                }
            }
        });

        self.samples_seen += drained as u64;
        queued
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a lifecycle or settings command.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        storage: &mut impl StoragePort,
        notices: &mut impl NoticePort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::FocusChanged(focused) => {
                self.sampler.set_focus(focused, notices, sink);
            }
            AppCommand::Unmount => {
                self.sampler.set_focus(false, notices, sink);
                info!("Home screen unmounted");
            }
            AppCommand::SaveEmergencyNumber(input) => {
                match EmergencyContactStore::save(storage, &input) {
                    Ok(_) => {
                        notices.show(&Notice::NumberSaved);
                        sink.emit(&AppEvent::EmergencyNumberSaved);
                    }
                    Err(ContactError::Storage(e)) => {
                        warn!("Emergency number save failed: {}", e);
                        notices.show(&Notice::NumberSaveFailed);
                    }
                    Err(e) => {
                        info!("Emergency number rejected: {}", e);
                        notices.show(&Notice::NumberInvalid);
                    }
                }
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> ShakeStatus {
        self.sampler.status()
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_sampling()
    }

    /// Samples processed since construction.
    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }

    /// Shakes accepted since construction.
    pub fn shakes_accepted(&self) -> u32 {
        self.detector.accepted_count()
    }

    pub fn sampler(&self) -> &MotionSampler<A> {
        &self.sampler
    }
}
