//! Motion sampler: accelerometer subscription lifecycle.
//!
//! The sampler owns at most one live [`SampleSubscription`].  Sampling runs
//! if and only if the sensor is available **and** the hosting screen has
//! focus; [`set_focus`](MotionSampler::set_focus) and
//! [`check_availability`](MotionSampler::check_availability) both re-run
//! that rule immediately, so no stale subscription survives a change.
//!
//! | Availability | Focused | Result      |
//! |--------------|---------|-------------|
//! | Available    | yes     | subscribed  |
//! | Available    | no      | paused      |
//! | Unknown      | any     | paused      |
//! | Unavailable  | any     | unsupported |

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::app::events::AppEvent;
use crate::app::notices::Notice;
use crate::app::ports::{AccelerometerPort, EventSink, HostKind, NoticePort, SampleSubscription};
use crate::error::SensorError;

/// One instantaneous accelerometer reading, in gravities.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccelSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl AccelSample {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Shake force: sum of absolute axis readings.
    pub fn force(&self) -> f32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }
}

/// What the sampler knows about the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Not yet checked.
    Unknown,
    Available,
    Unavailable,
}

/// Status line shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShakeStatus {
    /// Subscribed and feeding the detector.
    Active,
    /// Sensor usable but the screen is not focused (or not yet checked).
    Paused,
    /// Sensor missing, unsupported or failed.
    Unavailable,
}

impl ShakeStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active | Self::Paused => "Shake detection enabled",
            Self::Unavailable => "Shake detection not available",
        }
    }
}

pub struct MotionSampler<A: AccelerometerPort> {
    port: A,
    subscription: Option<A::Subscription>,
    availability: Availability,
    focused: bool,
    interval_ms: u32,
}

impl<A: AccelerometerPort> MotionSampler<A> {
    pub fn new(port: A, interval_ms: u32) -> Self {
        Self {
            port,
            subscription: None,
            availability: Availability::Unknown,
            focused: false,
            interval_ms,
        }
    }

    // ── Availability ──────────────────────────────────────────

    /// Query the platform for an accelerometer and apply the lifecycle rule.
    ///
    /// Browser hosts are rejected without a query.  A failed query counts
    /// as unavailable.  Every negative result shows a notice.
    pub async fn check_availability(
        &mut self,
        notices: &mut impl NoticePort,
        sink: &mut impl EventSink,
    ) -> bool {
        let result = if self.port.host() == HostKind::Web {
            Err(SensorError::UnsupportedHost)
        } else {
            match self.port.is_available().await {
                Ok(true) => Ok(()),
                Ok(false) => Err(SensorError::Unavailable),
                Err(e) => {
                    warn!("Accelerometer availability query failed: {}", e);
                    Err(SensorError::QueryFailed)
                }
            }
        };

        match result {
            Ok(()) => {
                info!("Accelerometer available");
                self.availability = Availability::Available;
            }
            Err(e) => {
                self.availability = Availability::Unavailable;
                notices.show(&Notice::from_sensor_error(e));
            }
        }
        sink.emit(&AppEvent::SensorChecked(self.availability));

        self.reconcile(notices, sink);
        self.availability == Availability::Available
    }

    // ── Subscription ──────────────────────────────────────────

    /// Subscribe, replacing any existing subscription first.
    pub fn start(&mut self) -> Result<(), SensorError> {
        if self.availability != Availability::Available {
            return Err(SensorError::Unavailable);
        }
        self.stop();
        let sub = self.port.subscribe(self.interval_ms)?;
        self.subscription = Some(sub);
        debug!("Accelerometer subscribed at {} ms", self.interval_ms);
        Ok(())
    }

    /// Unsubscribe.  No-op when not subscribed.
    pub fn stop(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.remove();
            debug!("Accelerometer unsubscribed");
        }
    }

    // ── Focus ─────────────────────────────────────────────────

    /// Record a screen focus change and start or stop sampling to match.
    pub fn set_focus(
        &mut self,
        focused: bool,
        notices: &mut impl NoticePort,
        sink: &mut impl EventSink,
    ) {
        self.focused = focused;
        self.reconcile(notices, sink);
    }

    /// Forward every buffered sample, in arrival order.
    /// Returns the number forwarded.
    pub fn drain(&mut self, mut forward: impl FnMut(AccelSample)) -> usize {
        let Some(sub) = self.subscription.as_mut() else {
            return 0;
        };
        let mut n = 0;
        while let Some(sample) = sub.try_next() {
            forward(sample);
            n += 1;
        }
        n
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_sampling(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn status(&self) -> ShakeStatus {
        match (self.availability, self.is_sampling()) {
            (Availability::Unavailable, _) => ShakeStatus::Unavailable,
            (_, true) => ShakeStatus::Active,
            _ => ShakeStatus::Paused,
        }
    }

    /// Borrow the underlying adapter.
    pub fn port(&self) -> &A {
        &self.port
    }

    // ── Internal ──────────────────────────────────────────────

    /// Sampling is active iff available AND focused.
    fn reconcile(&mut self, notices: &mut impl NoticePort, sink: &mut impl EventSink) {
        let wanted = self.availability == Availability::Available && self.focused;

        if wanted && !self.is_sampling() {
            match self.start() {
                Ok(()) => sink.emit(&AppEvent::SamplingStarted),
                Err(e) => {
                    warn!("Accelerometer subscribe failed: {}", e);
                    self.availability = Availability::Unavailable;
                    notices.show(&Notice::ShakeInitFailed);
                    sink.emit(&AppEvent::SensorChecked(self.availability));
                }
            }
        } else if !wanted && self.is_sampling() {
            self.stop();
            sink.emit(&AppEvent::SamplingStopped);
        }
    }
}

impl<A: AccelerometerPort> Drop for MotionSampler<A> {
    fn drop(&mut self) {
        self.stop();
    }
}
