//! Replay platform for the simulator.
//!
//! - [`ReplayAccelerometer`] hands out subscriptions over a shared
//!   [`SampleFeed`].  The driver pushes recorded samples into the feed; they
//!   are buffered only while a subscription is live, exactly like a platform
//!   listener that is not registered simply never fires.
//! - [`SimulatedMessaging`] answers the SMS and URL-open ports with fixed,
//!   configurable results and forwards storage to a [`MemoryStore`].
//! - [`parse_script`] reads the JSON-lines replay script.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::app::ports::{
    AccelerometerPort, HostKind, LinkPort, SampleSubscription, SmsPort, SmsStatus, StorageError,
    StoragePort,
};
use crate::error::{PlatformError, SensorError};
use crate::sampler::AccelSample;

use super::memory_store::MemoryStore;

/// Samples buffered per subscription before the oldest are dropped.
const FEED_CAPACITY: usize = 64;

// ── Sample feed ───────────────────────────────────────────────

#[derive(Default)]
struct FeedState {
    /// Id of the live subscription, if any.
    active: Option<u32>,
    next_id: u32,
    buffer: heapless::Deque<AccelSample, FEED_CAPACITY>,
}

/// Shared sample source.  Clones feed the same accelerometer.
#[derive(Clone, Default)]
pub struct SampleFeed {
    state: Rc<RefCell<FeedState>>,
}

impl SampleFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a sample.  Returns `false` when nobody is listening.
    pub fn push(&self, sample: AccelSample) -> bool {
        let mut state = self.state.borrow_mut();
        if state.active.is_none() {
            return false;
        }
        if state.buffer.is_full() {
            warn!("Sample feed overflow, dropping oldest sample");
            state.buffer.pop_front();
        }
        // Space was just ensured above.
        let _ = state.buffer.push_back(sample);
        true
    }

    /// Live subscriptions (0 or 1).
    pub fn listeners(&self) -> usize {
        usize::from(self.state.borrow().active.is_some())
    }
}

// ── Accelerometer ─────────────────────────────────────────────

pub struct ReplayAccelerometer {
    host: HostKind,
    present: bool,
    feed: SampleFeed,
}

impl ReplayAccelerometer {
    pub fn new(host: HostKind, present: bool, feed: SampleFeed) -> Self {
        Self { host, present, feed }
    }
}

impl AccelerometerPort for ReplayAccelerometer {
    type Subscription = ReplaySubscription;

    fn host(&self) -> HostKind {
        self.host
    }

    async fn is_available(&mut self) -> Result<bool, SensorError> {
        Ok(self.present)
    }

    fn subscribe(&mut self, interval_ms: u32) -> Result<ReplaySubscription, SensorError> {
        if !self.present {
            return Err(SensorError::SubscribeFailed);
        }
        let mut state = self.feed.state.borrow_mut();
        if state.active.is_some() {
            // The sampler replaces subscriptions stop-then-start; a second
            // live listener means that contract was broken.
            return Err(SensorError::SubscribeFailed);
        }
        let id = state.next_id;
        state.next_id = state.next_id.wrapping_add(1);
        state.active = Some(id);
        state.buffer.clear();
        debug!("Replay subscription {} at {} ms", id, interval_ms);
        Ok(ReplaySubscription {
            feed: self.feed.clone(),
            id,
        })
    }
}

pub struct ReplaySubscription {
    feed: SampleFeed,
    id: u32,
}

impl SampleSubscription for ReplaySubscription {
    fn try_next(&mut self) -> Option<AccelSample> {
        let mut state = self.feed.state.borrow_mut();
        if state.active != Some(self.id) {
            return None;
        }
        state.buffer.pop_front()
    }

    fn remove(self) {
        let mut state = self.feed.state.borrow_mut();
        if state.active == Some(self.id) {
            state.active = None;
            state.buffer.clear();
        }
    }
}

// ── Messaging bridge ──────────────────────────────────────────

/// Fixed answers for the SMS and URL-open ports.
#[derive(Debug, Clone, Copy)]
pub struct MessagingBehaviour {
    pub sms_available: bool,
    pub sms_status: SmsStatus,
    pub messaging_app_installed: bool,
}

impl Default for MessagingBehaviour {
    fn default() -> Self {
        Self {
            sms_available: true,
            sms_status: SmsStatus::Sent,
            messaging_app_installed: true,
        }
    }
}

pub struct SimulatedMessaging {
    behaviour: MessagingBehaviour,
    store: MemoryStore,
}

impl SimulatedMessaging {
    pub fn new(behaviour: MessagingBehaviour, store: MemoryStore) -> Self {
        Self { behaviour, store }
    }
}

impl SmsPort for SimulatedMessaging {
    async fn sms_available(&mut self) -> Result<bool, PlatformError> {
        Ok(self.behaviour.sms_available)
    }

    async fn send_sms(&mut self, to: &str, body: &str) -> Result<SmsStatus, PlatformError> {
        info!("SIM | SMS to {}: {:?} -> {:?}", to, body, self.behaviour.sms_status);
        Ok(self.behaviour.sms_status)
    }
}

impl LinkPort for SimulatedMessaging {
    async fn can_open_url(&mut self, _url: &str) -> Result<bool, PlatformError> {
        Ok(self.behaviour.messaging_app_installed)
    }

    async fn open_url(&mut self, url: &str) -> Result<(), PlatformError> {
        if !self.behaviour.messaging_app_installed {
            return Err(PlatformError::LinkFailed);
        }
        info!("SIM | open {}", url);
        Ok(())
    }
}

impl StoragePort for SimulatedMessaging {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        self.store.read(namespace, key, buf)
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        self.store.write(namespace, key, data)
    }

    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError> {
        self.store.delete(namespace, key)
    }

    fn exists(&self, namespace: &str, key: &str) -> bool {
        self.store.exists(namespace, key)
    }
}

// ── Script ────────────────────────────────────────────────────

/// One step of a replay script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Focus { focused: bool },
    Sample { x: f32, y: f32, z: f32 },
    SaveNumber { number: String },
    Unmount,
}

/// A script step with its timestamp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptLine {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

#[derive(Debug)]
pub struct ScriptError {
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for ScriptError {}

/// Parse a JSON-lines script.  Blank lines and `#` comments are skipped.
/// Timestamps must not decrease.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    let mut last_ms = 0;

    for (idx, raw) in text.lines().enumerate() {
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        let line: ScriptLine = serde_json::from_str(raw).map_err(|e| ScriptError {
            line: idx + 1,
            reason: e.to_string(),
        })?;
        if line.at_ms < last_ms {
            return Err(ScriptError {
                line: idx + 1,
                reason: format!("timestamp {} before previous {}", line.at_ms, last_ms),
            });
        }
        last_ms = line.at_ms;
        lines.push(line);
    }
    Ok(lines)
}
