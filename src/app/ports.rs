//! Port traits: the hexagonal boundary between domain logic and the mobile platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ShakeAlertService / Dispatcher (domain)
//! ```
//!
//! Driven adapters (accelerometer, SMS composer, URL opener, key-value
//! storage, notices, event sinks) implement these traits.  The domain
//! consumes them via generics, so it never touches a platform API directly.
//!
//! The SMS and link ports are `async`: those calls hand control to another
//! app and may take seconds.  Everything else is synchronous.

use crate::error::{PlatformError, SensorError};
use crate::sampler::AccelSample;

// ───────────────────────────────────────────────────────────────
// Accelerometer port (driven adapter: platform → domain)
// ───────────────────────────────────────────────────────────────

/// Kind of environment the app is hosted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKind {
    /// Native iOS / Android build.
    Native,
    /// Browser-hosted build; motion sensors are never offered.
    Web,
}

/// Read-side port for the device accelerometer.
pub trait AccelerometerPort {
    /// Live listener registration returned by [`subscribe`](Self::subscribe).
    type Subscription: SampleSubscription;

    /// The environment this adapter runs in.
    fn host(&self) -> HostKind;

    /// Ask the platform whether an accelerometer is present.
    async fn is_available(&mut self) -> Result<bool, SensorError>;

    /// Register a listener delivering samples every `interval_ms`.
    fn subscribe(&mut self, interval_ms: u32) -> Result<Self::Subscription, SensorError>;
}

/// A registered sample listener.
///
/// Samples delivered by the platform callback are buffered inside the
/// subscription until drained.  Dropping the handle without calling
/// [`remove`](Self::remove) is a leak on most platforms.
pub trait SampleSubscription {
    /// Next buffered sample in arrival order, if any.
    fn try_next(&mut self) -> Option<AccelSample>;

    /// Unregister the listener.
    fn remove(self);
}

// ───────────────────────────────────────────────────────────────
// Messaging ports (driven adapter: domain → platform)
// ───────────────────────────────────────────────────────────────

/// Result reported by the platform SMS composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsStatus {
    Sent,
    Cancelled,
    /// Android never reports a definite result.
    Unknown,
}

/// Native short-message channel (primary).
pub trait SmsPort {
    async fn sms_available(&mut self) -> Result<bool, PlatformError>;

    async fn send_sms(&mut self, to: &str, body: &str) -> Result<SmsStatus, PlatformError>;
}

/// External-application URL opener (fallback channel).
pub trait LinkPort {
    async fn can_open_url(&mut self, url: &str) -> Result<bool, PlatformError>;

    async fn open_url(&mut self, url: &str) -> Result<(), PlatformError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: domain ↔ durable key-value store)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value storage.
///
/// - Keys are namespaced to prevent collisions between subsystems.
/// - Write operations MUST be atomic; a reader sees the old value or the new
///   one, never a mix.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    /// Check whether a key exists without reading it.
    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Notice + event ports (driven adapter: domain → user / logging)
// ───────────────────────────────────────────────────────────────

/// Shows user-visible notices (alert dialogs, toasts).
pub trait NoticePort {
    fn show(&mut self, notice: &super::notices::Notice);
}

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Millisecond wall or monotonic time, used to timestamp samples.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from configuration loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
