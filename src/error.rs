//! Unified error types for the shake-alert core.
//!
//! A single `Error` enum that every subsystem can convert into, so the
//! binary edge can report any failure uniformly.  None of these are fatal:
//! the service degrades to a disabled feature plus a user-visible notice.

use core::fmt;

use crate::app::ports::{ConfigError, StorageError};

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The accelerometer could not be queried or subscribed.
    Sensor(SensorError),
    /// An SMS or URL-open call failed on the platform side.
    Platform(PlatformError),
    /// The emergency number was rejected or could not be persisted.
    Contact(ContactError),
    /// Key-value storage failed.
    Storage(StorageError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Platform(e) => write!(f, "platform: {e}"),
            Self::Contact(e) => write!(f, "contact: {e}"),
            Self::Storage(e) => write!(f, "storage: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The host environment never provides motion sensors (browser).
    UnsupportedHost,
    /// The device reports no accelerometer.
    Unavailable,
    /// The availability query itself failed.
    QueryFailed,
    /// Registering the sample listener failed.
    SubscribeFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedHost => write!(f, "motion sensors unsupported on this host"),
            Self::Unavailable => write!(f, "accelerometer unavailable"),
            Self::QueryFailed => write!(f, "availability query failed"),
            Self::SubscribeFailed => write!(f, "subscription failed"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Platform (SMS / deep link) errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// The SMS composer could not be queried or launched.
    SmsFailed,
    /// The URL could not be checked or opened.
    LinkFailed,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmsFailed => write!(f, "SMS call failed"),
            Self::LinkFailed => write!(f, "URL open failed"),
        }
    }
}

impl From<PlatformError> for Error {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

// ---------------------------------------------------------------------------
// Emergency contact errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactError {
    /// Input is not exactly 10 characters long (after trimming).
    WrongLength(usize),
    /// Input contains a character other than an ASCII digit.
    NonDigit,
    /// The validated number could not be written or read.
    Storage(StorageError),
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(n) => write!(f, "expected 10 digits, got {n} characters"),
            Self::NonDigit => write!(f, "number must contain digits only"),
            Self::Storage(e) => write!(f, "storage: {e}"),
        }
    }
}

impl From<StorageError> for ContactError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ContactError> for Error {
    fn from(e: ContactError) -> Self {
        Self::Contact(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
