//! Emergency contact number and its storage slot.
//!
//! The number lives under [`EMERGENCY_NUMBER_KEY`] in the
//! [`STORAGE_NAMESPACE`] namespace.  Invariant: the slot is either absent
//! or holds exactly 10 ASCII digits.  [`EmergencyContactStore::save`]
//! validates before writing, and [`EmergencyContactStore::load`] treats a
//! slot that violates the invariant as absent.

use core::fmt;

use log::{info, warn};

use crate::app::ports::{StorageError, StoragePort};
use crate::config::{EMERGENCY_NUMBER_KEY, STORAGE_NAMESPACE};
use crate::error::ContactError;

/// Digits in a valid emergency number.
pub const NUMBER_LEN: usize = 10;

/// A validated 10-digit phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyNumber(heapless::String<NUMBER_LEN>);

impl EmergencyNumber {
    /// Validate user input.  Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ContactError> {
        Self::from_digits(input.trim())
    }

    /// Validate `digits` exactly as given; no whitespace is tolerated.
    pub fn from_digits(digits: &str) -> Result<Self, ContactError> {
        let len = digits.chars().count();
        if len != NUMBER_LEN {
            return Err(ContactError::WrongLength(len));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContactError::NonDigit);
        }
        let mut s = heapless::String::new();
        // Exactly NUMBER_LEN ASCII bytes; cannot overflow.
        let _ = s.push_str(digits);
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmergencyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load/save helpers for the emergency number slot.
pub struct EmergencyContactStore;

impl EmergencyContactStore {
    /// Read the stored number.  `Ok(None)` when unset or invalid.
    pub fn load(storage: &impl StoragePort) -> Result<Option<EmergencyNumber>, ContactError> {
        // One byte more than valid: a full buffer means the value was cut.
        let mut buf = [0u8; NUMBER_LEN + 1];
        let n = match storage.read(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY, &mut buf) {
            Ok(n) => n,
            Err(StorageError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let parsed = if n == buf.len() {
            None
        } else {
            core::str::from_utf8(&buf[..n])
                .ok()
                .and_then(|s| EmergencyNumber::from_digits(s).ok())
        };
        if parsed.is_none() {
            warn!("Stored emergency number is malformed ({} bytes), ignoring", n);
        }
        Ok(parsed)
    }

    /// Validate `input` and persist it.  Nothing is written on rejection.
    pub fn save(
        storage: &mut impl StoragePort,
        input: &str,
    ) -> Result<EmergencyNumber, ContactError> {
        let number = EmergencyNumber::parse(input)?;
        storage.write(
            STORAGE_NAMESPACE,
            EMERGENCY_NUMBER_KEY,
            number.as_str().as_bytes(),
        )?;
        info!("Emergency number saved");
        Ok(number)
    }

    /// Remove the stored number.
    pub fn clear(storage: &mut impl StoragePort) -> Result<(), ContactError> {
        storage.delete(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY)?;
        Ok(())
    }

    /// Whether a number has been stored (valid or not).
    pub fn is_configured(storage: &impl StoragePort) -> bool {
        storage.exists(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY)
    }
}
