//! Fuzz target: `EmergencyNumber::parse` and the stored-number loader
//!
//! Feeds arbitrary bytes both as user input and as a raw storage value,
//! verifying:
//! - No panics on any input, including invalid UTF-8
//! - Accepted numbers are exactly 10 ASCII digits
//! - `load` never returns a number that `parse` would reject
//!
//! cargo fuzz run fuzz_number_parse

#![no_main]

use libfuzzer_sys::fuzz_target;
use shakealert::adapters::memory_store::MemoryStore;
use shakealert::app::ports::StoragePort;
use shakealert::config::{EMERGENCY_NUMBER_KEY, STORAGE_NAMESPACE};
use shakealert::contact::{EmergencyContactStore, EmergencyNumber, NUMBER_LEN};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = core::str::from_utf8(data) {
        if let Ok(n) = EmergencyNumber::parse(text) {
            assert_eq!(n.as_str().len(), NUMBER_LEN);
            assert!(n.as_str().bytes().all(|b| b.is_ascii_digit()));
        }
    }

    let mut store = MemoryStore::new();
    if store
        .write(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY, data)
        .is_err()
    {
        return;
    }
    if let Ok(Some(n)) = EmergencyContactStore::load(&store) {
        assert!(EmergencyNumber::parse(n.as_str()).is_ok());
        assert_eq!(n.as_str().len(), NUMBER_LEN);
    }
});
