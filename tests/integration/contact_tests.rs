//! Integration tests: emergency number slot over the host storage adapters.

use shakealert::adapters::memory_store::MemoryStore;
use shakealert::app::ports::StoragePort;
use shakealert::config::{EMERGENCY_NUMBER_KEY, STORAGE_NAMESPACE};
use shakealert::contact::EmergencyContactStore;
use shakealert::error::ContactError;

#[test]
fn unset_slot_loads_as_none() {
    let store = MemoryStore::new();
    assert!(!EmergencyContactStore::is_configured(&store));
    assert_eq!(EmergencyContactStore::load(&store).unwrap(), None);
}

#[test]
fn save_then_load_through_shared_clone() {
    let mut settings = MemoryStore::new();
    let dispatcher_view = settings.clone();

    EmergencyContactStore::save(&mut settings, " 5512345678 ").unwrap();

    assert!(EmergencyContactStore::is_configured(&dispatcher_view));
    let n = EmergencyContactStore::load(&dispatcher_view).unwrap().unwrap();
    assert_eq!(n.as_str(), "5512345678");
}

#[test]
fn rejected_input_writes_nothing() {
    let mut store = MemoryStore::new();
    assert_eq!(
        EmergencyContactStore::save(&mut store, "551234567"),
        Err(ContactError::WrongLength(9))
    );
    assert_eq!(
        EmergencyContactStore::save(&mut store, "55123456a8"),
        Err(ContactError::NonDigit)
    );
    assert!(store.is_empty());
}

#[test]
fn overlong_stored_value_is_ignored() {
    let mut store = MemoryStore::new();
    store
        .write(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY, b"55123456789")
        .unwrap();
    assert!(EmergencyContactStore::is_configured(&store));
    assert_eq!(EmergencyContactStore::load(&store).unwrap(), None);
}

#[test]
fn non_utf8_stored_value_is_ignored() {
    let mut store = MemoryStore::new();
    store
        .write(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY, &[0xff; 10])
        .unwrap();
    assert_eq!(EmergencyContactStore::load(&store).unwrap(), None);
}

#[test]
fn clear_removes_number() {
    let mut store = MemoryStore::new();
    EmergencyContactStore::save(&mut store, "5512345678").unwrap();
    EmergencyContactStore::clear(&mut store).unwrap();
    assert!(!EmergencyContactStore::is_configured(&store));
    assert_eq!(EmergencyContactStore::load(&store).unwrap(), None);
}

#[test]
fn stored_value_with_trailing_data_is_ignored() {
    let mut store = MemoryStore::new();
    store
        .write(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY, b"5512345678\n999")
        .unwrap();
    assert_eq!(EmergencyContactStore::load(&store).unwrap(), None);
}

#[test]
fn stored_value_with_padding_is_ignored() {
    let mut store = MemoryStore::new();
    for raw in [&b" 5512345678"[..], &b"5512345678\n"[..], &b" 551234567"[..]] {
        store
            .write(STORAGE_NAMESPACE, EMERGENCY_NUMBER_KEY, raw)
            .unwrap();
        assert_eq!(EmergencyContactStore::load(&store).unwrap(), None);
    }
}
