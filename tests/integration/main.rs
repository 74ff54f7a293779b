//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one part of the
//! shake-alert flow against the mock platform adapters.  Everything runs on
//! the host with no phone required.

mod contact_tests;
mod runtime_tests;
mod service_tests;
