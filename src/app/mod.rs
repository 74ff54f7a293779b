//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the home-screen rules for the shake-alert
//! feature: sampler lifecycle, shake detection and command handling.
//! All interaction with the phone happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without a device.

pub mod commands;
pub mod events;
pub mod notices;
pub mod ports;
pub mod service;
