//! ShakeAlert core library.
//!
//! Shake-to-alert logic for a personal-safety mobile app: the motion
//! sampler, the debounced shake detector and the emergency dispatcher
//! (SMS first, messaging-app deep link as fallback).  Everything that
//! touches the phone goes through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod contact;
pub mod detector;
pub mod dispatch;
pub mod error;
pub mod runtime;
pub mod sampler;
