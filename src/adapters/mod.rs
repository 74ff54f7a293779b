//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                   |
//! |----------------|--------------------|-------------------------------|
//! | `log_sink`     | EventSink          | `log` facade                  |
//! | `notices`      | NoticePort         | `log` facade (console alerts) |
//! | `memory_store` | StoragePort        | In-memory key-value store     |
//! | `time`         | ClockPort          | Scripted clock                |
//! | `replay`       | AccelerometerPort  | Scripted sample feed          |
//! |                | SmsPort, LinkPort  | Simulated messaging bridge    |
//! |                | StoragePort        |                               |
//!
//! The native mobile bridge implements the same traits on-device; these
//! adapters back the simulator and host-side runs.

pub mod log_sink;
pub mod memory_store;
pub mod notices;
pub mod replay;
pub mod time;
