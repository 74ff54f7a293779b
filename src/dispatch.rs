//! Emergency dispatcher: best-effort alert delivery with one fallback.
//!
//! ```text
//!  load number ──none──▶ NoEmergencyNumber
//!       │
//!       ▼
//!  SMS available? ──yes──▶ send ──Sent──▶ SentViaSms
//!       │ no                  │ other / error
//!       ▼                     ▼
//!  fallback policy ──Disabled──▶ Failed(SmsNotDelivered)
//!       │ MessagingApp
//!       ▼
//!  can open deep link? ──no──▶ Failed(MessagingAppMissing)
//!       │ yes
//!       ▼
//!  open ──ok──▶ SentViaMessagingApp
//! ```
//!
//! [`Dispatcher::dispatch`] never propagates a failure.  Port errors become
//! a failed outcome, and a panic raised inside an adapter is caught at the
//! dispatch boundary and reported the same way.  Every outcome shows exactly
//! one [`Notice`].

use std::panic::AssertUnwindSafe;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::FutureExt;
use log::{error, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::app::events::AppEvent;
use crate::app::notices::Notice;
use crate::app::ports::{EventSink, LinkPort, NoticePort, SmsPort, SmsStatus, StoragePort};
use crate::config::{FallbackPolicy, MESSAGING_APP_URL, ShakeConfig};
use crate::contact::{EmergencyContactStore, EmergencyNumber};
use crate::detector::ShakeEvent;

/// Accepted shakes waiting for the dispatcher.
pub const DISPATCH_QUEUE_DEPTH: usize = 4;

/// Single-threaded queue between the screen task and the dispatch task.
pub type DispatchQueue = Channel<NoopRawMutex, ShakeEvent, DISPATCH_QUEUE_DEPTH>;

/// Characters left unescaped in a URI component (RFC 3986 unreserved plus
/// `!*'()`).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Why a dispatch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// SMS did not deliver and the fallback is disabled.
    SmsNotDelivered,
    /// The messaging app is not installed (URL cannot be opened).
    MessagingAppMissing,
    /// The messaging app was present but opening it failed.
    LinkOpenFailed,
    /// The emergency number could not be read.
    StorageUnreadable,
    /// An adapter panicked mid-dispatch.
    Panicked,
}

/// Final result of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    SentViaSms,
    SentViaMessagingApp,
    NoEmergencyNumber,
    Failed(DispatchFailure),
}

impl DispatchOutcome {
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::SentViaSms | Self::SentViaMessagingApp)
    }

    /// The notice shown for this outcome.
    pub fn notice(self) -> Notice {
        match self {
            Self::SentViaSms => Notice::AlertSentSms,
            Self::SentViaMessagingApp => Notice::AlertSentMessagingApp,
            Self::NoEmergencyNumber => Notice::NoEmergencyNumber,
            Self::Failed(_) => Notice::AlertFailed,
        }
    }
}

/// Build the messaging-app deep link for `number`, carrying `message`.
pub fn messaging_deep_link(number: &EmergencyNumber, message: &str) -> String {
    format!(
        "{}?phone={}&text={}",
        MESSAGING_APP_URL,
        number,
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

pub struct Dispatcher {
    message: String,
    fallback: FallbackPolicy,
}

impl Dispatcher {
    pub fn new(config: &ShakeConfig) -> Self {
        Self {
            message: config.alert_message.clone(),
            fallback: config.fallback,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Deliver the alert to the stored emergency number.
    ///
    /// The `platform` parameter satisfies all three messaging-side ports so
    /// a single adapter can own the native bridge.
    pub async fn dispatch(
        &self,
        platform: &mut (impl SmsPort + LinkPort + StoragePort),
        notices: &mut impl NoticePort,
        sink: &mut impl EventSink,
    ) -> DispatchOutcome {
        let outcome = match AssertUnwindSafe(self.deliver(platform))
            .catch_unwind()
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                error!("Dispatch aborted by adapter panic");
                DispatchOutcome::Failed(DispatchFailure::Panicked)
            }
        };

        match outcome {
            DispatchOutcome::SentViaSms | DispatchOutcome::SentViaMessagingApp => {
                info!("Emergency alert delivered: {:?}", outcome);
            }
            _ => warn!("Emergency alert not delivered: {:?}", outcome),
        }
        notices.show(&outcome.notice());
        sink.emit(&AppEvent::DispatchFinished(outcome));
        outcome
    }

    // ── Internal ──────────────────────────────────────────────

    async fn deliver(&self, platform: &mut (impl SmsPort + LinkPort + StoragePort)) -> DispatchOutcome {
        let number = match EmergencyContactStore::load(&*platform) {
            Ok(Some(n)) => n,
            Ok(None) => return DispatchOutcome::NoEmergencyNumber,
            Err(e) => {
                warn!("Emergency number unreadable: {}", e);
                return DispatchOutcome::Failed(DispatchFailure::StorageUnreadable);
            }
        };

        if self.send_sms(platform, &number).await {
            return DispatchOutcome::SentViaSms;
        }

        match self.fallback {
            FallbackPolicy::Disabled => DispatchOutcome::Failed(DispatchFailure::SmsNotDelivered),
            FallbackPolicy::MessagingApp => self.open_messaging_app(platform, &number).await,
        }
    }

    /// Primary channel.  `true` only when the platform reports `Sent`.
    async fn send_sms(&self, platform: &mut impl SmsPort, number: &EmergencyNumber) -> bool {
        match platform.sms_available().await {
            Ok(true) => {}
            Ok(false) => {
                info!("SMS unavailable, skipping primary channel");
                return false;
            }
            Err(e) => {
                warn!("SMS availability query failed: {}", e);
                return false;
            }
        }

        match platform.send_sms(number.as_str(), &self.message).await {
            Ok(SmsStatus::Sent) => true,
            Ok(status) => {
                info!("SMS not confirmed ({:?})", status);
                false
            }
            Err(e) => {
                warn!("SMS send failed: {}", e);
                false
            }
        }
    }

    async fn open_messaging_app(
        &self,
        platform: &mut impl LinkPort,
        number: &EmergencyNumber,
    ) -> DispatchOutcome {
        let url = messaging_deep_link(number, &self.message);

        match platform.can_open_url(&url).await {
            Ok(true) => {}
            Ok(false) => return DispatchOutcome::Failed(DispatchFailure::MessagingAppMissing),
            Err(e) => {
                warn!("Deep link check failed: {}", e);
                return DispatchOutcome::Failed(DispatchFailure::MessagingAppMissing);
            }
        }

        match platform.open_url(&url).await {
            Ok(()) => DispatchOutcome::SentViaMessagingApp,
            Err(e) => {
                warn!("Deep link open failed: {}", e);
                DispatchOutcome::Failed(DispatchFailure::LinkOpenFailed)
            }
        }
    }
}
