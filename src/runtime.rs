//! Single-threaded async runtime glue.
//!
//! The screen task (sample processing) and the dispatch task share one
//! [`DispatchQueue`] and run on a local executor, so there is no locking:
//!
//! ```text
//! ┌──────────────┐  ShakeEvent   ┌────────────────┐
//! │ Screen task  │──────────────▶│ DispatchWorker │──▶ SMS / deep link
//! │ (tick loop)  │ DispatchQueue │ (async send)   │
//! └──────────────┘               └────────────────┘
//! ```
//!
//! An in-flight dispatch is never cancelled by the worker itself; it runs
//! until the platform answers.

use core::cell::Cell;
use core::future::Future;

use log::info;

use crate::app::ports::{EventSink, LinkPort, NoticePort, SmsPort, StoragePort};
use crate::dispatch::{DispatchQueue, Dispatcher};

/// Tasks the local executor can hold.
const EXECUTOR_TASKS: usize = 8;

/// Consumes the dispatch queue, one alert at a time.
pub struct DispatchWorker<'a> {
    dispatcher: &'a Dispatcher,
    requests: &'a DispatchQueue,
    in_flight: Cell<bool>,
    completed: Cell<u32>,
}

impl<'a> DispatchWorker<'a> {
    pub fn new(dispatcher: &'a Dispatcher, requests: &'a DispatchQueue) -> Self {
        Self {
            dispatcher,
            requests,
            in_flight: Cell::new(false),
            completed: Cell::new(0),
        }
    }

    /// Dispatch every queued shake, forever.
    pub async fn run(
        &self,
        mut platform: impl SmsPort + LinkPort + StoragePort,
        mut notices: impl NoticePort,
        mut sink: impl EventSink,
    ) {
        loop {
            let shake = self.requests.receive().await;
            self.in_flight.set(true);
            info!(
                "Dispatching alert for shake at {} ms ({:.2} g)",
                shake.at_ms, shake.force_g
            );
            self.dispatcher
                .dispatch(&mut platform, &mut notices, &mut sink)
                .await;
            self.in_flight.set(false);
            self.completed.set(self.completed.get().saturating_add(1));
        }
    }

    /// No dispatch running and nothing queued.
    pub fn is_idle(&self) -> bool {
        !self.in_flight.get() && self.requests.is_empty()
    }

    /// Yield until [`is_idle`](Self::is_idle).
    pub async fn wait_idle(&self) {
        while !self.is_idle() {
            futures_lite::future::yield_now().await;
        }
    }

    /// Dispatches finished since construction.
    pub fn completed(&self) -> u32 {
        self.completed.get()
    }
}

/// Run `foreground` to completion on a local executor, with `background`
/// spawned alongside it.  `background` is dropped once `foreground` ends.
pub fn run_local<'a, T: 'a>(
    foreground: impl Future<Output = T> + 'a,
    background: impl Future<Output = ()> + 'a,
) -> T {
    let executor: edge_executor::LocalExecutor<'a, EXECUTOR_TASKS> =
        edge_executor::LocalExecutor::new();
    executor.spawn(background).detach();
    futures_lite::future::block_on(executor.run(foreground))
}
