//! Console notice adapter.
//!
//! Renders user-visible [`Notice`]s as log lines at a level matching their
//! severity.  Stands in for native alert dialogs in the simulator.

use log::{error, info, warn};

use crate::app::notices::{Notice, Severity};
use crate::app::ports::NoticePort;

#[derive(Debug, Default)]
pub struct LogNotices {
    shown: u32,
}

impl LogNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices shown so far.
    pub fn shown(&self) -> u32 {
        self.shown
    }
}

impl NoticePort for LogNotices {
    fn show(&mut self, notice: &Notice) {
        self.shown = self.shown.saturating_add(1);
        match notice.severity() {
            Severity::Success => info!("NOTICE | {}: {}", notice.title(), notice.message()),
            Severity::Warning => warn!("NOTICE | {}: {}", notice.title(), notice.message()),
            Severity::Error => error!("NOTICE | {}: {}", notice.title(), notice.message()),
        }
    }
}
