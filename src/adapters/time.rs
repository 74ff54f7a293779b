//! Clock adapter.
//!
//! [`ScriptClock`] is set explicitly by the replay driver so recorded
//! timestamps drive the debounce window deterministically.

use std::cell::Cell;
use std::rc::Rc;

use crate::app::ports::ClockPort;

/// Externally driven clock.  Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ScriptClock {
    now_ms: Rc<Cell<u64>>,
}

impl ScriptClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.set(now_ms);
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(delta_ms));
    }
}

impl ClockPort for ScriptClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
