//! Wall-clock time adapter.
//!
//! Implements [`Clock`] with the host's local time zone, matching the
//! ctime-style timestamps used by the console and the data log.

use chrono::{DateTime, Local};

use crate::app::ports::Clock;

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
