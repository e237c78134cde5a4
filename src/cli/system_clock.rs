use booking_core::Clock;
use chrono::{DateTime, Utc};

/// Wall-clock time for the live shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
