//! Audit clock

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock microseconds since the UNIX epoch, never running backwards
///
/// The owner serializes calls to `stamp`, so stamps follow arrival order.
#[derive(Debug, Default)]
pub struct Clock {
    last: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp, clamped to be at least the previous one
    pub fn stamp(&mut self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        self.last = self.last.max(now);
        self.last
    }
}
