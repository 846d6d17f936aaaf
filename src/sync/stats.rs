//! Lock statistics
//!
//! Counters bumped on every acquire and release of a lock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide lock acquisition/release counters
///
/// Shared by `Arc` between the lock and whoever reports on it.
#[derive(Debug, Default)]
pub struct LockStats {
    acquisitions: AtomicU64,
    releases: AtomicU64,
}

/// Point-in-time copy of [`LockStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockCounts {
    pub acquisitions: u64,
    pub releases: u64,
}

impl LockStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_acquisition(&self) {
        self.acquisitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }

    /// Read both counters
    ///
    /// The two loads are not taken atomically together; call this once
    /// workers are quiescent for an exact pair.
    pub fn snapshot(&self) -> LockCounts {
        LockCounts {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
        }
    }
}
