//! Sync Module
//!
//! Blocking primitives shared by every worker of a batch.
//!
//! ## Responsibilities
//! - Reader-preferring reader-writer lock around the store
//! - Process-wide lock acquisition/release counters
//! - Insert-completion barrier gating deletes and searches
//!
//! ## Primitive Choice
//! Both the lock and the barrier are a `parking_lot::Mutex` guarding a
//! small state word plus a `parking_lot::Condvar`:
//! - The lock only blocks readers on a *held* writer, never on a waiting one
//! - Waiters always re-check their predicate after waking
//! - Nothing here can time out or be cancelled

mod barrier;
mod rwlock;
mod stats;

pub use barrier::InsertBarrier;
pub use rwlock::{LockState, ReadGuard, RwLock, WriteGuard};
pub use stats::{LockCounts, LockStats};

/// Mode a lock is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Shared access
    Read,

    /// Exclusive access
    Write,
}

impl LockMode {
    /// Upper-case label used in the audit trail
    pub fn as_str(&self) -> &'static str {
        match self {
            LockMode::Read => "READ",
            LockMode::Write => "WRITE",
        }
    }
}
