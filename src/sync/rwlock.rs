//! Reader-writer lock
//!
//! Reader-preferring lock that owns the value it protects.
//!
//! ## Semantics
//! - Any number of readers, or exactly one writer
//! - A reader blocks only while a writer *holds* the lock; writers that are
//!   merely waiting do not hold new readers back, so a steady stream of
//!   readers can starve a writer
//! - A writer blocks while a writer or any reader holds the lock
//!
//! Acquisition hands out an RAII guard. The guard performs the matching
//! release exactly once, either on drop or through `release()`.
//!
//! ## Storage
//! Admission is decided on a `Mutex<LockState>` + `Condvar`. The value
//! itself sits in a `parking_lot::RwLock`, whose guard is taken only after
//! admission, so it never contends: admitted readers only share it, and an
//! admitted writer is alone.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{Condvar, Mutex, RwLockReadGuard, RwLockWriteGuard};

use super::{LockCounts, LockMode, LockStats};

/// Holder state of a [`RwLock`]
///
/// `writer_held` implies `readers == 0`, and `readers > 0` implies
/// `!writer_held`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockState {
    pub writer_held: bool,
    pub readers: u32,
}

/// Reader-preferring reader-writer lock
pub struct RwLock<T> {
    /// Holder bookkeeping; the only state the condvar waits on
    state: Mutex<LockState>,

    /// Signalled whenever the lock may have become available
    released: Condvar,

    /// Shared acquisition/release counters
    stats: Arc<LockStats>,

    /// The protected value; only locked after admission
    data: parking_lot::RwLock<T>,
}

impl<T> RwLock<T> {
    /// Create an unlocked lock with its own counters
    pub fn new(value: T) -> Self {
        Self::with_stats(value, Arc::new(LockStats::new()))
    }

    /// Create an unlocked lock reporting into shared counters
    pub fn with_stats(value: T, stats: Arc<LockStats>) -> Self {
        Self {
            state: Mutex::new(LockState::default()),
            released: Condvar::new(),
            stats,
            data: parking_lot::RwLock::new(value),
        }
    }

    /// Acquire shared access, blocking while a writer holds the lock
    ///
    /// Not reentrant: a thread that already holds the write lock and calls
    /// this deadlocks. A second read by the same holder is admitted like any
    /// other reader. Neither case is detected.
    pub fn acquire_read(&self) -> ReadGuard<'_, T> {
        let mut state = self.state.lock();
        while state.writer_held {
            self.released.wait(&mut state);
        }
        state.readers += 1;
        drop(state);

        self.stats.record_acquisition();
        let admission = Admission {
            lock: self,
            mode: LockMode::Read,
        };
        ReadGuard {
            data: self.data.read(),
            _admission: admission,
        }
    }

    /// Acquire exclusive access, blocking while any holder exists
    ///
    /// Not reentrant: a thread that already holds this lock, in either mode,
    /// and calls this deadlocks. Nothing detects it.
    pub fn acquire_write(&self) -> WriteGuard<'_, T> {
        let mut state = self.state.lock();
        while state.writer_held || state.readers > 0 {
            self.released.wait(&mut state);
        }
        state.writer_held = true;
        drop(state);

        self.stats.record_acquisition();
        let admission = Admission {
            lock: self,
            mode: LockMode::Write,
        };
        WriteGuard {
            data: self.data.write(),
            _admission: admission,
        }
    }

    fn release_read(&self) {
        let mut state = self.state.lock();
        assert!(
            state.readers > 0 && !state.writer_held,
            "release_read without a matching acquire_read: {:?}",
            *state
        );
        state.readers -= 1;
        if state.readers == 0 {
            self.released.notify_all();
        }
        drop(state);

        self.stats.record_release();
    }

    fn release_write(&self) {
        let mut state = self.state.lock();
        assert!(
            state.writer_held && state.readers == 0,
            "release_write without a matching acquire_write: {:?}",
            *state
        );
        state.writer_held = false;
        self.released.notify_all();
        drop(state);

        self.stats.record_release();
    }

    /// Snapshot of the current holders
    pub fn state(&self) -> LockState {
        *self.state.lock()
    }

    /// Snapshot of the counters this lock reports into
    pub fn counts(&self) -> LockCounts {
        self.stats.snapshot()
    }

    /// Mutable access without locking; `&mut self` proves there are no holders
    pub fn get_mut(&mut self) -> &mut T {
        self.data.get_mut()
    }

    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<T: Default> Default for RwLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// One admitted holder; gives its slot back on drop
struct Admission<'a, T> {
    lock: &'a RwLock<T>,
    mode: LockMode,
}

impl<T> Drop for Admission<'_, T> {
    fn drop(&mut self) {
        match self.mode {
            LockMode::Read => self.lock.release_read(),
            LockMode::Write => self.lock.release_write(),
        }
    }
}

/// Shared access to the value of a [`RwLock`]
///
/// Fields drop in declaration order: the value guard goes before the
/// admission slot is released.
#[must_use = "the read lock is released as soon as the guard is dropped"]
pub struct ReadGuard<'a, T> {
    data: RwLockReadGuard<'a, T>,
    _admission: Admission<'a, T>,
}

impl<T> ReadGuard<'_, T> {
    /// Release the read lock now
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Deref for ReadGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// Exclusive access to the value of a [`RwLock`]
#[must_use = "the write lock is released as soon as the guard is dropped"]
pub struct WriteGuard<'a, T> {
    data: RwLockWriteGuard<'a, T>,
    _admission: Admission<'a, T>,
}

impl<T> WriteGuard<'_, T> {
    /// Release the write lock now
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Deref for WriteGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T> DerefMut for WriteGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.data
    }
}
