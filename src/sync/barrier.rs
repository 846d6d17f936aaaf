//! Insert-completion barrier
//!
//! Counts down the inserts scheduled for a batch. Deletes and searches wait
//! here until every insert has applied its mutation. The count only ever
//! decreases, so once it reaches zero the barrier stays open for the rest of
//! the batch.

use parking_lot::{Condvar, Mutex};

/// Pending-insert counter with a wait/notify gate
pub struct InsertBarrier {
    /// Inserts scheduled but not yet applied
    pending: Mutex<usize>,

    /// Broadcast when `pending` reaches zero
    drained: Condvar,
}

impl InsertBarrier {
    /// Create a barrier expecting `total_inserts` signals
    ///
    /// Must be built before any worker of the batch starts.
    pub fn new(total_inserts: usize) -> Self {
        Self {
            pending: Mutex::new(total_inserts),
            drained: Condvar::new(),
        }
    }

    /// Block until all inserts are done
    ///
    /// Returns `true` if the caller had to wait at least once.
    pub fn await_inserts_done(&self) -> bool {
        self.await_inserts_done_with(|| {}, || {})
    }

    /// Like [`await_inserts_done`](Self::await_inserts_done), calling
    /// `on_wait` before each block and `on_wake` after each wake-up
    ///
    /// Both callbacks run with the barrier mutex held and must not touch the
    /// barrier.
    pub fn await_inserts_done_with<W, A>(&self, mut on_wait: W, mut on_wake: A) -> bool
    where
        W: FnMut(),
        A: FnMut(),
    {
        let mut pending = self.pending.lock();
        let mut waited = false;
        while *pending > 0 {
            waited = true;
            on_wait();
            self.drained.wait(&mut pending);
            on_wake();
        }
        waited
    }

    /// Record one finished insert, waking every waiter on the last one
    ///
    /// Returns the number of inserts still pending.
    ///
    /// # Panics
    /// Panics if called more times than the barrier was created for.
    pub fn signal_insert_done(&self) -> usize {
        let mut pending = self.pending.lock();
        assert!(*pending > 0, "signal_insert_done called with no pending inserts");
        *pending -= 1;
        if *pending == 0 {
            self.drained.notify_all();
        }
        *pending
    }

    /// Inserts still outstanding
    pub fn pending(&self) -> usize {
        *self.pending.lock()
    }

    pub fn is_open(&self) -> bool {
        self.pending() == 0
    }
}
