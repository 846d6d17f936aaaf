//! Dispatcher Module
//!
//! Runs a batch: one worker thread per command against the shared store.
//!
//! ## Responsibilities
//! - Size the insert barrier before any worker starts
//! - Spawn, then join, one worker per command
//! - Gate deletes and searches on the insert barrier
//! - Report lock counts and a final read-locked export

use std::sync::Arc;
use std::thread;

use crossbeam::channel;

use crate::audit::{AuditEvent, AuditSink};
use crate::batch::{Batch, Command, CommandKind};
use crate::config::Config;
use crate::error::{ChashError, Result};
use crate::store::{Record, Store};
use crate::sync::{InsertBarrier, LockCounts, LockMode, LockState, LockStats, RwLock};

/// Batch runner over one shared store
///
/// ## Ordering Model
///
/// - **Inserts** take the write lock, upsert, release, then count down the
///   insert barrier.
/// - **Deletes / searches** first wait for the insert barrier to drain, so
///   every insert of the batch is applied before any of them looks at the
///   store.
/// - **Prints** do not wait on the barrier; they list whatever the store
///   holds when their read lock is granted.
///
/// Among themselves, inserts (and deletes) are ordered only by write-lock
/// acquisition order. Reads interleave freely.
pub struct Dispatcher {
    /// Run configuration
    config: Config,

    /// The shared record chain and its reader-writer lock
    store: Arc<RwLock<Store>>,

    /// Acquisition/release counters of `store`'s lock
    stats: Arc<LockStats>,

    /// Audit trail destination
    sink: Arc<dyn AuditSink>,
}

/// Result of one search command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Position of the command in the batch
    pub index: usize,

    pub name: String,

    /// `None` when the name was not found
    pub record: Option<Record>,
}

/// Summary of a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Search results, ordered by command index
    pub searches: Vec<SearchOutcome>,

    /// Lock counts after every worker was joined
    pub counts: LockCounts,

    /// Store contents from the final export; empty if it was disabled
    pub final_records: Vec<Record>,
}

/// Everything a worker shares with the rest of the batch
#[derive(Clone)]
struct WorkerContext {
    store: Arc<RwLock<Store>>,
    barrier: Arc<InsertBarrier>,
    sink: Arc<dyn AuditSink>,
}

impl Dispatcher {
    /// Create a dispatcher with an empty store
    pub fn new(config: Config, sink: Arc<dyn AuditSink>) -> Self {
        let stats = Arc::new(LockStats::new());
        let store = Arc::new(RwLock::with_stats(Store::new(), Arc::clone(&stats)));
        Self {
            config,
            store,
            stats,
            sink,
        }
    }

    /// Run every command of `batch` concurrently and wait for all of them
    ///
    /// Steps:
    /// 1. Count inserts and size the barrier
    /// 2. Spawn one named worker per command
    /// 3. Join every worker
    /// 4. Emit lock counts, then a read-locked export of the store
    ///
    /// A worker that panics is reported as `WorkerPanicked` after the
    /// remaining workers are joined. An insert that panics before counting
    /// down leaves deletes and searches blocked forever.
    ///
    /// If a thread cannot be spawned, the `Io` error is returned at once and
    /// the workers already started are detached. Deletes and searches among
    /// them stay blocked if an insert was never spawned.
    pub fn run(&self, batch: Batch) -> Result<BatchReport> {
        // Step 1: The barrier must be sized before any worker can signal it
        let inserts = batch.insert_count();
        let barrier = Arc::new(InsertBarrier::new(inserts));
        let ctx = WorkerContext {
            store: Arc::clone(&self.store),
            barrier,
            sink: Arc::clone(&self.sink),
        };

        tracing::info!(
            commands = batch.len(),
            inserts,
            thread_hint = ?batch.thread_hint,
            "starting batch"
        );
        self.sink.emit(AuditEvent::BatchStarted {
            workers: batch.len(),
        });

        // Step 2: One worker per command
        let (tx, rx) = channel::unbounded::<SearchOutcome>();
        let mut handles = Vec::with_capacity(batch.len());

        for (index, command) in batch.commands.into_iter().enumerate() {
            let ctx = ctx.clone();
            let tx = tx.clone();
            let kind = command.kind;

            let handle = thread::Builder::new()
                .name(format!("worker-{}", index))
                .spawn(move || {
                    if let Some(outcome) = ctx.execute(index, command) {
                        // The receiver outlives every worker.
                        let _ = tx.send(outcome);
                    }
                })?;
            handles.push((index, kind, handle));
        }
        drop(tx);

        // Step 3: Join all workers before looking at results
        let mut failure = None;
        for (index, kind, handle) in handles {
            if handle.join().is_err() {
                tracing::error!(index, kind = kind.as_str(), "worker panicked");
                failure.get_or_insert(ChashError::WorkerPanicked {
                    index,
                    kind: kind.as_str(),
                });
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        let mut searches: Vec<SearchOutcome> = rx.iter().collect();
        searches.sort_by_key(|outcome| outcome.index);

        // Step 4: Counts first, so the final export's lock is not included
        let counts = self.stats.snapshot();
        self.sink.emit(AuditEvent::FinalCounts(counts));

        let final_records = if self.config.final_dump {
            self.final_export()
        } else {
            Vec::new()
        };

        self.sink.flush()?;

        tracing::info!(
            acquisitions = counts.acquisitions,
            releases = counts.releases,
            records = final_records.len(),
            "batch finished"
        );

        Ok(BatchReport {
            searches,
            counts,
            final_records,
        })
    }

    fn final_export(&self) -> Vec<Record> {
        let guard = self.store.acquire_read();
        self.sink.emit(AuditEvent::LockAcquired(LockMode::Read));

        let records = guard.export();
        self.sink.emit_all(
            records
                .iter()
                .cloned()
                .map(AuditEvent::RecordListed)
                .collect(),
        );

        guard.release();
        self.sink.emit(AuditEvent::LockReleased(LockMode::Read));
        records
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Read-locked export of the current store
    ///
    /// Counts as one lock acquisition and release.
    pub fn store_snapshot(&self) -> Vec<Record> {
        self.store.acquire_read().export()
    }

    /// Current holders of the store lock
    pub fn lock_state(&self) -> LockState {
        self.store.state()
    }

    /// Current lock counters
    pub fn lock_counts(&self) -> LockCounts {
        self.stats.snapshot()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl WorkerContext {
    /// Carry out one command; returns an outcome only for searches
    fn execute(&self, index: usize, command: Command) -> Option<SearchOutcome> {
        tracing::debug!(index, kind = command.kind.as_str(), name = %command.name, "worker started");

        match command.kind {
            CommandKind::Insert => {
                self.insert(command);
                None
            }
            CommandKind::Delete => {
                self.await_inserts(CommandKind::Delete);
                self.delete(command);
                None
            }
            CommandKind::Search => {
                self.await_inserts(CommandKind::Search);
                Some(self.search(index, command))
            }
            CommandKind::Print => {
                self.print();
                None
            }
        }
    }

    fn insert(&self, command: Command) {
        self.sink.emit(AuditEvent::CommandIssued {
            kind: CommandKind::Insert,
            name: command.name.clone(),
            value: Some(command.value),
        });

        let mut guard = self.store.acquire_write();
        self.sink.emit(AuditEvent::LockAcquired(LockMode::Write));
        let outcome = guard.upsert(&command.name, command.value);
        guard.release();
        self.sink.emit(AuditEvent::LockReleased(LockMode::Write));

        let remaining = self.barrier.signal_insert_done();
        tracing::trace!(name = %command.name, ?outcome, remaining, "insert applied");
    }

    fn delete(&self, command: Command) {
        self.sink.emit(AuditEvent::CommandIssued {
            kind: CommandKind::Delete,
            name: command.name.clone(),
            value: None,
        });

        let mut guard = self.store.acquire_write();
        self.sink.emit(AuditEvent::LockAcquired(LockMode::Write));
        let removed = guard.remove(&command.name);
        guard.release();
        self.sink.emit(AuditEvent::LockReleased(LockMode::Write));

        tracing::trace!(name = %command.name, removed = removed.is_some(), "delete applied");
    }

    fn search(&self, index: usize, command: Command) -> SearchOutcome {
        self.sink.emit(AuditEvent::CommandIssued {
            kind: CommandKind::Search,
            name: command.name.clone(),
            value: None,
        });

        let guard = self.store.acquire_read();
        self.sink.emit(AuditEvent::LockAcquired(LockMode::Read));
        let record = guard.find(&command.name);
        match &record {
            Some(found) => self.sink.emit(AuditEvent::SearchFound(found.clone())),
            None => self.sink.emit(AuditEvent::SearchNotFound),
        }
        guard.release();
        self.sink.emit(AuditEvent::LockReleased(LockMode::Read));

        SearchOutcome {
            index,
            name: command.name,
            record,
        }
    }

    fn print(&self) {
        self.sink.emit(AuditEvent::CommandIssued {
            kind: CommandKind::Print,
            name: String::new(),
            value: None,
        });

        let guard = self.store.acquire_read();
        self.sink.emit(AuditEvent::LockAcquired(LockMode::Read));
        let listing: Vec<AuditEvent> = guard
            .iter()
            .cloned()
            .map(AuditEvent::RecordListed)
            .collect();
        self.sink.emit_all(listing);
        guard.release();
        self.sink.emit(AuditEvent::LockReleased(LockMode::Read));
    }

    /// Block on the insert barrier, reporting each wait and wake-up
    fn await_inserts(&self, kind: CommandKind) {
        let waited = self.barrier.await_inserts_done_with(
            || self.sink.emit(AuditEvent::WaitingOnInserts),
            || self.sink.emit(AuditEvent::Awakened(kind)),
        );
        if waited {
            tracing::trace!(kind = kind.as_str(), "released by insert barrier");
        }
    }
}
