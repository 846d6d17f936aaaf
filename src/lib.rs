//! # chash
//!
//! A concurrent batch processor over a single shared record store:
//! - One OS thread per command (insert, delete, search, print)
//! - Reader-preferring reader-writer lock around the store
//! - Insert-completion barrier: every insert of a batch lands before any
//!   delete or search observes the store
//! - Timestamped audit trail of commands, lock traffic and results
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Batch (commands.txt)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     Dispatcher                               │
//! │          (count inserts, spawn, join, final dump)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ one worker per command
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │InsertBarrier│          │   RwLock    │
//!   │(Mutex+Cvar) │          │ (readers ∨  │
//!   └─────────────┘          │  1 writer)  │
//!                            └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │    Store    │
//!                           │ (by fprint) │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod fingerprint;
pub mod sync;
pub mod store;
pub mod batch;
pub mod audit;
pub mod dispatcher;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ChashError, Result};
pub use config::Config;
pub use dispatcher::{BatchReport, Dispatcher, SearchOutcome};
pub use fingerprint::fingerprint;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of chash
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
