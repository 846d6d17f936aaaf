//! Store Module
//!
//! The shared record chain every worker reads and mutates.
//!
//! ## Responsibilities
//! - Keep records ascending by fingerprint, one record per fingerprint
//! - Upsert, remove, point lookup and full ordered export
//!
//! ## Data Structure Choice
//! A singly-linked chain threaded through an arena of slots:
//! - Links are slot indices, so no node can outlive the store
//! - Freed slots are recycled by later inserts
//! - Every operation is a linear scan; there is no secondary index
//!
//! The store does no locking of its own. Callers wrap it in
//! [`crate::sync::RwLock`] and hold write access for `upsert`/`remove`
//! and at least read access for `find`/`export`.

mod table;

pub use table::{Iter, Store, Upsert};

/// A single keyed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Fingerprint of `name`; the sort key
    pub fingerprint: u32,

    pub name: String,

    pub value: u32,
}
