//! Audit events and their text rendering

use std::fmt;

use crate::batch::CommandKind;
use crate::store::Record;
use crate::sync::{LockCounts, LockMode};

/// Something worth recording in the audit trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    /// The dispatcher is about to start `workers` workers
    BatchStarted { workers: usize },

    /// A worker is about to act on its command
    CommandIssued {
        kind: CommandKind,
        name: String,
        value: Option<u32>,
    },

    LockAcquired(LockMode),

    LockReleased(LockMode),

    /// A delete or search is about to block on the insert barrier
    WaitingOnInserts,

    /// A delete or search woke up on the insert barrier
    Awakened(CommandKind),

    SearchFound(Record),

    SearchNotFound,

    /// One record of a print or of the final dump
    RecordListed(Record),

    FinalCounts(LockCounts),
}

/// An event with the timestamp it was recorded at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped {
    /// Microseconds since the UNIX epoch
    pub timestamp_us: u64,

    pub event: AuditEvent,
}

impl fmt::Display for Stamped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ts = self.timestamp_us;
        match &self.event {
            AuditEvent::BatchStarted { workers } => write!(f, "Running {} threads", workers),
            AuditEvent::CommandIssued { kind, name, value } => match (kind, value) {
                (CommandKind::Print, _) => write!(f, "{},{}", ts, kind.label()),
                (_, Some(value)) => write!(f, "{},{},{},{}", ts, kind.label(), name, value),
                (_, None) => write!(f, "{},{},{}", ts, kind.label(), name),
            },
            AuditEvent::LockAcquired(mode) => write!(f, "{},{} LOCK ACQUIRED", ts, mode.as_str()),
            AuditEvent::LockReleased(mode) => write!(f, "{},{} LOCK RELEASED", ts, mode.as_str()),
            AuditEvent::WaitingOnInserts => write!(f, "{}: WAITING ON INSERTS", ts),
            AuditEvent::Awakened(kind) => write!(f, "{}: {} AWAKENED", ts, kind.label()),
            AuditEvent::SearchFound(record) | AuditEvent::RecordListed(record) => {
                write!(f, "{},{},{}", record.fingerprint, record.name, record.value)
            }
            AuditEvent::SearchNotFound => write!(f, "{}: Search: No Record Found", ts),
            AuditEvent::FinalCounts(counts) => write!(
                f,
                "\nNumber of lock acquisitions:  {}\nNumber of lock releases:  {}",
                counts.acquisitions, counts.releases
            ),
        }
    }
}
