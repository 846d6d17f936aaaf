//! Audit Module
//!
//! The product output of a batch run: one timestamped line per event.
//!
//! ## Responsibilities
//! - Define the events workers and the dispatcher report
//! - Stamp each event with a non-decreasing microsecond timestamp
//! - Write each event as one indivisible unit, even under concurrent emits
//!
//! ## Line Format
//! ```text
//! 1712345678901234,INSERT,Alice,100
//! 1712345678901240,WRITE LOCK ACQUIRED
//! 1712345678901255: WAITING ON INSERTS
//! 1712345678901301: SEARCH AWAKENED
//! 210078619,Alice,100
//! 1712345678901320: Search: No Record Found
//! ```
//!
//! This trail is separate from the `tracing` diagnostics, which go to stderr.

mod clock;
mod event;
mod sink;

pub use clock::Clock;
pub use event::{AuditEvent, Stamped};
pub use sink::{MemorySink, WriterSink};

use crate::error::Result;

/// Destination for audit events
///
/// Implementations must make every `emit` (and every `emit_all`) atomic
/// with respect to other emits on the same sink.
pub trait AuditSink: Send + Sync {
    /// Stamp and record one event
    fn emit(&self, event: AuditEvent);

    /// Stamp and record several events with nothing interleaved between them
    fn emit_all(&self, events: Vec<AuditEvent>);

    /// Flush buffered output and surface any deferred write error
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
