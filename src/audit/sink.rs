//! Audit sinks
//!
//! Both sinks stamp and store an event while holding a single mutex, which
//! is what makes each emit atomic and the timestamps follow arrival order.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use parking_lot::Mutex;

use super::{AuditEvent, AuditSink, Clock, Stamped};
use crate::error::Result;

/// Line-oriented text sink over any writer
///
/// Every emit is written and flushed before the lock is dropped. The first
/// I/O error is kept and returned from `flush`; later events are dropped.
pub struct WriterSink<W: Write + Send> {
    inner: Mutex<WriterInner<W>>,
}

struct WriterInner<W> {
    writer: W,
    clock: Clock,
    error: Option<io::Error>,
}

impl WriterSink<BufWriter<File>> {
    /// Create (or truncate) the audit file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(WriterInner {
                writer,
                clock: Clock::new(),
                error: None,
            }),
        }
    }

    /// Recover the writer, surfacing any deferred write error
    pub fn into_inner(self) -> Result<W> {
        let mut inner = self.inner.into_inner();
        if let Some(err) = inner.error.take() {
            return Err(err.into());
        }
        inner.writer.flush()?;
        Ok(inner.writer)
    }
}

impl<W> WriterInner<W>
where
    W: Write,
{
    fn write_events(&mut self, events: Vec<AuditEvent>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_lines(events) {
            tracing::error!("audit write failed: {}", err);
            self.error = Some(err);
        }
    }

    fn write_lines(&mut self, events: Vec<AuditEvent>) -> io::Result<()> {
        for event in events {
            let stamped = Stamped {
                timestamp_us: self.clock.stamp(),
                event,
            };
            writeln!(self.writer, "{}", stamped)?;
        }
        self.writer.flush()
    }
}

impl<W: Write + Send> AuditSink for WriterSink<W> {
    fn emit(&self, event: AuditEvent) {
        self.inner.lock().write_events(vec![event]);
    }

    fn emit_all(&self, events: Vec<AuditEvent>) {
        self.inner.lock().write_events(events);
    }

    fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if let Some(err) = inner.error.take() {
            return Err(err.into());
        }
        inner.writer.flush()?;
        Ok(())
    }
}

/// In-memory sink keeping every stamped event
#[derive(Default)]
pub struct MemorySink {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    clock: Clock,
    events: Vec<Stamped>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far, in arrival order
    pub fn events(&self) -> Vec<Stamped> {
        self.inner.lock().events.clone()
    }

    /// Recorded events without their timestamps
    pub fn plain_events(&self) -> Vec<AuditEvent> {
        self.inner
            .lock()
            .events
            .iter()
            .map(|stamped| stamped.event.clone())
            .collect()
    }

    /// Recorded events rendered as audit lines
    pub fn lines(&self) -> Vec<String> {
        self.inner
            .lock()
            .events
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

impl AuditSink for MemorySink {
    fn emit(&self, event: AuditEvent) {
        self.emit_all(vec![event]);
    }

    fn emit_all(&self, events: Vec<AuditEvent>) {
        let mut inner = self.inner.lock();
        for event in events {
            let timestamp_us = inner.clock.stamp();
            inner.events.push(Stamped {
                timestamp_us,
                event,
            });
        }
    }
}
