//! Error types for chash
//!
//! Provides a unified error type for the fallible edges of the crate:
//! reading the batch, opening the audit output, and joining workers.
//! The concurrency primitives themselves never return errors.

use thiserror::Error;

/// Result type alias using ChashError
pub type Result<T> = std::result::Result<T, ChashError>;

/// Unified error type for chash operations
#[derive(Debug, Error)]
pub enum ChashError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Batch Errors
    // -------------------------------------------------------------------------
    #[error("Malformed command on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Name on line {line} is {len} bytes (max {max})")]
    NameTooLong { line: usize, len: usize, max: usize },

    #[error("No commands to process")]
    EmptyBatch,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Worker Errors
    // -------------------------------------------------------------------------
    #[error("Worker {index} ({kind}) panicked")]
    WorkerPanicked { index: usize, kind: &'static str },
}
