//! Configuration for chash
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{ChashError, Result};

/// Longest accepted name, in bytes.
///
/// Matches the historical fixed 50-byte buffer minus its terminator.
pub const DEFAULT_MAX_NAME_LEN: usize = 49;

/// Main configuration for a batch run
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Input / Output
    // -------------------------------------------------------------------------
    /// Batch file with one command per line
    pub commands_path: PathBuf,

    /// Audit trail destination (truncated on open)
    pub output_path: PathBuf,

    // -------------------------------------------------------------------------
    // Batch Limits
    // -------------------------------------------------------------------------
    /// Names longer than this are rejected by the parser
    pub max_name_len: usize,

    // -------------------------------------------------------------------------
    // Dispatcher Behavior
    // -------------------------------------------------------------------------
    /// Emit counts and a read-locked export after all workers are joined
    pub final_dump: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            commands_path: PathBuf::from("commands.txt"),
            output_path: PathBuf::from("output.txt"),
            max_name_len: DEFAULT_MAX_NAME_LEN,
            final_dump: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check values that the builder cannot reject by type alone
    pub fn validate(&self) -> Result<()> {
        if self.max_name_len == 0 {
            return Err(ChashError::Config(
                "max_name_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the batch file path
    pub fn commands_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.commands_path = path.into();
        self
    }

    /// Set the audit output path
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Set the maximum name length (in bytes)
    pub fn max_name_len(mut self, len: usize) -> Self {
        self.config.max_name_len = len;
        self
    }

    /// Enable or disable the final export after the batch
    pub fn final_dump(mut self, enabled: bool) -> Self {
        self.config.final_dump = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
