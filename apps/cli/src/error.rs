//! # Shell Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Warung Shell                       │
//! │                                                                         │
//! │  warung> pay --cash 5rb                                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Parse line ─── bad quote / unknown flag ───── CliError::Usage   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Command ─── StoreError / CoreError ─────────────── CliError     │  │
//! │  │         │                                              │         │  │
//! │  │         ▼                                              ▼         │  │
//! │  │  Out ──► stdout                          "error: ..." ──► stdout │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  The shell prints the error and reads the next line.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only configuration and I/O errors stop the process; those surface through
//! `anyhow` in `main`.

use std::path::PathBuf;

use thiserror::Error;
use warung_core::{CoreError, ValidationError};
use warung_store::StoreError;

#[derive(Debug, Error)]
pub enum CliError {
    /// The line could not be turned into a command.
    ///
    /// ## When This Occurs
    /// - Unterminated quote
    /// - Unknown command or flag
    /// - A flag value that does not parse (`--cash abc`)
    #[error("{0}")]
    Usage(String),

    /// Bookkeeping rejected the request.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Cart rules rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration values are out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// `--config` points at a file that does not exist.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// True for errors caused by what was typed, which the shell reports
    /// and moves past.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CliError::Usage(_)
            | CliError::Store(_)
            | CliError::Core(_)
            | CliError::Validation(_)
            | CliError::Json(_) => true,
            _ => false,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
