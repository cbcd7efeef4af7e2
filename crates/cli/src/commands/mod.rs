//! Command implementations.
//!
//! Every command reads a backend response (a file path, or `-` for stdin),
//! runs it through `krishi_core::normalize`, and writes its result to stdout.
//! Logs go to stderr so the output can be piped.

pub mod order;
pub mod products;
pub mod totals;

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use krishi_core::{NormalizeError, OrderError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),

    /// Backend response could not be normalized.
    #[error("Invalid backend response: {0}")]
    Normalize(#[from] NormalizeError),

    /// Order could not be built.
    #[error("Cannot place order: {0}")]
    Order(#[from] OrderError),

    /// JSON output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read a response body from `path`, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, CommandError> {
    let read_error = |source: io::Error| CommandError::Read {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut body = String::new();
        io::stdin().read_to_string(&mut body).map_err(read_error)?;
        Ok(body)
    } else {
        std::fs::read_to_string(path).map_err(read_error)
    }
}

/// Write lines to stdout.
pub fn write_lines<I, S>(lines: I) -> Result<(), CommandError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    Ok(())
}

/// Write a value to stdout as pretty JSON.
pub fn write_json<T: serde::Serialize>(value: &T) -> Result<(), CommandError> {
    write_lines([serde_json::to_string_pretty(value)?])
}
