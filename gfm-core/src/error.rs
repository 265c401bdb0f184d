//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for the Grid Browser
//!
//! Every fallible operation below the binary returns `Result<T, AppError>`.
//! The input dispatcher is the outermost consumer: it logs whatever a single
//! keystroke produced and keeps the browser running.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Unified error type for all browser operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Standard IO error, auto-converted from `io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Directory navigation errors (path could not be resolved).
    #[error("Navigation failed: cannot access {path:?}: {reason}")]
    NavigationFailed { path: PathBuf, reason: String },

    /// A subprocess could not be started at all.
    #[error("Failed to start command `{cmd}`: {source}")]
    SpawnFailed {
        cmd: String,
        #[source]
        source: io::Error,
    },

    /// A subprocess ran but reported failure.
    #[error("External command failed: {cmd} (exit code: {code:?})")]
    ExternalCmd { cmd: String, code: Option<i32> },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Terminal I/O or mode switching error.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Any other error, with description.
    #[error("Unexpected error: {0}")]
    Other(String),
}

impl AppError {
    #[must_use]
    /// Attach extra context to an error.
    pub fn with_context<S: Into<String>>(self, ctx: S) -> Self {
        Self::Other(format!("{}: {}", ctx.into(), self))
    }

    /// Create a navigation failure error
    pub fn navigation_failed<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::NavigationFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a spawn failure error
    pub fn spawn_failed<S: Into<String>>(cmd: S, source: io::Error) -> Self {
        Self::SpawnFailed {
            cmd: cmd.into(),
            source,
        }
    }

    /// Create a terminal error from anything displayable
    pub fn terminal<E: std::fmt::Display>(err: E) -> Self {
        Self::Terminal(err.to_string())
    }

    /// True when the failure happened before the external program ran.
    #[must_use]
    pub const fn is_spawn_failure(&self) -> bool {
        matches!(self, Self::SpawnFailed { .. })
    }
}
