//! Error types for hook-gate
//!
//! Every fatal condition maps onto one of the exit statuses in
//! [`crate::output::ExitStatus`].

use std::path::PathBuf;

use thiserror::Error;

use crate::output::ExitStatus;

/// Result type alias
pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Error, Debug)]
pub enum GateError {
    /// The hook payload on stdin could not be parsed
    #[error("failed to decode hook input: {0}")]
    InvalidInput(#[from] serde_json::Error),

    /// A rule or path pattern failed to compile
    #[error("invalid pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The configuration file exists but cannot be used
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GateError {
    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        GateError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    /// Exit status the binary terminates with for this error
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            GateError::InvalidInput(_)
            | GateError::InvalidPattern { .. }
            | GateError::Config { .. } => ExitStatus::Misconfiguration,
            GateError::Io(_) => ExitStatus::GeneralError,
        }
    }
}
