//! Exit-status contract and report output
//!
//! The caller only sees two things: the process exit status and the text
//! written to stderr. Stdout is left untouched.

use std::io::{self, Write};
use std::process::ExitCode;

use crate::engine::decision::Decision;

/// Process exit statuses understood by the hook runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Allowed, dry-run, or nothing to check
    Success,

    /// Unexpected failure unrelated to policy
    GeneralError,

    /// At least one blocking violation
    PolicyViolation,

    /// Retryable failure. Reserved: the policy core degrades instead.
    TransientError,

    /// The payload or configuration is unusable
    Misconfiguration,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::GeneralError => 1,
            ExitStatus::PolicyViolation => 2,
            ExitStatus::TransientError => 3,
            ExitStatus::Misconfiguration => 4,
        }
    }

    /// Status for a finished evaluation
    pub fn from_decision(decision: &Decision) -> Self {
        if decision.is_block() {
            ExitStatus::PolicyViolation
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Write the caller-visible report for a blocked decision.
///
/// Allowed decisions produce no output here; their warnings go through the
/// reporters instead.
pub fn write_report<W: Write>(decision: &Decision, out: &mut W) -> io::Result<()> {
    if !decision.is_block() {
        return Ok(());
    }
    writeln!(out, "{}", decision.report())?;
    out.flush()
}
