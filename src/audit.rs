//! JSONL audit logging for hook-gate
//!
//! Records every decision to a JSONL file for later analysis.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::engine::decision::{Decision, OperationKind, Outcome};
use crate::input::HookInput;
use crate::report::Reporter;
use crate::rules::Violation;

/// Audit level for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditLevel {
    Allowed,
    Warned,
    Blocked,
    /// Errors found but dry-run let the operation through
    DryRun,
    Skipped,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry<'a> {
    pub timestamp: DateTime<Utc>,
    pub level: AuditLevel,
    pub outcome: Outcome,
    pub dry_run: bool,
    pub tool: &'a str,
    pub input_summary: String,
    pub violations: &'a [Violation],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

impl<'a> AuditEntry<'a> {
    pub fn new(input: &'a HookInput, decision: &'a Decision) -> Self {
        let level = if decision.kind == OperationKind::Skipped {
            AuditLevel::Skipped
        } else if decision.is_block() {
            AuditLevel::Blocked
        } else if decision.would_block() {
            AuditLevel::DryRun
        } else if decision.warnings().next().is_some() {
            AuditLevel::Warned
        } else {
            AuditLevel::Allowed
        };

        Self {
            timestamp: Utc::now(),
            level,
            outcome: decision.outcome,
            dry_run: decision.dry_run,
            tool: &input.tool_name,
            input_summary: input.summary(),
            violations: &decision.violations,
            session_id: input.session_id.as_deref(),
        }
    }
}

/// Appends one JSON line per decision
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry, creating the file and its parent directory
    pub fn append(&self, entry: &AuditEntry<'_>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)
    }
}

impl Reporter for AuditLog {
    fn report(&self, input: &HookInput, decision: &Decision) {
        if let Err(e) = self.append(&AuditEntry::new(input, decision)) {
            warn!("Failed to write audit log {}: {}", self.path.display(), e);
        }
    }
}
