//! Aggregating violations into a decision
//!
//! A decision blocks iff at least one error-severity violation exists and
//! dry-run is off. Dry-run still carries every violation so the would-be
//! block can be reported.

use serde::Serialize;

use crate::rules::{Severity, Violation};

/// The kind of operation that was evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Command,
    FileEdit,
    /// Tool not inspected by the gate
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Allow,
    Block,
}

/// Final verdict for one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub kind: OperationKind,
    pub outcome: Outcome,
    pub dry_run: bool,
    pub violations: Vec<Violation>,
}

/// Aggregate `violations` into a decision
pub fn decide(kind: OperationKind, violations: Vec<Violation>, dry_run: bool) -> Decision {
    let has_errors = violations.iter().any(Violation::is_error);
    let outcome = if has_errors && !dry_run {
        Outcome::Block
    } else {
        Outcome::Allow
    };

    Decision {
        kind,
        outcome,
        dry_run,
        violations,
    }
}

impl Decision {
    /// Allow decision for a tool the gate does not inspect
    pub fn skipped(dry_run: bool) -> Self {
        decide(OperationKind::Skipped, Vec::new(), dry_run)
    }

    pub fn is_block(&self) -> bool {
        self.outcome == Outcome::Block
    }

    pub fn is_allow(&self) -> bool {
        self.outcome == Outcome::Allow
    }

    /// Errors exist, whether or not dry-run let the operation through
    pub fn would_block(&self) -> bool {
        self.violations.iter().any(Violation::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.severity == Severity::Warning)
    }

    /// Human-readable report listing every violation
    pub fn report(&self) -> String {
        let (header, footer) = match self.kind {
            OperationKind::Command => (
                "Command validation failed:",
                "Please modify your command to address these issues.",
            ),
            OperationKind::FileEdit => (
                "Cannot modify protected file(s):",
                "These files are protected to prevent accidental modifications.\n\
                 Protected patterns include: environment files, dependencies, \
                 version control, and generated files.",
            ),
            OperationKind::Skipped => ("No checks applied.", ""),
        };

        let mut out = String::from(header);
        out.push('\n');
        for violation in &self.violations {
            let suffix = match violation.severity {
                Severity::Error => "",
                Severity::Warning => " (warning)",
            };
            out.push_str(&format!("  • {}{}\n", violation, suffix));
        }
        if !footer.is_empty() {
            out.push('\n');
            out.push_str(footer);
        }
        out
    }
}
