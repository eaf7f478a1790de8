//! Reporting sinks
//!
//! The engine hands every finished decision to its reporters rather than
//! deciding itself where diagnostics go.

use tracing::{debug, info, warn};

use crate::engine::decision::{Decision, OperationKind};
use crate::input::HookInput;

/// Receives each decision once it is final
pub trait Reporter {
    fn report(&self, input: &HookInput, decision: &Decision);
}

/// Reports through `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, input: &HookInput, decision: &Decision) {
        if decision.kind == OperationKind::Skipped {
            debug!("Skipping checks for tool: {}", input.tool_name);
            return;
        }

        for warning in decision.warnings() {
            warn!("{}", warning);
        }

        if decision.dry_run && decision.would_block() {
            info!("[DRY RUN] Would block {}", input.summary());
            for error in decision.errors() {
                info!("[DRY RUN] {}", error);
            }
            return;
        }

        if decision.is_block() {
            debug!(
                errors = decision.errors().count(),
                "Blocked {}",
                input.summary()
            );
            return;
        }

        let warnings = decision.warnings().count();
        if warnings > 0 {
            info!("Validated with {} warning(s)", warnings);
        } else {
            debug!("Validated successfully: {}", input.summary());
        }
    }
}
