//! hook-gate - Policy gate for coding agent hooks
//!
//! Evaluates an agent's proposed operation before it runs: shell commands
//! against an ordered rule table, file edits against protected and allowed
//! path patterns. The result is an allow/block decision with every finding
//! listed.
//!
//! # Features
//!
//! - **Command rules**: dangerous deletes, piping downloads to interpreters,
//!   discouraged tools, risky package-manager and git usage
//! - **Path protection**: secrets, lockfiles, dependencies and hidden files,
//!   with allow-overrides, traversal and symlink checks
//! - **Static analysis**: optional shellcheck findings, degrading silently
//! - **Dry-run**: report what would be blocked without blocking
//! - **Audit logging**: optional JSONL log of all decisions
//!
//! # Example
//!
//! ```
//! use hook_gate::{analyzer::NoopAnalyzer, Config, GateEngine, HookInput};
//!
//! let engine = GateEngine::with_parts(&Config::default(), ".", Box::new(NoopAnalyzer)).unwrap();
//!
//! let input = r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#;
//! let hook_input = HookInput::from_json(input).unwrap();
//!
//! let decision = engine.check(&hook_input);
//! assert!(decision.is_block());
//! ```

pub mod analyzer;
pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod report;
pub mod rules;

// Re-exports for convenience
pub use config::Config;
pub use engine::decision::{decide, Decision, OperationKind, Outcome};
pub use engine::GateEngine;
pub use error::{GateError, Result};
pub use input::{HookInput, Operation};
pub use output::ExitStatus;
pub use rules::{Severity, Violation};
