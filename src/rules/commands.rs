//! Built-in shell command rules
//!
//! Best-practice nudges (prefer `rg`), destructive operations, remote code
//! execution, and risky package-manager and git usage.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::rules::{Rule, Severity};

pub const COMMAND_RULES: &[Rule] = &[
    // Performance and best practices
    Rule::new(
        "grep-unpiped",
        r"\bgrep\b",
        "Use 'rg' (ripgrep) instead of 'grep' for better performance",
        Severity::Error,
    )
    .unless(r"\|"),
    Rule::new(
        "find-name",
        r"\bfind\s+\S+\s+-name\b",
        "Use 'rg --files -g pattern' instead of 'find -name'",
        Severity::Error,
    ),
    Rule::new(
        "cat-pipe-grep",
        r"\bcat\s+.*\|\s*grep",
        "Use 'rg' directly on files instead of 'cat | grep'",
        Severity::Error,
    ),
    // Destructive deletes
    Rule::new(
        "rm-root",
        r"\brm\s+-rf\s+/(?:\s|$)",
        "DANGER: Attempting to delete root directory!",
        Severity::Error,
    ),
    Rule::new(
        "rm-home",
        r"\brm\s+-rf\s+~(?:\s|/|$)",
        "DANGER: Attempting to delete home directory!",
        Severity::Error,
    ),
    Rule::new(
        "rm-wildcard",
        r"\brm\s+-rf\s+\*",
        "DANGER: Wildcard deletion detected. Please be more specific",
        Severity::Error,
    ),
    Rule::new(
        "rm-cwd",
        r"\brm\s+-rf\s+\.",
        "DANGER: Attempting to delete current directory",
        Severity::Error,
    ),
    // Remote code execution
    Rule::new(
        "curl-pipe-interpreter",
        r"curl\s+.*\|\s*(?:bash|sh|python|perl|ruby)",
        "SECURITY: Piping untrusted content directly to interpreter",
        Severity::Error,
    ),
    Rule::new(
        "wget-pipe-interpreter",
        r"wget\s+.*\|\s*(?:bash|sh|python|perl|ruby)",
        "SECURITY: Piping untrusted content directly to interpreter",
        Severity::Error,
    ),
    Rule::new(
        "eval",
        r"\beval\s+",
        "SECURITY: Use of eval can be dangerous with untrusted input",
        Severity::Warning,
    ),
    // Redirects and permissions
    Rule::new(
        "devnull-redirect",
        r">\s*/dev/null\s+2>&1",
        "Consider using '&>/dev/null' for redirecting both stdout and stderr",
        Severity::Warning,
    ),
    Rule::new(
        "chmod-777",
        r"\bchmod\s+777\b",
        "SECURITY: Setting world-writable permissions is dangerous",
        Severity::Error,
    ),
    // Package managers
    Rule::new(
        "npm-global-install",
        r"\bnpm\s+install\s+-g\b",
        "Global npm installs should be avoided in project context",
        Severity::Warning,
    ),
    Rule::new(
        "sudo-npm",
        r"\bsudo\s+npm\b",
        "Never use sudo with npm. Fix npm permissions instead",
        Severity::Error,
    ),
    // Git
    Rule::new(
        "git-force-push",
        r"\bgit\s+push\s+.*--force\b",
        "Force push detected. This can overwrite remote history",
        Severity::Warning,
    ),
    Rule::new(
        "git-reset-hard",
        r"\bgit\s+reset\s+--hard\s+HEAD",
        "Hard reset will discard all uncommitted changes",
        Severity::Warning,
    ),
];

/// Source name for alternative-command suggestions
pub const ALTERNATIVE_SOURCE: &str = "alternative";

/// First-token commands that have a dedicated agent tool
static COMMAND_ALTERNATIVES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ls", "Consider using 'LS' tool instead of 'ls' bash command"),
        ("cat", "Consider using 'Read' tool instead of 'cat' bash command"),
        ("head", "Consider using 'Read' tool with limit parameter"),
        ("tail", "Consider using 'Read' tool with offset parameter"),
    ])
});

/// Suggested alternative for the command's first whitespace-delimited token
pub fn alternative_for(command: &str) -> Option<&'static str> {
    let first = command.split_whitespace().next()?;
    COMMAND_ALTERNATIVES.get(first).copied()
}
