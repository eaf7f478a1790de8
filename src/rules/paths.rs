//! Built-in path patterns for the file protector
//!
//! Glob syntax: `*` matches any run of characters including `/`.

/// Files and directories agents must not modify
pub const PROTECTED_PATTERNS: &[&str] = &[
    // Environment and secrets
    ".env",
    ".env.*",
    "*.key",
    "*.pem",
    "*.crt",
    "secrets/*",
    // Version control
    ".git/*",
    // Dependencies and generated files
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "node_modules/*",
    "dist/*",
    "build/*",
    // Project documents
    "_docs/PRD.md",
    // Hidden files
    ".*",
];

/// Overrides that win over [`PROTECTED_PATTERNS`]
pub const ALLOWED_PATTERNS: &[&str] = &[
    ".claude/*",
    ".github/*",
    ".prettierrc*",
    ".eslintrc*",
    ".gitignore",
    ".prettierignore",
];
