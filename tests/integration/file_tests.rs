//! File protection through the full engine

use hook_gate::{Config, HookInput, OperationKind};

use crate::{edit_input, engine, engine_at};

fn allowed(tool: &str, path: &str) -> bool {
    engine().check(&edit_input(tool, path)).is_allow()
}

// ============================================================================
// Protected - BLOCKED
// ============================================================================

#[test]
fn test_dependencies_blocked() {
    assert!(!allowed("Edit", "node_modules/lodash/index.js"));
    assert!(!allowed("Write", "package-lock.json"));
    assert!(!allowed("Write", "pnpm-lock.yaml"));
    assert!(!allowed("Edit", "build/output.js"));
}

#[test]
fn test_secrets_blocked() {
    assert!(!allowed("Write", ".env"));
    assert!(!allowed("Edit", ".env.local"));
    assert!(!allowed("Write", "tls/server.key"));
    assert!(!allowed("Write", "ca.crt"));
    assert!(!allowed("Edit", "secrets/db.yml"));
}

#[test]
fn test_vcs_and_docs_blocked() {
    assert!(!allowed("Edit", ".git/HEAD"));
    assert!(!allowed("Edit", "_docs/PRD.md"));
}

#[test]
fn test_traversal_blocked() {
    assert!(!allowed("Write", "a/../../etc/passwd"));
    assert!(!allowed("Edit", "../sibling/src/main.rs"));
}

#[test]
fn test_absolute_path_in_project_blocked() {
    assert!(!allowed("Edit", "/nonexistent/project/node_modules/x/index.js"));
}

// ============================================================================
// Allowed
// ============================================================================

#[test]
fn test_allow_override_beats_hidden_file_rule() {
    assert!(allowed("Edit", ".claude/hooks/foo.py"));
    assert!(allowed("Write", ".claude/settings.json"));
    assert!(allowed("Edit", ".github/workflows/ci.yml"));
    assert!(allowed("Edit", ".gitignore"));
    assert!(allowed("Edit", ".prettierignore"));
}

#[test]
fn test_source_files_allowed() {
    assert!(allowed("Edit", "src/main.rs"));
    assert!(allowed("Write", "docs/guide.md"));
    assert!(allowed("Edit", "/nonexistent/project/src/lib.rs"));
}

#[test]
fn test_dot_slash_prefix_matches_like_plain_path() {
    assert!(allowed("Edit", "./src/main.rs"));
    assert!(allowed("Edit", "./.claude/hooks/foo.py"));
    assert!(!allowed("Write", "./.env"));
}

#[test]
fn test_non_edit_tools_skipped() {
    let input = HookInput::from_json(r#"{"tool_name":"Read","tool_input":{"file_path":".env"}}"#)
        .unwrap();
    let decision = engine().check(&input);
    assert!(decision.is_allow());
    assert_eq!(decision.kind, OperationKind::Skipped);
}

// ============================================================================
// Multi-path requests
// ============================================================================

#[test]
fn test_multi_edit_reports_every_protected_path() {
    let input = HookInput::from_json(
        r#"{"tool_name":"MultiEdit","tool_input":{
            "file_path":"src/lib.rs",
            "edits":[{"file_path":".env"},{"file_path":"yarn.lock"},{"file_path":".env"}]
        }}"#,
    )
    .unwrap();
    let decision = engine().check(&input);
    assert!(decision.is_block());
    assert_eq!(decision.kind, OperationKind::FileEdit);

    let messages: Vec<_> = decision.violations.iter().map(|v| v.message.as_str()).collect();
    assert_eq!(messages, vec![".env is protected", "yarn.lock is protected"]);

    let report = decision.report();
    assert!(report.starts_with("Cannot modify protected file(s):"));
    assert!(report.contains(".env is protected"));
    assert!(report.contains("yarn.lock is protected"));
}

#[test]
fn test_notebook_edit_checked() {
    let input = HookInput::from_json(
        r#"{"tool_name":"NotebookEdit","tool_input":{"notebook_path":"dist/report.ipynb"}}"#,
    )
    .unwrap();
    assert!(engine().check(&input).is_block());
}

#[test]
fn test_no_paths_allowed() {
    let input = HookInput::from_json(r#"{"tool_name":"Write","tool_input":{}}"#).unwrap();
    let decision = engine().check(&input);
    assert!(decision.is_allow());
    assert!(decision.violations.is_empty());
}

// ============================================================================
// Config extensions
// ============================================================================

#[test]
fn test_configured_patterns() {
    let config = Config::from_toml(
        r#"
        [files]
        protected = ["migrations/*"]
        allowed = [".vscode/*"]
        "#,
    )
    .unwrap();
    let engine = engine_at(&config, "/nonexistent/project");
    assert!(engine.check(&edit_input("Edit", "migrations/0001_init.sql")).is_block());
    assert!(engine.check(&edit_input("Edit", ".vscode/settings.json")).is_allow());
    assert!(engine.check(&edit_input("Edit", ".env")).is_block());
}

// ============================================================================
// Symlinks
// ============================================================================

#[cfg(unix)]
#[test]
fn test_symlink_into_protected_dir_blocked() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    std::fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    std::fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
    std::fs::create_dir(root.join("src")).unwrap();
    symlink(root.join("node_modules/pkg/index.js"), root.join("src/vendored.js")).unwrap();

    let engine = engine_at(&Config::default(), root.to_str().unwrap());
    assert!(engine.check(&edit_input("Edit", "src/vendored.js")).is_block());

    let absolute = root.join("src/vendored.js");
    assert!(engine
        .check(&edit_input("Edit", absolute.to_str().unwrap()))
        .is_block());
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_terminates() {
    use std::os::unix::fs::symlink;

    let dir = tempfile::tempdir().unwrap();
    symlink("b.txt", dir.path().join("a.txt")).unwrap();
    symlink("a.txt", dir.path().join("b.txt")).unwrap();

    let engine = engine_at(&Config::default(), dir.path().to_str().unwrap());
    assert!(engine.check(&edit_input("Write", "a.txt")).is_block());
}
