//! Integration tests for hook-gate

mod command_tests;
mod dry_run_tests;
mod file_tests;

use hook_gate::analyzer::NoopAnalyzer;
use hook_gate::{Config, GateEngine, HookInput};

/// Engine with the default policy, no external analyzer, rooted at `root`
pub fn engine_at(config: &Config, root: &str) -> GateEngine {
    GateEngine::with_parts(config, root, Box::new(NoopAnalyzer)).unwrap()
}

pub fn engine() -> GateEngine {
    engine_at(&Config::default(), "/nonexistent/project")
}

pub fn bash_input(command: &str) -> HookInput {
    let json = serde_json::json!({"tool_name": "Bash", "tool_input": {"command": command}});
    HookInput::from_json(&json.to_string()).unwrap()
}

pub fn edit_input(tool: &str, file_path: &str) -> HookInput {
    let json = serde_json::json!({
        "tool_name": tool,
        "tool_input": {"file_path": file_path, "old_string": "a", "new_string": "b"}
    });
    HookInput::from_json(&json.to_string()).unwrap()
}
