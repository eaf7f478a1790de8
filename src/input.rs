//! Input parsing for the agent hook JSON format
//!
//! Parses the request the agent runtime writes to stdin and classifies it
//! into the operation the gate evaluates.

use serde::Deserialize;
use serde_json::Value;

/// Tools that modify files on disk
pub const FILE_EDIT_TOOLS: &[&str] = &["Edit", "MultiEdit", "Write", "NotebookEdit"];

/// Main input structure from agent hooks
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// Name of the tool being invoked (e.g., "Bash", "Edit", "Write")
    pub tool_name: String,

    /// Tool-specific input parameters
    #[serde(default)]
    pub tool_input: Value,

    /// Optional session identifier
    #[serde(default)]
    pub session_id: Option<String>,

    /// Hook event name (e.g., "PreToolUse")
    #[serde(default)]
    pub hook_event_name: Option<String>,
}

/// What the gate has to evaluate for a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Shell command; empty when the payload carries none
    Command(String),

    /// One or more candidate file paths, de-duplicated in first-seen order
    FileEdit(Vec<String>),

    /// A tool the gate does not inspect
    Skip,
}

impl HookInput {
    /// Parse input from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Classify the request by tool name
    pub fn operation(&self) -> Operation {
        if self.tool_name == "Bash" {
            let command = self
                .tool_input
                .get("command")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Operation::Command(command.to_string());
        }

        if FILE_EDIT_TOOLS.contains(&self.tool_name.as_str()) {
            return Operation::FileEdit(self.file_paths());
        }

        Operation::Skip
    }

    /// Candidate paths from `file_path`, `edits[].file_path` and `notebook_path`
    pub fn file_paths(&self) -> Vec<String> {
        let input = &self.tool_input;
        let mut paths: Vec<String> = Vec::new();
        let mut push = |path: Option<&str>| {
            if let Some(path) = path {
                if !paths.iter().any(|p| p == path) {
                    paths.push(path.to_string());
                }
            }
        };

        push(input.get("file_path").and_then(Value::as_str));

        if let Some(edits) = input.get("edits").and_then(Value::as_array) {
            for edit in edits {
                push(edit.get("file_path").and_then(Value::as_str));
            }
        }

        push(input.get("notebook_path").and_then(Value::as_str));

        paths
    }

    /// Get a summary of the input for logging
    pub fn summary(&self) -> String {
        match self.operation() {
            Operation::Command(command) => {
                let truncated: String = command.chars().take(100).collect();
                if truncated.len() < command.len() {
                    format!("{}: {}...", self.tool_name, truncated)
                } else {
                    format!("{}: {}", self.tool_name, command)
                }
            }
            Operation::FileEdit(paths) => format!("{}: {}", self.tool_name, paths.join(", ")),
            Operation::Skip => format!("Skipped tool: {}", self.tool_name),
        }
    }
}
