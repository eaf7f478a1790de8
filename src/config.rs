//! Configuration loading for hook-gate
//!
//! TOML file with built-in defaults, then `CLAUDE_HOOK_*` environment
//! overrides on top.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{GateError, Result};
use crate::rules::CustomRule;

/// Default bound on the static-analysis child process
pub const DEFAULT_LINTER_TIMEOUT_SECS: u64 = 5;

pub const ENV_DRY_RUN: &str = "CLAUDE_HOOK_DRY_RUN";
pub const ENV_DEBUG: &str = "CLAUDE_HOOK_DEBUG";
pub const ENV_TIMEOUT: &str = "CLAUDE_HOOK_TIMEOUT";
pub const ENV_LOG_JSON: &str = "CLAUDE_HOOK_LOG_JSON";

/// General configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Report would-be blocks but always allow
    pub dry_run: bool,

    /// Debug-level logging
    pub debug: bool,

    /// JSON log lines instead of plain text
    pub log_json: bool,

    /// Seconds the static-analysis tool may run
    pub linter_timeout_secs: u64,

    /// Enable the JSONL audit log
    pub audit_log: bool,

    /// Path to the audit log file
    pub audit_path: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            debug: false,
            log_json: false,
            linter_timeout_secs: DEFAULT_LINTER_TIMEOUT_SECS,
            audit_log: false,
            audit_path: Some("~/.claude/hook-gate/audit.jsonl".to_string()),
        }
    }
}

/// Extra path patterns, appended to the built-in lists
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FilesConfig {
    pub protected: Vec<String>,
    pub allowed: Vec<String>,
}

/// Command validation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Run shellcheck when it is installed
    pub shellcheck: bool,

    /// Extra rules evaluated after the built-in table
    pub rules: Vec<CustomRule>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            shellcheck: true,
            rules: Vec::new(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub files: FilesConfig,
    pub commands: CommandsConfig,
}

impl Config {
    /// Standard config locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".claude/hook-gate.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".claude/hook-gate/config.toml"));
        }
        paths
    }

    /// Load the first config file found, or defaults.
    ///
    /// A file that exists but cannot be read or parsed is an error: a silently
    /// ignored policy file would weaken protection without notice.
    pub fn load() -> Result<Self> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Config::default())
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GateError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|message| GateError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply `CLAUDE_HOOK_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Vec<String> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    ///
    /// Returns notices about ignored values; logging is not initialized yet
    /// when this runs, so the caller reports them.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Vec<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut notices = Vec::new();

        if let Some(value) = lookup(ENV_DRY_RUN) {
            if matches!(value.to_lowercase().as_str(), "1" | "true") {
                self.general.dry_run = true;
            }
        }

        if lookup(ENV_DEBUG).is_some_and(|v| !v.is_empty()) {
            self.general.debug = true;
        }

        if let Some(value) = lookup(ENV_TIMEOUT) {
            match value.trim().parse::<u64>() {
                Ok(secs) => self.general.linter_timeout_secs = secs,
                Err(_) => notices.push(format!("Invalid timeout value: {}", value)),
            }
        }

        if lookup(ENV_LOG_JSON).is_some_and(|v| v.eq_ignore_ascii_case("true")) {
            self.general.log_json = true;
        }

        notices
    }

    pub fn linter_timeout(&self) -> Duration {
        Duration::from_secs(self.general.linter_timeout_secs)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Audit log path, if auditing is enabled
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.general.audit_log {
            return None;
        }
        self.general.audit_path.as_deref().map(Self::expand_path)
    }
}
