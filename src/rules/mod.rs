//! Rule definitions and the rule table
//!
//! A [`Rule`] is a static pattern -> (message, severity) record. A
//! [`RuleTable`] compiles an ordered list of them and reports every rule that
//! matches a piece of text, in table order.

pub mod commands;
pub mod paths;

use std::fmt;

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};

/// How a violation affects the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the operation (unless dry-run)
    Error,

    /// Reported, never blocks
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A single finding produced while evaluating an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub severity: Severity,

    /// What produced this finding: a rule id, `alternative`,
    /// `file-protection`, or an analyzer name
    pub source: String,

    pub message: String,
}

impl Violation {
    pub fn new(severity: Severity, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            source: source.into(),
            message: message.into(),
        }
    }

    pub fn error(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, source, message)
    }

    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, source, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.message)
    }
}

/// A built-in rule definition
#[derive(Debug, Clone)]
pub struct Rule {
    /// Unique identifier, used as the violation source
    pub id: &'static str,

    /// Regex searched anywhere in the text (case-insensitive)
    pub pattern: &'static str,

    /// Human-readable explanation
    pub message: &'static str,

    pub severity: Severity,

    /// Optional guard: a match only counts when this regex does not match the
    /// rest of the line after it
    pub unless: Option<&'static str>,
}

impl Rule {
    pub const fn new(
        id: &'static str,
        pattern: &'static str,
        message: &'static str,
        severity: Severity,
    ) -> Self {
        Self {
            id,
            pattern,
            message,
            severity,
            unless: None,
        }
    }

    /// Attach a guard pattern
    pub const fn unless(mut self, guard: &'static str) -> Self {
        self.unless = Some(guard);
        self
    }
}

/// A rule supplied at runtime (from the config file)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CustomRule {
    pub id: String,
    pub pattern: String,
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub unless: Option<String>,
}

impl From<&Rule> for CustomRule {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            pattern: rule.pattern.to_string(),
            message: rule.message.to_string(),
            severity: rule.severity,
            unless: rule.unless.map(String::from),
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    id: String,
    message: String,
    severity: Severity,
    regex: Regex,
    unless: Option<Regex>,
}

impl CompiledRule {
    fn compile(rule: &CustomRule) -> Result<Self> {
        Ok(Self {
            id: rule.id.clone(),
            message: rule.message.clone(),
            severity: rule.severity,
            regex: case_insensitive(&rule.pattern)?,
            unless: rule.unless.as_deref().map(case_insensitive).transpose()?,
        })
    }

    /// Whether some match survives the guard
    fn fires(&self, text: &str) -> bool {
        let Some(guard) = &self.unless else {
            return true;
        };
        self.regex.find_iter(text).any(|m| {
            let rest = &text[m.end()..];
            let line_rest = rest.split('\n').next().unwrap_or("");
            !guard.is_match(line_rest)
        })
    }
}

fn case_insensitive(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| GateError::invalid_pattern(pattern, e))
}

/// Ordered, immutable set of compiled rules
#[derive(Debug)]
pub struct RuleTable {
    set: RegexSet,
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// Compile built-in rules followed by runtime rules
    pub fn new(builtin: &[Rule], extra: &[CustomRule]) -> Result<Self> {
        let defs: Vec<CustomRule> = builtin
            .iter()
            .map(CustomRule::from)
            .chain(extra.iter().cloned())
            .collect();

        let rules = defs
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>>>()?;

        let set = RegexSetBuilder::new(defs.iter().map(|d| d.pattern.as_str()))
            .case_insensitive(true)
            .build()
            .map_err(|e| GateError::invalid_pattern("<rule set>", e))?;

        Ok(Self { set, rules })
    }

    /// Every rule matching `text`, in table order
    pub fn matches(&self, text: &str) -> Vec<Violation> {
        // SetMatches iterates indices in ascending order
        self.set
            .matches(text)
            .iter()
            .map(|idx| &self.rules[idx])
            .filter(|rule| rule.fires(text))
            .map(|rule| Violation::new(rule.severity, rule.id.clone(), rule.message.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
