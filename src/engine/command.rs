//! Shell command validation
//!
//! Pattern rules first, then the first-token alternative lookup, then
//! whatever the supplementary analyzer has to add. The order only affects
//! reporting.

use crate::analyzer::{NoopAnalyzer, SupplementaryAnalyzer};
use crate::error::Result;
use crate::rules::commands::{alternative_for, ALTERNATIVE_SOURCE, COMMAND_RULES};
use crate::rules::{CustomRule, RuleTable, Violation};

pub struct CommandPolicy {
    rules: RuleTable,
    analyzer: Box<dyn SupplementaryAnalyzer>,
}

impl CommandPolicy {
    /// Built-in rules followed by `extra`, with the given analyzer
    pub fn new(extra: &[CustomRule], analyzer: Box<dyn SupplementaryAnalyzer>) -> Result<Self> {
        Ok(Self {
            rules: RuleTable::new(COMMAND_RULES, extra)?,
            analyzer,
        })
    }

    /// Built-in rules, no external analysis
    pub fn builtin() -> Result<Self> {
        Self::new(&[], Box::new(NoopAnalyzer))
    }

    pub fn analyzer_name(&self) -> &str {
        self.analyzer.name()
    }

    /// All violations for `command`, rules before alternatives before
    /// analyzer findings
    pub fn evaluate(&self, command: &str) -> Vec<Violation> {
        if command.trim().is_empty() {
            return Vec::new();
        }

        let mut violations = self.rules.matches(command);

        if let Some(suggestion) = alternative_for(command) {
            violations.push(Violation::warning(ALTERNATIVE_SOURCE, suggestion));
        }

        violations.extend(self.analyzer.supplementary_findings(command));
        violations
    }
}

impl std::fmt::Debug for CommandPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandPolicy")
            .field("rules", &self.rules.len())
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}
