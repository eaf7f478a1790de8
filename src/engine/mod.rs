//! Policy engine for hook-gate
//!
//! Routes a hook request to the command or path policy, aggregates the
//! result into a decision and hands it to the reporters.

pub mod command;
pub mod decision;
pub mod path;

use crate::analyzer::{NoopAnalyzer, Shellcheck, SupplementaryAnalyzer};
use crate::audit::AuditLog;
use crate::config::Config;
use crate::error::Result;
use crate::input::{HookInput, Operation};
use crate::report::{Reporter, TracingReporter};

use self::command::CommandPolicy;
use self::decision::{decide, Decision, OperationKind};
use self::path::PathPolicy;

/// The main policy engine
pub struct GateEngine {
    commands: CommandPolicy,
    paths: PathPolicy,
    dry_run: bool,
    reporters: Vec<Box<dyn Reporter>>,
}

impl GateEngine {
    /// Engine for `config`, rooted at the current directory, using
    /// shellcheck when enabled and installed
    pub fn new(config: &Config) -> Result<Self> {
        let analyzer: Box<dyn SupplementaryAnalyzer> = if config.commands.shellcheck {
            match Shellcheck::detect(config.linter_timeout()) {
                Some(shellcheck) => Box::new(shellcheck),
                None => Box::new(NoopAnalyzer),
            }
        } else {
            Box::new(NoopAnalyzer)
        };
        let root = std::env::current_dir()?;
        Self::with_parts(config, root, analyzer)
    }

    /// Engine with an explicit working directory and analyzer
    pub fn with_parts(
        config: &Config,
        root: impl Into<std::path::PathBuf>,
        analyzer: Box<dyn SupplementaryAnalyzer>,
    ) -> Result<Self> {
        let commands = CommandPolicy::new(&config.commands.rules, analyzer)?;
        let paths = PathPolicy::new(root, &config.files.protected, &config.files.allowed)?;

        let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(TracingReporter)];
        if let Some(path) = config.audit_path() {
            reporters.push(Box::new(AuditLog::new(path)));
        }

        Ok(Self {
            commands,
            paths,
            dry_run: config.general.dry_run,
            reporters,
        })
    }

    /// Add another sink for decisions
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Main entry point: evaluate a request, report and return the decision
    pub fn check(&self, input: &HookInput) -> Decision {
        let decision = match input.operation() {
            Operation::Command(command) => self.check_command(&command),
            Operation::FileEdit(paths) => self.check_paths(&paths),
            Operation::Skip => Decision::skipped(self.dry_run),
        };

        for reporter in &self.reporters {
            reporter.report(input, &decision);
        }

        decision
    }

    /// Evaluate a shell command without reporting
    pub fn check_command(&self, command: &str) -> Decision {
        decide(
            OperationKind::Command,
            self.commands.evaluate(command),
            self.dry_run,
        )
    }

    /// Evaluate candidate file paths without reporting
    pub fn check_paths<S: AsRef<str>>(&self, paths: &[S]) -> Decision {
        decide(OperationKind::FileEdit, self.paths.evaluate(paths), self.dry_run)
    }
}

impl std::fmt::Debug for GateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateEngine")
            .field("commands", &self.commands)
            .field("paths", &self.paths)
            .field("dry_run", &self.dry_run)
            .field("reporters", &self.reporters.len())
            .finish()
    }
}
