//! Supplementary static analysis for shell commands
//!
//! External tools only ever add advisory findings. A missing binary, a spawn
//! failure or a timeout means "no findings", never an error.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread::{self, sleep};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::rules::Violation;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A source of advisory findings about a command
pub trait SupplementaryAnalyzer {
    /// Name used as the violation source
    fn name(&self) -> &str;

    /// Warning-severity findings for `command`
    fn supplementary_findings(&self, command: &str) -> Vec<Violation>;
}

/// Analyzer that never reports anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAnalyzer;

impl SupplementaryAnalyzer for NoopAnalyzer {
    fn name(&self) -> &str {
        "noop"
    }

    fn supplementary_findings(&self, _command: &str) -> Vec<Violation> {
        Vec::new()
    }
}

/// shellcheck run against the command written to a temporary script
#[derive(Debug, Clone)]
pub struct Shellcheck {
    program: PathBuf,
    timeout: Duration,
}

impl Shellcheck {
    pub const NAME: &'static str = "shellcheck";

    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Locate shellcheck on PATH
    pub fn detect(timeout: Duration) -> Option<Self> {
        match which::which(Self::NAME) {
            Ok(program) => Some(Self::new(program, timeout)),
            Err(_) => {
                debug!("shellcheck not available, skipping static analysis");
                None
            }
        }
    }

    fn run(&self, command: &str) -> std::io::Result<Option<String>> {
        let mut script = tempfile::Builder::new()
            .prefix("hook-gate-")
            .suffix(".sh")
            .tempfile()?;
        writeln!(script, "#!/bin/bash")?;
        script.write_all(command.as_bytes())?;
        script.flush()?;

        run_with_timeout(&self.program, script.path(), self.timeout)
    }
}

impl SupplementaryAnalyzer for Shellcheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn supplementary_findings(&self, command: &str) -> Vec<Violation> {
        match self.run(command) {
            Ok(Some(stdout)) => parse_gcc_output(&stdout)
                .into_iter()
                .map(|message| Violation::warning(Self::NAME, message))
                .collect(),
            Ok(None) => {
                debug!("shellcheck timed out after {:?}", self.timeout);
                Vec::new()
            }
            Err(e) => {
                debug!("shellcheck execution failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Run `program -f gcc script`, returning stdout, or `None` on timeout.
///
/// Stdout is drained on a reader thread so a chatty child never stalls on a
/// full pipe. A timeout too large to represent means no deadline.
fn run_with_timeout(
    program: &Path,
    script: &Path,
    timeout: Duration,
) -> std::io::Result<Option<String>> {
    let mut child = Command::new(program)
        .arg("-f")
        .arg("gcc")
        .arg(script)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    let reader = child.stdout.take().map(|mut pipe| {
        thread::spawn(move || {
            let mut stdout = String::new();
            pipe.read_to_string(&mut stdout).map(|_| stdout)
        })
    });

    let deadline = Instant::now().checked_add(timeout);
    while child.try_wait()?.is_none() {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            let _ = child.kill();
            let _ = child.wait();
            // The reader is left detached: a grandchild may still hold the pipe
            return Ok(None);
        }
        sleep(POLL_INTERVAL);
    }

    match reader {
        Some(handle) => match handle.join() {
            Ok(stdout) => stdout.map(Some),
            Err(_) => Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                "stdout reader panicked",
            )),
        },
        None => Ok(Some(String::new())),
    }
}

/// Extract the message field from `file:line:column:severity:message` lines
pub fn parse_gcc_output(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.splitn(5, ':').collect();
            (parts.len() == 5).then(|| parts[4].trim().to_string())
        })
        .collect()
}
