//! hook-gate - Policy gate for coding agent hooks
//!
//! # Usage
//!
//! ```bash
//! # As a PreToolUse hook (reads JSON from stdin, exit status 2 blocks)
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | hook-gate
//!
//! # Dry-run mode (report what would be blocked, always allow)
//! hook-gate --dry-run
//! ```
//!
//! Environment: `CLAUDE_HOOK_DRY_RUN`, `CLAUDE_HOOK_DEBUG`,
//! `CLAUDE_HOOK_TIMEOUT`, `CLAUDE_HOOK_LOG_JSON`.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};

use hook_gate::{output, Config, ExitStatus, GateEngine, GateError, HookInput};

#[derive(Parser, Debug)]
#[command(name = "hook-gate", version, about = "Policy gate for coding agent hooks")]
struct Args {
    /// Report what would be blocked, but allow everything
    #[arg(short, long)]
    dry_run: bool,

    /// Debug-level logging
    #[arg(long)]
    debug: bool,

    /// Path to a config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<(Config, Vec<String>), GateError> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let notices = config.apply_env();
    if args.dry_run {
        config.general.dry_run = true;
    }
    if args.debug {
        config.general.debug = true;
    }
    Ok((config, notices))
}

fn run(config: &Config) -> Result<ExitStatus, GateError> {
    let engine = GateEngine::new(config)?;

    let mut raw = String::new();
    io::stdin().read_to_string(&mut raw)?;
    let input = HookInput::from_json(&raw)?;

    let decision = engine.check(&input);
    output::write_report(&decision, &mut io::stderr())?;
    Ok(ExitStatus::from_decision(&decision))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (config, notices) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            hook_gate::logging::init(args.debug, false);
            error!("{}", e);
            return e.exit_status().into();
        }
    };

    hook_gate::logging::init(config.general.debug, config.general.log_json);
    for notice in notices {
        warn!("{}", notice);
    }
    if config.general.dry_run {
        info!("Running in dry-run mode");
    }

    match run(&config) {
        Ok(status) => status.into(),
        Err(e) => {
            error!("{}", e);
            e.exit_status().into()
        }
    }
}
