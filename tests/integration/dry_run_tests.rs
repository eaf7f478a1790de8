//! Dry-run and exit-status behavior

use hook_gate::{decide, Config, ExitStatus, OperationKind, Outcome, Severity, Violation};

use crate::{bash_input, edit_input, engine, engine_at};

fn dry_run_engine() -> hook_gate::GateEngine {
    let mut config = Config::default();
    config.general.dry_run = true;
    engine_at(&config, "/nonexistent/project")
}

#[test]
fn test_dry_run_allows_blocking_command() {
    let input = bash_input("rm -rf /");

    let wet = engine().check(&input);
    assert!(wet.is_block());
    assert_eq!(ExitStatus::from_decision(&wet), ExitStatus::PolicyViolation);

    let dry = dry_run_engine().check(&input);
    assert_eq!(dry.outcome, Outcome::Allow);
    assert!(dry.would_block());
    assert_eq!(dry.violations, wet.violations);
    assert_eq!(ExitStatus::from_decision(&dry), ExitStatus::Success);
}

#[test]
fn test_dry_run_allows_protected_file() {
    let decision = dry_run_engine().check(&edit_input("Write", ".env"));
    assert!(decision.is_allow());
    assert!(decision.dry_run);
    assert_eq!(decision.errors().count(), 1);
}

#[test]
fn test_dry_run_law_over_mixed_inputs() {
    let sets = vec![
        vec![],
        vec![Violation::warning("eval", "eval")],
        vec![Violation::error("rm-root", "root")],
        vec![
            Violation::new(Severity::Error, "a", "a"),
            Violation::new(Severity::Warning, "b", "b"),
            Violation::new(Severity::Error, "c", "c"),
        ],
    ];
    for violations in sets {
        for kind in [OperationKind::Command, OperationKind::FileEdit] {
            assert_eq!(decide(kind, violations.clone(), true).outcome, Outcome::Allow);
        }
    }
}

#[test]
fn test_env_toggle_enables_dry_run() {
    let mut config = Config::default();
    config.apply_env_from(|key| (key == "CLAUDE_HOOK_DRY_RUN").then(|| "1".to_string()));
    let engine = engine_at(&config, "/nonexistent/project");
    assert!(engine.check(&bash_input("chmod 777 x")).is_allow());
}

#[test]
fn test_malformed_input_is_misconfiguration() {
    let err = hook_gate::HookInput::from_json("{\"tool_name\": ").unwrap_err();
    let err = hook_gate::GateError::from(err);
    assert_eq!(err.exit_status(), ExitStatus::Misconfiguration);
    assert_eq!(err.exit_status().code(), 4);
}
