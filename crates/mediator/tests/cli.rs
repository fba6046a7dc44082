//! End-to-end tests driving the `mediator` binary directly, stdin in and
//! stdout/exit-code out, the way a host process invokes it as a hook script.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn seed_intent(workspace: &std::path::Path) {
    fs::create_dir_all(workspace.join(".orchestration")).unwrap();
    let yaml = "active_intents:\n\
         - id: INT-001\n  \
           name: Sample intent\n  \
           status: IN_PROGRESS\n  \
           owned_scope:\n    - \"src/**\"\n  \
           constraints: []\n  \
           acceptance_criteria: []\n  \
           depends_on: []\n  \
           contributors: []\n  \
           created_at: 2026-01-01T00:00:00Z\n  \
           updated_at: 2026-01-01T00:00:00Z\n";
    fs::write(workspace.join(".orchestration/active_intents.yaml"), yaml).unwrap();
}

#[test]
fn dispatch_without_an_intent_blocks_a_destructive_tool() {
    let dir = tempfile::tempdir().unwrap();

    let envelope = r#"{"tool_name": "write_to_file", "params": {"path": "src/a.ts"}}"#;

    Command::cargo_bin("mediator")
        .unwrap()
        .arg("dispatch")
        .arg("--workspace")
        .arg(dir.path())
        .write_stdin(envelope)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("NO_INTENT_DECLARED"));
}

#[test]
fn dispatch_handshake_returns_injected_context() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path());

    let envelope = r#"{"tool_name": "select_active_intent", "params": {"intent_id": "INT-001"}}"#;

    Command::cargo_bin("mediator")
        .unwrap()
        .arg("dispatch")
        .arg("--workspace")
        .arg(dir.path())
        .write_stdin(envelope)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("<id>INT-001</id>"));
}

#[test]
fn malformed_envelope_is_a_general_error() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("mediator")
        .unwrap()
        .arg("dispatch")
        .arg("--workspace")
        .arg(dir.path())
        .write_stdin("not json")
        .assert()
        .code(1);
}
