//! End-to-end dispatch scenarios against a real temporary workspace.

use async_trait::async_trait;
use chrono::Utc;
use mediator::facade::{MediatorFacade, ToolExecutor};
use mediator_core::config::MediatorConfig;
use mediator_core::fingerprint::raw_fingerprint;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::Path;

struct NullExecutor;

#[async_trait]
impl ToolExecutor for NullExecutor {
    async fn execute(&self, _tool_name: &str, _params: &HashMap<String, Value>) -> Value {
        Value::Null
    }
}

fn facade(workspace: &Path) -> MediatorFacade {
    let config = MediatorConfig::load(workspace).unwrap();
    MediatorFacade::new(config, "test-session".to_string())
}

fn seed_intent(workspace: &Path, id: &str, scope: &str, status: &str) {
    std::fs::create_dir_all(workspace.join(".orchestration")).unwrap();
    let now = Utc::now().to_rfc3339();
    let yaml = format!(
        "active_intents:\n\
         - id: {id}\n  \
           name: Sample intent\n  \
           status: {status}\n  \
           owned_scope:\n    - \"{scope}\"\n  \
           constraints: []\n  \
           acceptance_criteria: []\n  \
           depends_on: []\n  \
           contributors: []\n  \
           created_at: {now}\n  \
           updated_at: {now}\n"
    );
    std::fs::write(workspace.join(".orchestration/active_intents.yaml"), yaml).unwrap();
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect()
}

#[tokio::test]
async fn s1_handshake_returns_injected_context_without_running_the_tool() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "src/api/**", "IN_PROGRESS");
    let facade = facade(dir.path());

    let result = facade
        .dispatch(
            "select_active_intent",
            params(&[("intent_id", "INT-001")]),
            dir.path(),
            None,
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(!result.blocked);
    let content = result.content["content"].as_str().unwrap();
    assert!(content.contains("<id>INT-001</id>"));
    assert!(content.contains("<status>IN_PROGRESS</status>"));
    assert!(content.contains("src/api/**"));
}

#[tokio::test]
async fn s2_write_in_scope_is_allowed_and_traced() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "src/api/**", "IN_PROGRESS");
    std::fs::create_dir_all(dir.path().join("src/api")).unwrap();
    let facade = facade(dir.path());

    let target = dir.path().join("src/api/routes.ts");
    std::fs::write(&target, "export function f() {}").unwrap();

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "src/api/routes.ts")]),
            dir.path(),
            Some("INT-001".to_string()),
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(!result.blocked);

    let trace_path = dir.path().join(".orchestration/agent_trace.jsonl");
    let content = std::fs::read_to_string(trace_path).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[tokio::test]
async fn s3_write_out_of_scope_is_blocked() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "src/api/**", "IN_PROGRESS");
    let facade = facade(dir.path());

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "src/ui/button.tsx")]),
            dir.path(),
            Some("INT-001".to_string()),
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(result.blocked);
    assert_eq!(result.content["code"], "SCOPE_VIOLATION");
}

#[tokio::test]
async fn s4_write_without_intent_is_blocked() {
    let dir = tempfile::tempdir().unwrap();
    let facade = facade(dir.path());

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "src/api/routes.ts")]),
            dir.path(),
            None,
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(result.blocked);
    assert_eq!(result.content["code"], "NO_INTENT_DECLARED");
}

#[tokio::test]
async fn s5_stale_read_hash_is_blocked() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "**", "IN_PROGRESS");
    let facade = facade(dir.path());

    let target = dir.path().join("a.ts");
    std::fs::write(&target, "export function f() {}").unwrap();

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "a.ts"), ("read_hash", "raw-sha256:deadbeef")]),
            dir.path(),
            Some("INT-001".to_string()),
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(result.blocked);
    assert_eq!(result.content["code"], "STALE_FILE");
}

#[tokio::test]
async fn s5b_matching_read_hash_passes() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "**", "IN_PROGRESS");
    let facade = facade(dir.path());

    let target = dir.path().join("a.ts");
    let original = "export function f() {}";
    std::fs::write(&target, original).unwrap();
    let current_hash = raw_fingerprint(original).hash;

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "a.ts"), ("read_hash", &current_hash)]),
            dir.path(),
            Some("INT-001".to_string()),
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(!result.blocked);
}

#[tokio::test]
async fn s6_arity_change_is_intent_evolution_and_updates_claude_md() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "**", "IN_PROGRESS");
    let facade = facade(dir.path());

    let target = dir.path().join("a.ts");
    std::fs::write(&target, "export function f(a) {}").unwrap();
    let current_hash = raw_fingerprint("export function f(a) {}").hash;

    std::fs::write(&target, "export function f(a, b) {}").unwrap();

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "a.ts"), ("read_hash", &current_hash)]),
            dir.path(),
            Some("INT-001".to_string()),
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(!result.blocked);

    let trace_path = dir.path().join(".orchestration/agent_trace.jsonl");
    let trace_content = std::fs::read_to_string(trace_path).unwrap();
    assert!(trace_content.contains("INTENT_EVOLUTION"));

    let lessons = std::fs::read_to_string(dir.path().join("CLAUDE.md")).unwrap();
    assert!(lessons.contains("INT-001"));
}

#[tokio::test]
async fn s7_reformat_only_is_ast_refactor() {
    let dir = tempfile::tempdir().unwrap();
    seed_intent(dir.path(), "INT-001", "**", "IN_PROGRESS");
    let facade = facade(dir.path());

    let target = dir.path().join("a.ts");
    std::fs::write(&target, "export function f(a) {}").unwrap();
    let current_hash = raw_fingerprint("export function f(a) {}").hash;

    std::fs::write(&target, "export function f(a) {\n\n  return a;\n}\n").unwrap();

    let result = facade
        .dispatch(
            "write_to_file",
            params(&[("path", "a.ts"), ("read_hash", &current_hash)]),
            dir.path(),
            Some("INT-001".to_string()),
            &NullExecutor,
        )
        .await
        .unwrap();

    assert!(!result.blocked);

    let trace_path = dir.path().join(".orchestration/agent_trace.jsonl");
    let trace_content = std::fs::read_to_string(trace_path).unwrap();
    assert!(trace_content.contains("AST_REFACTOR"));
}
