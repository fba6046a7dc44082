//! The per-call tool context threaded through the hook pipeline.

use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::fingerprint::MutationClass;
use crate::path::normalize_path;

/// Per-call record carried through pre-hooks and post-hooks. Hooks must
/// never mutate a shared context in place. Each returns a new or cloned
/// value, since the pipeline itself makes no locking guarantees across
/// concurrent calls.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub tool_name: String,
    pub params: HashMap<String, Value>,
    pub workspace_path: PathBuf,
    pub intent_id: Option<String>,
    pub mutation_class: Option<MutationClass>,
    pub old_content_snapshot: Option<String>,
    pub injected_result: Option<String>,
    pub vcs_revision: Option<String>,
}

impl ToolContext {
    pub fn new(
        tool_name: impl Into<String>,
        params: HashMap<String, Value>,
        workspace_path: PathBuf,
        session_intent: Option<String>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            params,
            workspace_path,
            intent_id: session_intent,
            mutation_class: None,
            old_content_snapshot: None,
            injected_result: None,
            vcs_revision: None,
        }
    }

    /// Extract a target path parameter, trying each name in `candidates` in
    /// order. Used with different candidate lists by different hooks (the
    /// handshake tool and the write-set hooks disagree on priority order).
    ///
    /// The joined path is lexically cleaned so a `../`-laden parameter can't
    /// walk a scope check back out of the owned tree before matching runs.
    pub fn extract_path_param(&self, candidates: &[&str]) -> Option<PathBuf> {
        for name in candidates {
            if let Some(Value::String(raw)) = self.params.get(*name) {
                return Some(normalize_path(&self.workspace_path.join(raw)));
            }
        }
        None
    }

    pub fn string_param(&self, name: &str) -> Option<&str> {
        match self.params.get(name) {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}
