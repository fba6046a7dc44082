//! The append-only audit ledger: one JSONL line per successful mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use uuid::Uuid;

use crate::fingerprint::MutationClass;
use crate::intent::EntityType;

/// Git revision attached to a trace entry, if the VCS probe succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcsInfo {
    pub revision_id: Option<String>,
}

/// A related artifact (e.g. a referenced issue or constraint) attached to a
/// conversation record. Opaque to the engine, carried through verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub value: String,
}

/// The contiguous range of a file touched by one write, with its own
/// fingerprint (a file can in principle be composed of independently
/// fingerprinted ranges; this mediator always emits a single whole-file range).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRange {
    pub start_line: u32,
    pub end_line: u32,
    pub content_hash: String,
    pub hash_method: String,
    pub ast_node_count: usize,
}

/// One actor's contribution to a traced mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceContributor {
    pub entity_type: EntityType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_identifier: Option<String>,
}

/// One session's view of a file mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConversation {
    pub session_id: String,
    pub contributor: TraceContributor,
    pub ranges: Vec<TraceRange>,
    #[serde(default)]
    pub related: Vec<RelatedItem>,
}

/// One file touched by a traced mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFile {
    pub relative_path: String,
    pub conversations: Vec<TraceConversation>,
}

/// One line of `agent_trace.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub vcs: VcsInfo,
    pub mutation_class: MutationClass,
    pub classification_reason: String,
    pub files: Vec<TraceFile>,
}

/// Append `entry` as a single self-contained JSON line to `path`, creating
/// parent directories as needed. Any I/O error is the caller's to swallow,
/// the trace logger post-hook never lets this propagate to the agent.
pub fn append_entry(path: &Path, entry: &TraceEntry) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let line = serde_json::to_string(entry)?;
    writeln!(file, "{line}")
}
