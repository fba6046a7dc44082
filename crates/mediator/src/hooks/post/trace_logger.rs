//! Appends one audit-ledger line per successful write-set tool call.

use async_trait::async_trait;
use chrono::Utc;
use mediator_core::constants::{PATH_PARAMETER_NAMES, is_write_tool};
use mediator_core::error::Result;
use mediator_core::fingerprint::{self, classify};
use mediator_core::intent::EntityType;
use mediator_core::pipeline::{PostHook, ToolContext};
use mediator_core::trace::{
    self, TraceContributor, TraceConversation, TraceEntry, TraceFile, TraceRange, VcsInfo,
};
use mediator_core::vcs::VcsProbe;
use std::path::PathBuf;
use uuid::Uuid;

pub struct TraceLogger {
    /// Workspace-relative path to the ledger file, joined against
    /// `ctx.workspace_path` at call time.
    trace_file: PathBuf,
    vcs: VcsProbe,
    session_id: String,
}

impl TraceLogger {
    pub fn new(trace_file: PathBuf, vcs: VcsProbe, session_id: String) -> Self {
        Self {
            trace_file,
            vcs,
            session_id,
        }
    }
}

#[async_trait]
impl PostHook for TraceLogger {
    fn name(&self) -> &'static str {
        "trace_logger"
    }

    async fn run(&self, ctx: &mut ToolContext) -> Result<()> {
        if !is_write_tool(&ctx.tool_name) {
            return Ok(());
        }

        let Some(target) = ctx.extract_path_param(PATH_PARAMETER_NAMES) else {
            return Ok(());
        };

        let new_content = std::fs::read_to_string(&target).unwrap_or_default();
        let new_fingerprint = fingerprint::fingerprint(&new_content, &target);

        let classification = match &ctx.old_content_snapshot {
            Some(old_content) => classify(old_content, &new_content, &target),
            None => mediator_core::fingerprint::Classification {
                mutation_class: mediator_core::fingerprint::MutationClass::Unknown,
                reason: "no old content captured".to_string(),
                added: Vec::new(),
                removed: Vec::new(),
                changed: Vec::new(),
            },
        };

        let revision_id = self.vcs.current_revision(&ctx.workspace_path).await;
        let relative_path = self.vcs.to_relative_path(&ctx.workspace_path, &target);

        ctx.mutation_class = Some(classification.mutation_class);

        let entry = TraceEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            vcs: VcsInfo { revision_id },
            mutation_class: classification.mutation_class,
            classification_reason: classification.reason,
            files: vec![TraceFile {
                relative_path,
                conversations: vec![TraceConversation {
                    session_id: self.session_id.clone(),
                    contributor: TraceContributor {
                        entity_type: EntityType::Ai,
                        model_identifier: None,
                    },
                    ranges: vec![TraceRange {
                        start_line: 1,
                        end_line: new_content.lines().count().max(1) as u32,
                        content_hash: new_fingerprint.hash,
                        hash_method: format!("{:?}", new_fingerprint.method).to_lowercase(),
                        ast_node_count: new_fingerprint.node_count,
                    }],
                    related: Vec::new(),
                }],
            }],
        };

        let path = ctx.workspace_path.join(&self.trace_file);
        if let Err(e) = trace::append_entry(&path, &entry) {
            tracing::warn!(error = %e, path = %path.display(), "failed to append audit ledger entry");
        }
        Ok(())
    }
}
