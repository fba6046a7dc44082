//! Renders a best-effort human-readable snapshot of intent state.

use async_trait::async_trait;
use mediator_core::error::Result;
use mediator_core::intent::PolicyStore;
use mediator_core::pipeline::{PostHook, ToolContext};
use std::fmt::Write as _;
use std::path::PathBuf;

pub struct IntentMapUpdater {
    intent_map_file: PathBuf,
    store: PolicyStore,
}

impl IntentMapUpdater {
    pub fn new(intent_map_file: PathBuf) -> Self {
        Self {
            intent_map_file,
            store: PolicyStore::new(),
        }
    }

    fn render(&self, ctx: &ToolContext) -> Result<String> {
        let intents = self.store.load_intents(&ctx.workspace_path)?;
        let mut out = String::from("# Intent Map\n\nGenerated by the mediator. Do not hand-edit.\n\n");
        if intents.is_empty() {
            out.push_str("_No active intents declared._\n");
            return Ok(out);
        }
        for intent in intents {
            let _ = writeln!(out, "## {} - {}", intent.id, intent.name);
            let _ = writeln!(out, "- status: {}", intent.status);
            let _ = writeln!(out, "- owned scope: {}", intent.owned_scope.join(", "));
            if let Some(reason) = &intent.blocked_reason {
                let _ = writeln!(out, "- blocked reason: {reason}");
            }
            out.push('\n');
        }
        Ok(out)
    }
}

#[async_trait]
impl PostHook for IntentMapUpdater {
    fn name(&self) -> &'static str {
        "intent_map_updater"
    }

    async fn run(&self, ctx: &mut ToolContext) -> Result<()> {
        let rendered = self.render(ctx)?;
        let path = ctx.workspace_path.join(&self.intent_map_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, rendered)?;
        Ok(())
    }
}
