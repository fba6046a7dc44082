//! Handshake hook: answers `select_active_intent` without ever running it.

use async_trait::async_trait;
use mediator_core::intent::{IntentStatus, PolicyStore};
use mediator_core::pipeline::{BlockCode, BlockSignal, PreHook, ToolContext, generic_block};

use crate::xml::intent_context;

pub struct ContextInjector {
    store: PolicyStore,
}

impl ContextInjector {
    pub fn new() -> Self {
        Self {
            store: PolicyStore::new(),
        }
    }
}

#[async_trait]
impl PreHook for ContextInjector {
    fn name(&self) -> &'static str {
        "context_injector"
    }

    async fn run(&self, mut ctx: ToolContext) -> Result<ToolContext, BlockSignal> {
        if ctx.tool_name != "select_active_intent" {
            return Ok(ctx);
        }

        let intent_id = match ctx.string_param("intent_id") {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(BlockSignal::new(
                    BlockCode::GenericBlock,
                    "select_active_intent requires a non-empty intent_id",
                ));
            }
        };

        let intent = self
            .store
            .find_intent(&ctx.workspace_path, &intent_id)
            .map_err(|e| generic_block("context_injector", e))?;

        let Some(intent) = intent else {
            let available = self
                .store
                .load_intents(&ctx.workspace_path)
                .map(|intents| {
                    intents
                        .into_iter()
                        .map(|i| i.id)
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default();
            return Err(BlockSignal::new(
                BlockCode::UnknownIntent,
                format!("unknown intent '{intent_id}'; available intents: [{available}]"),
            ));
        };

        match intent.status {
            IntentStatus::Complete => {
                return Err(BlockSignal::new(
                    BlockCode::CompleteIntent,
                    format!("intent '{intent_id}' is already complete"),
                ));
            }
            IntentStatus::Blocked => {
                let reason = intent.blocked_reason.clone().unwrap_or_default();
                return Err(BlockSignal::new(
                    BlockCode::BlockedIntent,
                    format!("intent '{intent_id}' is blocked: {reason}"),
                ));
            }
            IntentStatus::Pending | IntentStatus::InProgress => {}
        }

        ctx.intent_id = Some(intent.id.clone());
        ctx.injected_result = Some(intent_context(&intent));
        Ok(ctx)
    }
}
