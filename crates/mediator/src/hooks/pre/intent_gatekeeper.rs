//! Requires a declared intent before any destructive tool runs.

use async_trait::async_trait;
use mediator_core::constants::{is_destructive, is_read_only};
use mediator_core::pipeline::{BlockCode, BlockSignal, PreHook, ToolContext};

pub struct IntentGatekeeper;

#[async_trait]
impl PreHook for IntentGatekeeper {
    fn name(&self) -> &'static str {
        "intent_gatekeeper"
    }

    async fn run(&self, ctx: ToolContext) -> Result<ToolContext, BlockSignal> {
        if is_read_only(&ctx.tool_name) || !is_destructive(&ctx.tool_name) {
            return Ok(ctx);
        }

        if ctx.intent_id.is_none() {
            return Err(BlockSignal::new(
                BlockCode::NoIntentDeclared,
                "no intent declared; call select_active_intent with an in-progress intent id before invoking this tool",
            ));
        }

        Ok(ctx)
    }
}
