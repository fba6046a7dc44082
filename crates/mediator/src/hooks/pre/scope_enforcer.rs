//! Confines a declared intent's writes to its `owned_scope`.

use async_trait::async_trait;
use mediator_core::constants::{PATH_PARAMETER_NAMES, is_read_only};
use mediator_core::intent::PolicyStore;
use mediator_core::pipeline::{BlockCode, BlockSignal, PreHook, ToolContext, generic_block};

pub struct ScopeEnforcer {
    store: PolicyStore,
}

impl ScopeEnforcer {
    pub fn new() -> Self {
        Self {
            store: PolicyStore::new(),
        }
    }
}

#[async_trait]
impl PreHook for ScopeEnforcer {
    fn name(&self) -> &'static str {
        "scope_enforcer"
    }

    async fn run(&self, ctx: ToolContext) -> Result<ToolContext, BlockSignal> {
        if is_read_only(&ctx.tool_name) {
            return Ok(ctx);
        }

        let Some(intent_id) = ctx.intent_id.clone() else {
            return Ok(ctx);
        };

        let Some(target) = ctx.extract_path_param(PATH_PARAMETER_NAMES) else {
            return Ok(ctx);
        };

        if self.store.is_file_ignored(&ctx.workspace_path, &target) {
            return Ok(ctx);
        }

        let intent = self
            .store
            .find_intent(&ctx.workspace_path, &intent_id)
            .map_err(|e| generic_block("scope_enforcer", e))?;

        let Some(intent) = intent else {
            // Already surfaced as NO_INTENT_DECLARED or UNKNOWN_INTENT upstream.
            return Ok(ctx);
        };

        if self.store.is_file_in_scope(&ctx.workspace_path, &intent, &target) {
            return Ok(ctx);
        }

        let scope = intent.owned_scope.join(", ");
        Err(BlockSignal::new(
            BlockCode::ScopeViolation,
            format!(
                "target path is outside intent '{intent_id}' owned scope [{scope}]; \
                 either restrict the write to an authorized path or update the intent's \
                 owned_scope to include it",
            ),
        ))
    }
}
