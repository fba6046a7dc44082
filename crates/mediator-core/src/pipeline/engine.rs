//! The hook pipeline engine: ordered pre-hook and post-hook registries with
//! block-signal short-circuiting and post-hook failure containment.

use async_trait::async_trait;
use tracing::warn;

use super::block::{BlockCode, BlockSignal};
use super::context::ToolContext;
use crate::error::Result;

/// A pre-hook may enrich the context, pass it through unchanged, or abort
/// the chain with a block signal.
#[async_trait]
pub trait PreHook: Send + Sync {
    /// Stable name used in `GENERIC_BLOCK` reasons when this hook panics
    /// its own error path.
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: ToolContext) -> std::result::Result<ToolContext, BlockSignal>;
}

/// A post-hook observes (and may enrich, e.g. with a computed mutation
/// class) the context after the tool has run. Failures are logged and
/// swallowed; they never affect the result already returned to the agent.
#[async_trait]
pub trait PostHook: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &mut ToolContext) -> Result<()>;
}

/// Owns the ordered pre-hook and post-hook lists. A plain value; the
/// dispatch façade holds exactly one instance, constructed once.
#[derive(Default)]
pub struct PipelineEngine {
    pre_hooks: Vec<Box<dyn PreHook>>,
    post_hooks: Vec<Box<dyn PostHook>>,
    sealed: bool,
}

impl PipelineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pre-hook. A no-op once the engine has been sealed.
    pub fn register_pre(&mut self, hook: Box<dyn PreHook>) {
        if !self.sealed {
            self.pre_hooks.push(hook);
        }
    }

    /// Register a post-hook. A no-op once the engine has been sealed.
    pub fn register_post(&mut self, hook: Box<dyn PostHook>) {
        if !self.sealed {
            self.post_hooks.push(hook);
        }
    }

    /// Freeze registration. Called once by the façade after wiring up its
    /// fixed hook order; further `register_pre`/`register_post` calls are
    /// silently ignored.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Run pre-hooks in registration order. Stops at the first block signal
    /// or the first enriched context that carries an injected result.
    pub async fn run_pre(
        &self,
        mut ctx: ToolContext,
    ) -> std::result::Result<ToolContext, BlockSignal> {
        for hook in &self.pre_hooks {
            ctx = hook.run(ctx).await?;
        }
        Ok(ctx)
    }

    /// Run all post-hooks, best-effort. A failing hook is logged and does
    /// not stop the remaining hooks from running.
    pub async fn run_post(&self, ctx: &mut ToolContext) {
        for hook in &self.post_hooks {
            if let Err(error) = hook.run(ctx).await {
                warn!(hook = hook.name(), %error, "post-hook failed, continuing");
            }
        }
    }
}

/// Wrap a pre-hook's unexpected internal error as a `GENERIC_BLOCK`. Used by
/// pre-hook implementations that perform fallible I/O before deciding to
/// allow or block. A buggy or unlucky hook must never open a hole.
pub fn generic_block(hook_name: &str, error: impl std::fmt::Display) -> BlockSignal {
    BlockSignal::new(
        BlockCode::GenericBlock,
        format!("internal error in {hook_name}: {error}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct AllowHook;
    #[async_trait]
    impl PreHook for AllowHook {
        fn name(&self) -> &'static str {
            "allow"
        }
        async fn run(&self, ctx: ToolContext) -> std::result::Result<ToolContext, BlockSignal> {
            Ok(ctx)
        }
    }

    struct BlockHook;
    #[async_trait]
    impl PreHook for BlockHook {
        fn name(&self) -> &'static str {
            "block"
        }
        async fn run(&self, _ctx: ToolContext) -> std::result::Result<ToolContext, BlockSignal> {
            Err(BlockSignal::new(BlockCode::GenericBlock, "nope"))
        }
    }

    struct CountingPostHook(Arc<AtomicUsize>, bool);
    #[async_trait]
    impl PostHook for CountingPostHook {
        fn name(&self) -> &'static str {
            "counting"
        }
        async fn run(&self, _ctx: &mut ToolContext) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            if self.1 {
                return Err(crate::error::MediatorError::InvalidInput {
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new("Edit", HashMap::new(), PathBuf::from("/ws"), None)
    }

    #[tokio::test]
    async fn pre_hooks_run_in_order_until_block() {
        let mut engine = PipelineEngine::new();
        engine.register_pre(Box::new(AllowHook));
        engine.register_pre(Box::new(BlockHook));
        engine.seal();

        let result = engine.run_pre(ctx()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn register_after_seal_is_a_no_op() {
        let mut engine = PipelineEngine::new();
        engine.register_pre(Box::new(AllowHook));
        engine.seal();
        engine.register_pre(Box::new(BlockHook));

        let result = engine.run_pre(ctx()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failing_post_hook_does_not_stop_remaining_hooks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut engine = PipelineEngine::new();
        engine.register_post(Box::new(CountingPostHook(counter.clone(), true)));
        engine.register_post(Box::new(CountingPostHook(counter.clone(), false)));
        engine.seal();

        engine.run_post(&mut ctx()).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
