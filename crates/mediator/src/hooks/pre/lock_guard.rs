//! Optimistic concurrency: a write must declare the raw fingerprint it read.

use async_trait::async_trait;
use mediator_core::constants::{PATH_PARAMETER_NAMES, is_write_tool};
use mediator_core::fingerprint::raw_fingerprint;
use mediator_core::pipeline::{BlockCode, BlockSignal, PreHook, ToolContext};

pub struct LockGuard;

#[async_trait]
impl PreHook for LockGuard {
    fn name(&self) -> &'static str {
        "lock_guard"
    }

    async fn run(&self, mut ctx: ToolContext) -> Result<ToolContext, BlockSignal> {
        if !is_write_tool(&ctx.tool_name) {
            return Ok(ctx);
        }

        let Some(target) = ctx.extract_path_param(PATH_PARAMETER_NAMES) else {
            return Ok(ctx);
        };

        if !target.is_file() {
            return Ok(ctx);
        }

        let Ok(current_content) = std::fs::read_to_string(&target) else {
            return Ok(ctx);
        };

        let current_fingerprint = raw_fingerprint(&current_content);
        ctx.old_content_snapshot = Some(current_content);

        if let Some(declared) = ctx.string_param("read_hash") {
            if declared != current_fingerprint.hash {
                return Err(BlockSignal::new(
                    BlockCode::StaleFile,
                    format!(
                        "stale read: declared read_hash '{declared}' does not match current \
                         fingerprint '{}'; re-read the file and retry with its current hash",
                        current_fingerprint.hash,
                    ),
                ));
            }
        }

        Ok(ctx)
    }
}
