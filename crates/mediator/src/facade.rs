//! The dispatch façade: the single entry point a host calls per tool
//! invocation. Owns one [`PipelineEngine`] instance, wired up once at
//! construction in the fixed pre-hook/post-hook order the pipeline requires.

use async_trait::async_trait;
use mediator_core::config::MediatorConfig;
use mediator_core::error::{MediatorError, Result};
use mediator_core::metrics::{ExecutionMetrics, PhaseTimer};
use mediator_core::pipeline::{PipelineEngine, ToolContext};
use mediator_core::vcs::VcsProbe;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

use crate::hooks::post::{IntentMapUpdater, LessonRecorder, TraceLogger};
use crate::hooks::pre::{ContextInjector, IntentGatekeeper, LockGuard, ScopeEnforcer};

/// The host's real tool implementations, invoked only after the pipeline
/// has authorized the call. Out of scope for this crate; implemented by
/// whatever embeds the mediator.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, tool_name: &str, params: &HashMap<String, Value>) -> Value;
}

/// The result of one `dispatch` call.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchResult {
    pub content: Value,
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    pub metrics: ExecutionMetrics,
}

/// Owns the pipeline engine and the configuration/collaborators its hooks
/// are built from. Constructed once per process; hooks are registered
/// exactly once, in registration order: Context Injector, Intent
/// Gatekeeper, Scope Enforcer, Lock Guard (pre), then Trace Logger,
/// Intent-Map Updater, Lesson Recorder (post).
pub struct MediatorFacade {
    engine: PipelineEngine,
    config: MediatorConfig,
}

impl MediatorFacade {
    /// Build a façade for one session. `session_id` is attributed to every
    /// trace entry this façade's Trace Logger appends.
    pub fn new(config: MediatorConfig, session_id: String) -> Self {
        let vcs = VcsProbe::new(&config.vcs);

        let mut engine = PipelineEngine::new();
        engine.register_pre(Box::new(ContextInjector::new()));
        engine.register_pre(Box::new(IntentGatekeeper));
        engine.register_pre(Box::new(ScopeEnforcer::new()));
        engine.register_pre(Box::new(LockGuard));

        engine.register_post(Box::new(TraceLogger::new(
            config.policy.trace_file.clone(),
            vcs,
            session_id,
        )));
        engine.register_post(Box::new(IntentMapUpdater::new(
            config.policy.intent_map_file.clone(),
        )));
        engine.register_post(Box::new(LessonRecorder::new(
            config.policy.lessons_file.clone(),
        )));
        engine.seal();

        Self { engine, config }
    }

    /// Run one tool call through the pipeline. `workspace` is resolved
    /// against the configured paths' roots; callers pass an absolute path.
    pub async fn dispatch(
        &self,
        tool_name: &str,
        params: HashMap<String, Value>,
        workspace: &Path,
        session_intent: Option<String>,
        executor: &dyn ToolExecutor,
    ) -> Result<DispatchResult> {
        let total_timer = PhaseTimer::start();
        let timeout = std::time::Duration::from_millis(self.config.system.max_pipeline_time_ms);

        let result = tokio::time::timeout(
            timeout,
            self.dispatch_inner(tool_name, params, workspace, session_intent, executor, &total_timer),
        )
        .await;

        match result {
            Ok(inner) => inner,
            Err(_) => Err(MediatorError::Timeout {
                operation: format!("dispatch({tool_name})"),
                timeout_ms: self.config.system.max_pipeline_time_ms,
            }),
        }
    }

    async fn dispatch_inner(
        &self,
        tool_name: &str,
        params: HashMap<String, Value>,
        workspace: &Path,
        session_intent: Option<String>,
        executor: &dyn ToolExecutor,
        total_timer: &PhaseTimer,
    ) -> Result<DispatchResult> {
        let ctx = ToolContext::new(tool_name, params, workspace.to_path_buf(), session_intent);

        let pre_timer = PhaseTimer::start();
        let ctx = match self.engine.run_pre(ctx).await {
            Ok(ctx) => ctx,
            Err(signal) => {
                let pre_hook_time_ms = pre_timer.elapsed_ms();
                return Ok(DispatchResult {
                    content: error_payload(&signal.reason, signal.code),
                    blocked: true,
                    block_reason: Some(signal.reason),
                    metrics: ExecutionMetrics {
                        pre_hook_time_ms,
                        tool_time_ms: 0.0,
                        post_hook_time_ms: 0.0,
                        total_time_ms: total_timer.elapsed_ms(),
                    },
                });
            }
        };
        let pre_hook_time_ms = pre_timer.elapsed_ms();

        let mut ctx = ctx;
        let tool_timer = PhaseTimer::start();
        let tool_result = if let Some(injected) = ctx.injected_result.clone() {
            tool_result_payload(Value::String(injected))
        } else {
            let result = executor.execute(&ctx.tool_name, &ctx.params).await;
            tool_result_payload(result)
        };
        let tool_time_ms = tool_timer.elapsed_ms();

        let post_timer = PhaseTimer::start();
        self.engine.run_post(&mut ctx).await;
        let post_hook_time_ms = post_timer.elapsed_ms();

        Ok(DispatchResult {
            content: tool_result,
            blocked: false,
            block_reason: None,
            metrics: ExecutionMetrics {
                pre_hook_time_ms,
                tool_time_ms,
                post_hook_time_ms,
                total_time_ms: total_timer.elapsed_ms(),
            },
        })
    }
}

fn error_payload(reason: &str, code: mediator_core::pipeline::BlockCode) -> Value {
    serde_json::json!({
        "type": "error",
        "error": reason,
        "code": code,
    })
}

fn tool_result_payload(content: Value) -> Value {
    serde_json::json!({
        "type": "result",
        "content": content,
    })
}

