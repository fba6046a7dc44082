//! The hook pipeline: ordered pre-hooks and post-hooks around a tool call,
//! threading a single [`ToolContext`] and short-circuiting on [`BlockSignal`].

mod block;
mod context;
mod engine;

pub use block::{BlockCode, BlockSignal};
pub use context::ToolContext;
pub use engine::{PipelineEngine, PostHook, PreHook, generic_block};
