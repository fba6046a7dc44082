//! Block signals: the sum-type alternative to raising an exception from a
//! pre-hook. A pre-hook returns `Result<ToolContext, BlockSignal>`; the
//! engine short-circuits on the error branch without ever unwinding.

use serde::{Deserialize, Serialize};

/// Reason code for a pipeline short-circuit, surfaced to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockCode {
    NoIntentDeclared,
    ScopeViolation,
    StaleFile,
    UnknownIntent,
    CompleteIntent,
    BlockedIntent,
    GenericBlock,
}

/// An intentional authorization decision that aborts the pre-hook chain.
/// Distinct from [`crate::error::MediatorError`]: this is a policy outcome,
/// not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSignal {
    pub reason: String,
    pub code: BlockCode,
}

impl BlockSignal {
    pub fn new(code: BlockCode, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            code,
        }
    }
}
