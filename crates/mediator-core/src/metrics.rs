//! Per-call execution timing. Attached to the dispatch response for
//! diagnostics only, never persisted to the audit ledger.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Wall-clock time spent in each pipeline phase of a single dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionMetrics {
    pub pre_hook_time_ms: f64,
    pub tool_time_ms: f64,
    pub post_hook_time_ms: f64,
    pub total_time_ms: f64,
}

/// Stopwatch used by the façade to time each phase without manual
/// `Instant` bookkeeping at every call site.
pub struct PhaseTimer {
    start: Instant,
}

impl PhaseTimer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        duration_to_ms(self.start.elapsed())
    }
}

fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_time_is_non_negative() {
        let timer = PhaseTimer::start();
        assert!(timer.elapsed_ms() >= 0.0);
    }
}
