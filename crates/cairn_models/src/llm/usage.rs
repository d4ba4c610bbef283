//! Shared token usage accounting.

use super::types::Usage;
use parking_lot::Mutex;
use std::sync::Arc;

/// Accumulates token usage across every model call made through an [`Llm`](super::Llm).
///
/// Cloning yields another handle to the same totals, so one counter can be
/// shared by an agent, its nested agents, and whoever reports usage.
#[derive(Debug, Clone, Default)]
pub struct UsageCounter {
    totals: Arc<Mutex<Totals>>,
}

#[derive(Debug, Default)]
struct Totals {
    calls: u64,
    input_tokens: u64,
    output_tokens: u64,
}

impl UsageCounter {
    /// Creates a counter with all totals at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the usage reported for one model call.
    pub fn record(&self, usage: &Usage) {
        let mut totals = self.totals.lock();
        totals.calls += 1;
        totals.input_tokens += usage.input_tokens.unwrap_or(0);
        totals.output_tokens += usage.output_tokens.unwrap_or(0);
    }

    /// Returns the number of model calls recorded.
    #[must_use]
    pub fn calls(&self) -> u64 {
        self.totals.lock().calls
    }

    /// Returns the accumulated usage.
    #[must_use]
    pub fn snapshot(&self) -> Usage {
        let totals = self.totals.lock();
        Usage {
            input_tokens: Some(totals.input_tokens),
            output_tokens: Some(totals.output_tokens),
            total_tokens: Some(totals.input_tokens + totals.output_tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_totals() {
        let counter = UsageCounter::new();
        let other = counter.clone();

        counter.record(&Usage {
            input_tokens: Some(10),
            output_tokens: Some(5),
            total_tokens: Some(15),
        });
        other.record(&Usage {
            input_tokens: Some(1),
            output_tokens: None,
            total_tokens: None,
        });

        let usage = counter.snapshot();
        assert_eq!(counter.calls(), 2);
        assert_eq!(usage.input_tokens, Some(11));
        assert_eq!(usage.output_tokens, Some(5));
        assert_eq!(usage.total_tokens, Some(16));
    }
}
