// Vane - Edge feature-vector telemetry
// Copyright (c) 2025 Vane contributors
//
// Licensed under AGPL-3.0. See LICENSE file for details.

//! Retry policy for the transport loops
//!
//! The link's send and control-receive loops retry stalled operations under
//! an injectable policy. The default is unbounded with no delay, which is
//! the original block-until-complete contract; a bounded policy turns a
//! persistent stall into a typed error instead of a livelock.

use std::time::Duration;

/// Retry budget for one stalled transport operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: Option<u32>,
    delay: Duration,
}

impl RetryPolicy {
    /// Retry forever with no delay (block-until-complete)
    pub fn unbounded() -> Self {
        Self {
            max_attempts: None,
            delay: Duration::ZERO,
        }
    }

    /// Retry at most `max_attempts` times, sleeping `delay` between attempts
    pub fn bounded(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: Some(max_attempts),
            delay,
        }
    }

    /// Replace the inter-attempt delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The attempt cap, if any
    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// Delay before retry number `attempt` (0-indexed).
    ///
    /// Returns `None` once the budget is spent.
    pub fn delay_for_attempt(&self, attempt: u32) -> Option<Duration> {
        match self.max_attempts {
            Some(max) if attempt >= max => None,
            _ => Some(self.delay),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), None);
        assert_eq!(policy.delay_for_attempt(0), Some(Duration::ZERO));
        assert_eq!(policy.delay_for_attempt(1_000_000), Some(Duration::ZERO));
    }

    #[test]
    fn test_bounded_budget() {
        let policy = RetryPolicy::bounded(3, Duration::from_millis(5));
        assert_eq!(policy.delay_for_attempt(0), Some(Duration::from_millis(5)));
        assert_eq!(policy.delay_for_attempt(2), Some(Duration::from_millis(5)));
        assert_eq!(policy.delay_for_attempt(3), None);
        assert_eq!(policy.delay_for_attempt(4), None);
    }

    #[test]
    fn test_with_delay() {
        let policy = RetryPolicy::unbounded().with_delay(Duration::from_millis(1));
        assert_eq!(policy.delay_for_attempt(9), Some(Duration::from_millis(1)));
    }
}
