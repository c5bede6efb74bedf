//! Counting repeated presses of the same command.

use super::Action;
use std::time::{Duration, Instant};

/// Presses closer together than this count as a repeat.
pub const REPEAT_WINDOW: Duration = Duration::from_millis(500);

/// Tracks how many times the last action was repeated in a row.
#[derive(Debug, Clone, Default)]
pub struct RepeatTracker {
    last: Option<(Action, Instant)>,
    count: usize,
}

impl RepeatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press of `action` at `now` and return its repeat count:
    /// 0 for a fresh press, 1 for the first repeat, and so on.
    pub fn record(&mut self, action: Action, now: Instant) -> usize {
        self.count = match self.last {
            Some((previous, at))
                if previous == action && now.saturating_duration_since(at) < REPEAT_WINDOW =>
            {
                self.count + 1
            }
            _ => 0,
        };
        self.last = Some((action, now));
        self.count
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.count = 0;
    }
}
