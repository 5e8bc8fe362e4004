//! Browser timeouts as a [`Scheduler`].

use std::time::Duration;

use folio_core::{Scheduler, Task};
use gloo::timers::callback::Timeout;

/// Schedules tasks with `setTimeout`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        // Fire-and-forget: the browser owns the callback until it runs.
        let _ = Timeout::new(timeout_millis(delay), task).forget();
    }
}

/// Converts `delay` to the millisecond count `setTimeout` accepts.
#[must_use]
pub fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_millis() {
        assert_eq!(timeout_millis(Duration::from_millis(100)), 100);
        assert_eq!(timeout_millis(Duration::from_micros(1_500)), 1);
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), u32::MAX);
    }
}
