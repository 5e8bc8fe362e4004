//! Deferred execution.
//!
//! The typing loop never sleeps. It asks a [`Scheduler`] to run its next
//! step after a delay, and the scheduler decides what "later" means: a
//! browser timeout, or a manual clock in tests.

use std::time::Duration;

/// A deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// One-shot timer primitive.
pub trait Scheduler {
    /// Runs `task` once, no sooner than `delay` from now.
    ///
    /// The task must run on the same thread, after the current callback has
    /// returned.
    fn schedule(&self, delay: Duration, task: Task);
}
