//! Clock/timer abstraction the live feed is driven by.
//!
//! The feed never talks to a concrete timer: it asks a [`Scheduler`] for a
//! repeating task and keeps the returned [`TimerHandle`] so it can cancel it.
//! [`TokioScheduler`] runs on wall-clock time, [`ManualClock`] is advanced by
//! hand and fires tasks synchronously.

pub mod manual;
pub mod tokio_timer;

use std::time::Duration;

pub use self::manual::ManualClock;
pub use self::tokio_timer::TokioScheduler;

/// Work run on every firing of a repeating timer.
pub type RepeatingTask = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler {
    /// Run `task` every `interval`, first after one full interval.
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> Box<dyn TimerHandle>;
}

/// Cancellable handle to a scheduled repetition.
pub trait TimerHandle: Send {
    /// Stop further firings. Calling it again is a no-op.
    fn cancel(&mut self);

    fn is_cancelled(&self) -> bool;
}
