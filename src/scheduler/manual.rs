use super::{RepeatingTask, Scheduler, TimerHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A virtual clock that only moves when told to.
///
/// Tasks fire synchronously inside [`ManualClock::advance`], in due order
/// (ties broken by scheduling order). Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<ClockInner>>,
}

#[derive(Default)]
struct ClockInner {
    now: Duration,
    next_seq: u64,
    timers: Vec<TimerEntry>,
}

struct TimerEntry {
    seq: u64,
    interval: Duration,
    next_due: Duration,
    // Taken out while the task runs so the clock lock is not held.
    task: Option<RepeatingTask>,
    cancelled: Arc<AtomicBool>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ClockInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Virtual time elapsed since the clock was created.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of timers that can still fire.
    pub fn pending(&self) -> usize {
        self.lock()
            .timers
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::Acquire))
            .count()
    }

    /// Move the clock forward by `by`, firing every task that falls due.
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            let (seq, mut task) = {
                let mut inner = self.lock();
                inner
                    .timers
                    .retain(|t| !t.cancelled.load(Ordering::Acquire));

                let due = inner
                    .timers
                    .iter_mut()
                    .filter(|t| t.task.is_some() && t.next_due <= target)
                    .min_by_key(|t| (t.next_due, t.seq));

                let Some(entry) = due else {
                    inner.now = target;
                    break;
                };

                let (seq, due_at) = (entry.seq, entry.next_due);
                let task = entry.task.take();
                inner.now = due_at;
                match task {
                    Some(task) => (seq, task),
                    None => continue,
                }
            };

            task();
            fired += 1;

            let mut inner = self.lock();
            if let Some(entry) = inner.timers.iter_mut().find(|t| t.seq == seq) {
                entry.next_due += entry.interval;
                entry.task = Some(task);
            }
        }

        fired
    }
}

impl Scheduler for ManualClock {
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> Box<dyn TimerHandle> {
        // A zero period would make `advance` spin forever.
        let interval = interval.max(Duration::from_nanos(1));
        let cancelled = Arc::new(AtomicBool::new(false));

        let mut inner = self.lock();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        let next_due = inner.now + interval;
        inner.timers.push(TimerEntry {
            seq,
            interval,
            next_due,
            task: Some(task),
            cancelled: Arc::clone(&cancelled),
        });

        Box::new(ManualTimer { cancelled })
    }
}

struct ManualTimer {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle for ManualTimer {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
