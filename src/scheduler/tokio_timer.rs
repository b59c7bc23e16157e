use super::{RepeatingTask, Scheduler, TimerHandle};
use crate::errors::{AppError, AppResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Repeating timers backed by `tokio::time::interval`.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Bind to the runtime the caller is running on.
    pub fn current() -> AppResult<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| AppError::Runtime(e.to_string()))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(
        &self,
        interval: Duration,
        mut task: RepeatingTask,
    ) -> Box<dyn TimerHandle> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let join = self.handle.spawn(async move {
            let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let scheduled = ticker.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                if let Some(lag) = tick_lag(scheduled, time::Instant::now(), interval) {
                    warn!(?lag, ?interval, "tick fired late");
                }
                task();
            }
        });

        debug!(?interval, "repeating timer scheduled");
        Box::new(TokioTimer {
            cancelled,
            join: Some(join),
        })
    }
}

/// How far past its deadline a tick fired, when that exceeds half the
/// interval. Smaller delays are scheduling noise.
pub fn tick_lag(
    scheduled: time::Instant,
    fired: time::Instant,
    interval: Duration,
) -> Option<Duration> {
    let lag = fired.saturating_duration_since(scheduled);
    (lag > interval / 2).then_some(lag)
}

struct TokioTimer {
    cancelled: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl TimerHandle for TokioTimer {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(join) = self.join.take() {
            join.abort();
            debug!("repeating timer cancelled");
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
