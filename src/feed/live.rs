//! The live feed: a rotating [`FeedState`] driven by a [`Scheduler`], with
//! synchronous change notification to any number of subscribers.

use super::snapshot::FeedSnapshot;
use super::state::FeedState;
use crate::errors::{FeedError, FeedResult};
use crate::models::CheckInRecord;
use crate::scheduler::{Scheduler, TimerHandle};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tracing::{debug, info};

type Callback = Arc<dyn Fn(&Arc<FeedSnapshot>) + Send + Sync>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

struct Shared {
    // Held for the whole tick, notifications included; ticks are serialized
    // on it and teardown waits on it.
    tick_gate: Mutex<()>,
    // Only held while rotating, never across subscriber callbacks.
    state: Mutex<Option<FeedState>>,
    current: RwLock<Option<Arc<FeedSnapshot>>>,
    subscribers: Mutex<Vec<(u64, Callback)>>,
    next_subscriber: AtomicU64,
    active: AtomicBool,
    ticking_on: Mutex<Option<ThreadId>>,
}

impl Shared {
    fn new() -> Self {
        Self {
            tick_gate: Mutex::new(()),
            state: Mutex::new(None),
            current: RwLock::new(None),
            subscribers: Mutex::new(Vec::new()),
            next_subscriber: AtomicU64::new(0),
            active: AtomicBool::new(false),
            ticking_on: Mutex::new(None),
        }
    }

    fn snapshot(&self) -> FeedResult<Arc<FeedSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(FeedError::UninitializedAccess)
    }

    fn publish(&self, snapshot: Arc<FeedSnapshot>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }

    fn tick(&self) {
        let _gate = lock(&self.tick_gate);
        if !self.active.load(Ordering::Acquire) {
            debug!("tick after teardown ignored");
            return;
        }

        let snapshot = {
            let mut guard = lock(&self.state);
            let Some(state) = guard.as_mut() else {
                return;
            };
            state.rotate();
            Arc::new(FeedSnapshot::capture(state))
        };
        self.publish(Arc::clone(&snapshot));
        debug!(
            revision = snapshot.revision(),
            most_recent = snapshot.most_recent().id,
            "feed rotated"
        );

        // Copy out so callbacks may subscribe or unsubscribe.
        let subscribers: Vec<Callback> = lock(&self.subscribers)
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        *lock(&self.ticking_on) = Some(thread::current().id());
        for callback in subscribers {
            if !self.active.load(Ordering::Acquire) {
                break;
            }
            callback(&snapshot);
        }
        *lock(&self.ticking_on) = None;
    }

    fn is_ticking_here(&self) -> bool {
        *lock(&self.ticking_on) == Some(thread::current().id())
    }

    fn unsubscribe(&self, id: u64) -> bool {
        let mut subscribers = lock(&self.subscribers);
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        before != subscribers.len()
    }
}

/// Owner of a live feed and of the timer that drives it.
///
/// Created uninitialized; every read before [`LiveFeed::initialize`] fails
/// with [`FeedError::UninitializedAccess`]. Dropping the feed tears it down.
pub struct LiveFeed {
    view: FeedView,
    timer: Mutex<Option<Box<dyn TimerHandle>>>,
}

impl LiveFeed {
    pub fn new() -> Self {
        Self {
            view: FeedView {
                shared: Arc::new(Shared::new()),
            },
            timer: Mutex::new(None),
        }
    }

    /// Construct and initialize in one step.
    pub fn start<I>(seed: I, scheduler: &dyn Scheduler, interval: Duration) -> FeedResult<Self>
    where
        I: IntoIterator<Item = CheckInRecord>,
    {
        let feed = Self::new();
        feed.initialize(seed, scheduler, interval)?;
        Ok(feed)
    }

    /// Load `seed` and start rotating it every `interval`.
    pub fn initialize<I>(
        &self,
        seed: I,
        scheduler: &dyn Scheduler,
        interval: Duration,
    ) -> FeedResult<FeedView>
    where
        I: IntoIterator<Item = CheckInRecord>,
    {
        if interval.is_zero() {
            return Err(FeedError::InvalidInterval);
        }

        let shared = &self.view.shared;
        let mut guard = lock(&shared.state);
        if guard.is_some() {
            return Err(FeedError::AlreadyInitialized);
        }

        let state = FeedState::new(seed.into_iter().map(Arc::new))?;
        let len = state.len();
        shared.publish(Arc::new(FeedSnapshot::capture(&state)));
        *guard = Some(state);
        shared.active.store(true, Ordering::Release);
        drop(guard);

        let weak: Weak<Shared> = Arc::downgrade(shared);
        let handle = scheduler.schedule_repeating(
            interval,
            Box::new(move || {
                if let Some(shared) = weak.upgrade() {
                    shared.tick();
                }
            }),
        );
        *lock(&self.timer) = Some(handle);

        info!(records = len, ?interval, "live feed initialized");
        Ok(self.view())
    }

    /// Read-only capability to hand to display surfaces.
    pub fn view(&self) -> FeedView {
        self.view.clone()
    }

    pub fn snapshot(&self) -> FeedResult<Arc<FeedSnapshot>> {
        self.view.snapshot()
    }

    pub fn records(&self) -> FeedResult<Vec<Arc<CheckInRecord>>> {
        self.view.records()
    }

    pub fn most_recent(&self) -> FeedResult<Arc<CheckInRecord>> {
        self.view.most_recent()
    }

    pub fn subscribe<F>(&self, callback: F) -> FeedResult<Subscription>
    where
        F: Fn(&Arc<FeedSnapshot>) + Send + Sync + 'static,
    {
        self.view.subscribe(callback)
    }

    pub fn is_active(&self) -> bool {
        self.view.is_active()
    }

    /// Cancel the rotation timer. Idempotent; once it returns no further
    /// tick or notification happens.
    pub fn teardown(&self) {
        let shared = &self.view.shared;
        let was_active = shared.active.swap(false, Ordering::AcqRel);

        if let Some(mut timer) = lock(&self.timer).take() {
            timer.cancel();
        }

        // Wait out a tick running on another thread. From inside a
        // subscriber the tick is ours and already sees `active == false`.
        if !shared.is_ticking_here() {
            drop(lock(&shared.tick_gate));
        }

        if was_active {
            info!("live feed torn down");
        }
    }
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for LiveFeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveFeed")
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

/// Read-only handle on a live feed. Cheap to clone; cannot rotate, reorder
/// or tear the feed down.
#[derive(Clone)]
pub struct FeedView {
    shared: Arc<Shared>,
}

impl FeedView {
    pub fn snapshot(&self) -> FeedResult<Arc<FeedSnapshot>> {
        self.shared.snapshot()
    }

    pub fn records(&self) -> FeedResult<Vec<Arc<CheckInRecord>>> {
        Ok(self.snapshot()?.records().to_vec())
    }

    pub fn most_recent(&self) -> FeedResult<Arc<CheckInRecord>> {
        Ok(Arc::clone(self.snapshot()?.most_recent()))
    }

    /// Register `callback` to run after every tick with the new snapshot.
    pub fn subscribe<F>(&self, callback: F) -> FeedResult<Subscription>
    where
        F: Fn(&Arc<FeedSnapshot>) + Send + Sync + 'static,
    {
        // Uninitialized feeds have nothing to observe yet.
        self.snapshot()?;

        let id = self.shared.next_subscriber.fetch_add(1, Ordering::Relaxed);
        lock(&self.shared.subscribers).push((id, Arc::new(callback)));
        debug!(subscription = id, "subscribed to live feed");

        Ok(Subscription {
            id,
            shared: Arc::downgrade(&self.shared),
        })
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.shared.subscribers).len()
    }

    pub fn is_active(&self) -> bool {
        self.shared.active.load(Ordering::Acquire)
    }
}

impl fmt::Debug for FeedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeedView")
            .field("active", &self.is_active())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Unsubscribe token. Dropping it unsubscribes as well.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    shared: Weak<Shared>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Stop receiving notifications. Safe to call more than once.
    pub fn unsubscribe(&self) {
        if let Some(shared) = self.shared.upgrade()
            && shared.unsubscribe(self.id)
        {
            debug!(subscription = self.id, "unsubscribed from live feed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
