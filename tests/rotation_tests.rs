mod common;
use common::{abcd, ids, six};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tapfeed::errors::FeedError;
use tapfeed::feed::{FeedState, LiveFeed};
use tapfeed::models::CheckInRecord;
use tapfeed::scheduler::{ManualClock, RepeatingTask, Scheduler, TimerHandle};

const FIVE: Duration = Duration::from_secs(5);

fn counter() -> (Arc<AtomicUsize>, impl Fn(&Arc<tapfeed::feed::FeedSnapshot>) + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&count);
    (count, move |_: &Arc<tapfeed::feed::FeedSnapshot>| {
        c.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_single_tick_moves_head_to_back() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(abcd(), &clock, FIVE).unwrap();

    clock.advance(FIVE);

    assert_eq!(ids(&feed.records().unwrap()), vec![2, 3, 4, 1]);
    assert_eq!(feed.most_recent().unwrap().person_name, "B");
}

#[test]
fn test_rotation_period_restores_seed_identity() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(abcd(), &clock, FIVE).unwrap();
    let seed = feed.records().unwrap();

    for _ in 0..seed.len() {
        clock.advance(FIVE);
    }

    let after = feed.records().unwrap();
    assert_eq!(after.len(), seed.len());
    for (a, b) in seed.iter().zip(after.iter()) {
        assert!(Arc::ptr_eq(a, b));
    }
    assert_eq!(feed.snapshot().unwrap().revision(), 4);
}

#[test]
fn test_rotation_preserves_multiset() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(six(), &clock, FIVE).unwrap();

    for _ in 0..20 {
        clock.advance(FIVE);
        let mut current = ids(&feed.records().unwrap());
        current.sort_unstable();
        assert_eq!(current, vec![1, 2, 3, 4, 5, 6]);
    }
}

#[test]
fn test_most_recent_is_always_head() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(six(), &clock, FIVE).unwrap();

    for _ in 0..8 {
        let snapshot = feed.snapshot().unwrap();
        assert!(Arc::ptr_eq(snapshot.most_recent(), &snapshot.records()[0]));
        assert!(Arc::ptr_eq(&feed.most_recent().unwrap(), &feed.records().unwrap()[0]));
        clock.advance(FIVE);
    }
}

#[test]
fn test_feed_state_head_follows_rotation() {
    let mut state = FeedState::new(abcd().into_iter().map(Arc::new)).unwrap();
    assert_eq!(state.most_recent().id, 1);
    assert_eq!(state.ticks(), 0);

    state.rotate();
    assert_eq!(state.most_recent().id, 2);
    assert!(Arc::ptr_eq(state.most_recent(), state.records().next().unwrap()));
    assert_eq!(state.ticks(), 1);

    for _ in 0..3 {
        state.rotate();
    }
    assert_eq!(state.most_recent().id, 1);
    assert_eq!(state.len(), 4);
}

#[test]
fn test_empty_seed_is_rejected() {
    let clock = ManualClock::new();
    let err = LiveFeed::start(Vec::<CheckInRecord>::new(), &clock, FIVE).unwrap_err();
    assert!(matches!(err, FeedError::InvalidSeed(_)));
    assert_eq!(clock.pending(), 0);
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let mut seed = abcd();
    seed[3].id = 1;
    let err = FeedState::new(seed.into_iter().map(Arc::new)).unwrap_err();
    assert_eq!(err, FeedError::InvalidSeed("duplicate record id 1".into()));
}

#[test]
fn test_reads_before_initialize_fail_fast() {
    let feed = LiveFeed::new();
    let view = feed.view();

    assert_eq!(feed.records().unwrap_err(), FeedError::UninitializedAccess);
    assert_eq!(feed.most_recent().unwrap_err(), FeedError::UninitializedAccess);
    assert_eq!(view.snapshot().unwrap_err(), FeedError::UninitializedAccess);
    assert!(matches!(view.subscribe(|_| {}), Err(FeedError::UninitializedAccess)));
    assert!(!feed.is_active());

    // Teardown of a feed that never started is fine too.
    feed.teardown();
}

#[test]
fn test_view_handed_out_early_sees_initialized_feed() {
    let clock = ManualClock::new();
    let feed = LiveFeed::new();
    let view = feed.view();

    feed.initialize(abcd(), &clock, FIVE).unwrap();
    assert_eq!(view.most_recent().unwrap().id, 1);

    let err = feed.initialize(abcd(), &clock, FIVE).unwrap_err();
    assert_eq!(err, FeedError::AlreadyInitialized);
    assert_eq!(clock.pending(), 1);
}

#[test]
fn test_zero_interval_is_rejected() {
    let clock = ManualClock::new();
    let err = LiveFeed::start(abcd(), &clock, Duration::ZERO).unwrap_err();
    assert_eq!(err, FeedError::InvalidInterval);
}

#[test]
fn test_every_subscriber_is_notified_per_tick() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(abcd(), &clock, FIVE).unwrap();
    let view = feed.view();

    let (first, cb1) = counter();
    let (second, cb2) = counter();
    let _s1 = view.subscribe(cb1).unwrap();
    let _s2 = feed.subscribe(cb2).unwrap();

    clock.advance(Duration::from_secs(15));

    assert_eq!(first.load(Ordering::SeqCst), 3);
    assert_eq!(second.load(Ordering::SeqCst), 3);
}

#[test]
fn test_snapshots_are_immutable_per_notification() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(abcd(), &clock, FIVE).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = feed
        .subscribe(move |snapshot| sink.lock().unwrap().push(Arc::clone(snapshot)))
        .unwrap();

    clock.advance(Duration::from_secs(10));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].revision(), 1);
    assert_eq!(seen[0].ids(), vec![2, 3, 4, 1]);
    assert_eq!(seen[1].revision(), 2);
    assert_eq!(seen[1].ids(), vec![3, 4, 1, 2]);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(abcd(), &clock, FIVE).unwrap();
    let view = feed.view();

    let (count, cb) = counter();
    let sub = view.subscribe(cb).unwrap();
    clock.advance(FIVE);

    sub.unsubscribe();
    sub.unsubscribe();
    clock.advance(FIVE);
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(view.subscriber_count(), 0);

    let (dropped, cb) = counter();
    drop(view.subscribe(cb).unwrap());
    clock.advance(FIVE);
    assert_eq!(dropped.load(Ordering::SeqCst), 0);
}

#[test]
fn test_teardown_mid_interval_is_idempotent_and_silent() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(six(), &clock, FIVE).unwrap();
    let (count, cb) = counter();
    let _sub = feed.subscribe(cb).unwrap();

    clock.advance(Duration::from_secs(2));
    feed.teardown();
    feed.teardown();

    clock.advance(Duration::from_secs(10));

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(ids(&feed.records().unwrap()), vec![1, 2, 3, 4, 5, 6]);
    assert!(!feed.is_active());
    assert_eq!(clock.pending(), 0);
}

/// A scheduler whose handle forgets to cancel: the task stays callable.
#[derive(Default, Clone)]
struct LeakyScheduler {
    task: Arc<Mutex<Option<RepeatingTask>>>,
}

struct LeakyHandle;

impl TimerHandle for LeakyHandle {
    fn cancel(&mut self) {}
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Scheduler for LeakyScheduler {
    fn schedule_repeating(&self, _interval: Duration, task: RepeatingTask) -> Box<dyn TimerHandle> {
        *self.task.lock().unwrap() = Some(task);
        Box::new(LeakyHandle)
    }
}

impl LeakyScheduler {
    fn fire(&self) {
        if let Some(task) = self.task.lock().unwrap().as_mut() {
            task();
        }
    }
}

#[test]
fn test_tick_firing_after_teardown_is_a_noop() {
    let scheduler = LeakyScheduler::default();
    let feed = LiveFeed::start(abcd(), &scheduler, FIVE).unwrap();
    let (count, cb) = counter();
    let _sub = feed.subscribe(cb).unwrap();

    scheduler.fire();
    assert_eq!(feed.most_recent().unwrap().id, 2);

    feed.teardown();
    scheduler.fire();
    scheduler.fire();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(ids(&feed.records().unwrap()), vec![2, 3, 4, 1]);
}

#[test]
fn test_dropping_the_feed_cancels_its_timer() {
    let clock = ManualClock::new();
    let feed = LiveFeed::start(abcd(), &clock, FIVE).unwrap();
    let view = feed.view();
    assert_eq!(clock.pending(), 1);

    drop(feed);
    assert_eq!(clock.pending(), 0);

    clock.advance(Duration::from_secs(20));
    assert_eq!(view.snapshot().unwrap().revision(), 0);
    assert!(!view.is_active());
}

#[test]
fn test_teardown_from_inside_a_subscriber() {
    let clock = ManualClock::new();
    let feed = Arc::new(LiveFeed::start(abcd(), &clock, FIVE).unwrap());

    let weak = Arc::downgrade(&feed);
    let _stopper = feed
        .subscribe(move |_| {
            if let Some(feed) = weak.upgrade() {
                feed.teardown();
            }
        })
        .unwrap();
    let (late, cb) = counter();
    let _late = feed.subscribe(cb).unwrap();

    clock.advance(Duration::from_secs(30));

    assert!(!feed.is_active());
    assert_eq!(late.load(Ordering::SeqCst), 0);
    assert_eq!(feed.snapshot().unwrap().revision(), 1);
}

#[test]
fn test_initialize_from_inside_a_subscriber_fails_fast() {
    let clock = ManualClock::new();
    let feed = Arc::new(LiveFeed::start(abcd(), &clock, FIVE).unwrap());

    let outcome = Arc::new(Mutex::new(None));
    let weak = Arc::downgrade(&feed);
    let sink = Arc::clone(&outcome);
    let reentry_clock = clock.clone();
    let _reinit = feed
        .subscribe(move |_| {
            if let Some(feed) = weak.upgrade() {
                let result = feed.initialize(abcd(), &reentry_clock, FIVE).map(|_| ());
                *sink.lock().unwrap() = Some(result);
            }
        })
        .unwrap();

    assert_eq!(clock.advance(FIVE), 1);

    assert_eq!(
        outcome.lock().unwrap().take(),
        Some(Err(FeedError::AlreadyInitialized))
    );
    assert!(feed.is_active());
    assert_eq!(feed.snapshot().unwrap().revision(), 1);
    assert_eq!(clock.pending(), 1);

    clock.advance(FIVE);
    assert_eq!(feed.snapshot().unwrap().revision(), 2);
}

#[test]
fn test_six_record_scenario() {
    let clock = ManualClock::new();
    let seed = six();
    let feed = LiveFeed::start(seed.clone(), &clock, FIVE).unwrap();

    clock.advance(Duration::from_secs(11));
    assert_eq!(feed.records().unwrap()[0].person_name, "P3");

    clock.advance(Duration::from_secs(19));
    assert_eq!(clock.now(), Duration::from_secs(30));
    let records: Vec<CheckInRecord> = feed
        .records()
        .unwrap()
        .iter()
        .map(|r| r.as_ref().clone())
        .collect();
    assert_eq!(records, seed);
}
