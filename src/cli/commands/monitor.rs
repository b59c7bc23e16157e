use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::feed::seed::resolve_seed;
use crate::feed::{FeedSnapshot, FeedView, LiveFeed};
use crate::models::{CheckInRecord, LectureWindow};
use crate::scheduler::TokioScheduler;
use crate::ui::messages::{header, info, live, warning};
use crate::ui::render::{render_feed, render_most_recent};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tracing::debug;

/// Handle the `monitor` command
///
/// Runs the feed on a single-threaded runtime until `--ticks` rotations have
/// been rendered or Ctrl-C is pressed, then tears it down.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Monitor {
        seed,
        interval,
        ticks,
    } = cmd
    {
        let window = cfg.lecture_window()?;
        let records = resolve_seed(seed.as_deref(), cfg.seed_file.as_deref())?;
        let interval = interval.map(Duration::from_secs).unwrap_or_else(|| cfg.interval());

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::Runtime(e.to_string()))?;

        runtime.block_on(run(records, interval, *ticks, window))?;
    }
    Ok(())
}

async fn run(
    records: Vec<CheckInRecord>,
    interval: Duration,
    max_ticks: Option<u64>,
    window: LectureWindow,
) -> AppResult<()> {
    let scheduler = TokioScheduler::current()?;
    let feed = LiveFeed::start(records, &scheduler, interval)?;
    let view = feed.view();

    header(format!("Tap Monitor - Lecture Time: {}", window.label()));
    info(format!(
        "Rotating every {}s{}",
        interval.as_secs(),
        max_ticks
            .map(|n| format!(", stopping after {n} ticks"))
            .unwrap_or_else(|| ", Ctrl-C to stop".to_string())
    ));
    let first = view.snapshot()?;
    draw(&first, &window);

    let result = watch(&view, max_ticks, &window).await;
    feed.teardown();
    result
}

async fn watch(view: &FeedView, max_ticks: Option<u64>, window: &LectureWindow) -> AppResult<()> {
    if max_ticks == Some(0) {
        return Ok(());
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Arc<FeedSnapshot>>();
    let subscription = view.subscribe(move |snapshot| {
        // Receiver gone means the monitor is shutting down.
        let _ = tx.send(Arc::clone(snapshot));
    })?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listening = true;

    let mut seen = 0u64;
    loop {
        tokio::select! {
            Some(snapshot) = rx.recv() => {
                seen += 1;
                live(format!("Tick {} - {} just tapped in", snapshot.revision(), snapshot.most_recent().person_name));
                draw(&snapshot, window);
                if max_ticks.is_some_and(|n| seen >= n) {
                    break;
                }
            }
            signal = &mut ctrl_c, if listening => {
                match signal {
                    Ok(()) => break,
                    Err(e) => {
                        warning(format!("Could not listen for Ctrl-C: {e}"));
                        listening = false;
                    }
                }
            }
            else => break,
        }
    }

    subscription.unsubscribe();
    debug!(ticks = seen, "monitor stopped");
    Ok(())
}

fn draw(snapshot: &FeedSnapshot, window: &LectureWindow) {
    println!("{}", render_most_recent(snapshot.most_recent(), window));
    println!("{}", render_feed(snapshot, window));
}
