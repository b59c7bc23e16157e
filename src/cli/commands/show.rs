use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::feed::seed::resolve_seed;
use crate::feed::{FeedSnapshot, FeedState};
use crate::ui::messages::header;
use crate::ui::render::{render_feed, render_most_recent, render_summary};
use std::sync::Arc;

/// Handle the `show` command: one static rendering of the seed, no timer.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { seed } = cmd {
        let window = cfg.lecture_window()?;
        let records = resolve_seed(seed.as_deref(), cfg.seed_file.as_deref())?;
        let state = FeedState::new(records.into_iter().map(Arc::new))?;
        let snapshot = FeedSnapshot::capture(&state);

        header(format!("Lecture Time: {}", window.label()));
        println!("{}", render_most_recent(snapshot.most_recent(), &window));
        println!("{}", render_feed(&snapshot, &window));
        println!("{}", render_summary(&snapshot.summary(&window)));
    }
    Ok(())
}
