//! Text rendering of the feed: the "most recent tap-in" card, the tap-in
//! list and the outcome summary. Renderers only read; they never reorder or
//! filter what the feed hands them.

use crate::feed::FeedSnapshot;
use crate::models::{CheckInRecord, LectureWindow, Outcome, OutcomeSummary};
use crate::utils::colors::{colorize, colorize_time};
use crate::utils::formatting::bold;
use crate::utils::portrait_label;
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_clock;

fn walk_in_flagged(record: &CheckInRecord, window: &LectureWindow) -> bool {
    parse_clock(&record.check_in).is_some_and(|t| window.is_late(t))
}

fn walk_out_flagged(record: &CheckInRecord, window: &LectureWindow) -> bool {
    parse_clock(&record.check_out).is_some_and(|t| window.left_early(t))
}

fn outcome_cell(outcome: Outcome) -> String {
    colorize(outcome.label(), outcome.color())
}

pub fn render_most_recent(record: &CheckInRecord, window: &LectureWindow) -> String {
    let outcome = record.outcome(window);
    let mut out = String::new();
    out.push_str(&format!("{}\n", bold("Most Recent Tap-In")));
    out.push_str(&format!("  {}  {}\n", portrait_label(record), bold(&record.person_name)));
    out.push_str(&format!("  {}\n", record.person_id));
    out.push_str(&format!(
        "  Walk-in:  {}\n",
        colorize_time(&record.check_in, walk_in_flagged(record, window))
    ));
    out.push_str(&format!(
        "  Walk-out: {}\n",
        colorize_time(&record.check_out, walk_out_flagged(record, window))
    ));
    out.push_str(&format!("  Status:   {}\n", outcome_cell(outcome)));
    out
}

pub fn render_feed(snapshot: &FeedSnapshot, window: &LectureWindow) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("NAME", 20),
        Column::new("STUDENT #", 11),
        Column::new("IN", 9),
        Column::new("OUT", 9),
        Column::new("PORTRAIT", 24),
        Column::new("STATUS", 12),
    ]);

    for (pos, record) in snapshot.records().iter().enumerate() {
        table.add_row(vec![
            (pos + 1).to_string(),
            record.person_name.clone(),
            record.person_id.clone(),
            colorize_time(&record.check_in, walk_in_flagged(record, window)),
            colorize_time(&record.check_out, walk_out_flagged(record, window)),
            portrait_label(record),
            outcome_cell(record.outcome(window)),
        ]);
    }

    table.render()
}

pub fn render_summary(summary: &OutcomeSummary) -> String {
    format!(
        "Total: {}  {}: {}  {}: {}  {}: {}  {}: {}",
        summary.total(),
        Outcome::Verified.label(),
        summary.verified,
        Outcome::LateArrival.label(),
        summary.late_arrival,
        Outcome::LeftEarly.label(),
        summary.left_early,
        Outcome::Failed.label(),
        summary.failed,
    )
}
