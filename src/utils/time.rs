//! Time utilities: parsing wall-clock strings ("09:52 AM" or "09:52") and
//! formatting them back for display.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Formats accepted for tap-in timestamps and lecture bounds.
const CLOCK_FORMATS: [&str; 2] = ["%I:%M %p", "%H:%M"];

pub fn parse_clock(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(t, fmt).ok())
}

pub fn parse_clock_strict(t: &str) -> AppResult<NaiveTime> {
    parse_clock(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// "10:00 AM" style, as the dashboard prints it.
pub fn format_clock(t: NaiveTime) -> String {
    t.format("%I:%M %p").to_string()
}
