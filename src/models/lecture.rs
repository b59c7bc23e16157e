use crate::errors::{AppError, AppResult};
use crate::utils::time::{format_clock, parse_clock_strict};
use chrono::NaiveTime;

/// The scheduled lecture a tap-in is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LectureWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for LectureWindow {
    fn default() -> Self {
        // 10:00 AM - 11:20 AM
        Self {
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(11, 20, 0).unwrap_or_default(),
        }
    }
}

impl LectureWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::Config(format!(
                "lecture end {} is not after start {}",
                format_clock(end),
                format_clock(start)
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a window from "10:00 AM" / "11:20 AM" style strings.
    pub fn parse(start: &str, end: &str) -> AppResult<Self> {
        Self::new(parse_clock_strict(start)?, parse_clock_strict(end)?)
    }

    pub fn is_late(&self, check_in: NaiveTime) -> bool {
        check_in > self.start
    }

    pub fn left_early(&self, check_out: NaiveTime) -> bool {
        check_out < self.end
    }

    pub fn label(&self) -> String {
        format!("{} - {}", format_clock(self.start), format_clock(self.end))
    }
}
