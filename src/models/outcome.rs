use super::{check_in::CheckInRecord, lecture::LectureWindow};
use crate::utils::colors::{GREEN, RED, YELLOW};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    Verified,
    LateArrival,
    LeftEarly,
    Failed,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Verified => "Verified",
            Outcome::LateArrival => "Late Arrival",
            Outcome::LeftEarly => "Left Early",
            Outcome::Failed => "Failed",
        }
    }

    /// ANSI color matching the dashboard chip colors.
    pub fn color(&self) -> &'static str {
        match self {
            Outcome::Verified => GREEN,
            Outcome::LeftEarly => YELLOW,
            Outcome::LateArrival | Outcome::Failed => RED,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-outcome counts over a set of records.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub verified: usize,
    pub late_arrival: usize,
    pub left_early: usize,
    pub failed: usize,
}

impl OutcomeSummary {
    pub fn tally<'a, I>(records: I, window: &LectureWindow) -> Self
    where
        I: IntoIterator<Item = &'a CheckInRecord>,
    {
        let mut summary = Self::default();
        for record in records {
            match record.outcome(window) {
                Outcome::Verified => summary.verified += 1,
                Outcome::LateArrival => summary.late_arrival += 1,
                Outcome::LeftEarly => summary.left_early += 1,
                Outcome::Failed => summary.failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.verified + self.late_arrival + self.left_early + self.failed
    }
}
