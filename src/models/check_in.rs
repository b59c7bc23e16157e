use super::{lecture::LectureWindow, outcome::Outcome};
use crate::utils::time::parse_clock;
use serde::{Deserialize, Serialize};

/// Result of the physical scan, as reported by the reader.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ScanResult {
    #[default]
    Success,
    Failed,
}

impl ScanResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ScanResult::Success)
    }
}

/// One simulated attendance event.
///
/// Timestamps are kept exactly as they were captured; they are only parsed
/// when an [`Outcome`] is derived from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CheckInRecord {
    pub id: u32,
    #[serde(rename = "name")]
    pub person_name: String,
    #[serde(rename = "student_number")]
    pub person_id: String,
    #[serde(rename = "walk_in")]
    pub check_in: String,
    #[serde(rename = "walk_out")]
    pub check_out: String,
    #[serde(rename = "status", default)]
    pub scan: ScanResult,
    #[serde(rename = "photo", default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

impl CheckInRecord {
    pub fn new(
        id: u32,
        person_name: impl Into<String>,
        person_id: impl Into<String>,
        check_in: impl Into<String>,
        check_out: impl Into<String>,
    ) -> Self {
        Self {
            id,
            person_name: person_name.into(),
            person_id: person_id.into(),
            check_in: check_in.into(),
            check_out: check_out.into(),
            scan: ScanResult::Success,
            portrait: None,
        }
    }

    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.portrait = Some(portrait.into());
        self
    }

    pub fn with_scan(mut self, scan: ScanResult) -> Self {
        self.scan = scan;
        self
    }

    /// Derive the attendance outcome against a lecture window.
    ///
    /// A failed scan always wins. Leaving early takes precedence over a late
    /// arrival. A timestamp that does not parse never flags the record.
    pub fn outcome(&self, window: &LectureWindow) -> Outcome {
        if !self.scan.is_success() {
            return Outcome::Failed;
        }

        if parse_clock(&self.check_out).is_some_and(|out| window.left_early(out)) {
            return Outcome::LeftEarly;
        }

        if parse_clock(&self.check_in).is_some_and(|inn| window.is_late(inn)) {
            return Outcome::LateArrival;
        }

        Outcome::Verified
    }

    /// Fallback shown when no portrait is available: "Rayane Chemsi" → "RC".
    pub fn initials(&self) -> String {
        self.person_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .collect()
    }

    pub fn has_portrait(&self) -> bool {
        self.portrait.as_deref().is_some_and(|p| !p.trim().is_empty())
    }
}
