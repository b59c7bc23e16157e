use super::state::FeedState;
use crate::models::{CheckInRecord, LectureWindow, OutcomeSummary};
use std::sync::Arc;

/// Immutable view of the feed at one revision, handed to subscribers and
/// readers. A later tick produces a new snapshot and never touches this one.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    revision: u64,
    records: Arc<[Arc<CheckInRecord>]>,
}

impl FeedSnapshot {
    pub(crate) fn capture(state: &FeedState) -> Self {
        Self {
            revision: state.ticks(),
            records: state.records().cloned().collect(),
        }
    }

    /// How many ticks had been applied when this snapshot was taken.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn records(&self) -> &[Arc<CheckInRecord>] {
        &self.records
    }

    pub fn most_recent(&self) -> &Arc<CheckInRecord> {
        &self.records[0]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn summary(&self, window: &LectureWindow) -> OutcomeSummary {
        OutcomeSummary::tally(self.records.iter().map(Arc::as_ref), window)
    }
}
