use crate::errors::{FeedError, FeedResult};
use crate::models::CheckInRecord;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// The rotating sequence itself, without any timer or subscribers attached.
///
/// Records are shared as `Arc`s so rotation moves pointers, never data, and
/// element identity survives a full period.
#[derive(Debug, Clone)]
pub struct FeedState {
    records: VecDeque<Arc<CheckInRecord>>,
    ticks: u64,
}

impl FeedState {
    /// Fails on an empty seed or on duplicate record ids.
    pub fn new<I>(seed: I) -> FeedResult<Self>
    where
        I: IntoIterator<Item = Arc<CheckInRecord>>,
    {
        let records: VecDeque<_> = seed.into_iter().collect();
        if records.is_empty() {
            return Err(FeedError::InvalidSeed("seed must not be empty".into()));
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(FeedError::InvalidSeed(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
        }

        Ok(Self { records, ticks: 0 })
    }

    /// Move the head to the back; everyone else shifts up by one.
    pub fn rotate(&mut self) {
        if let Some(head) = self.records.pop_front() {
            self.records.push_back(head);
        }
        self.ticks += 1;
    }

    pub fn most_recent(&self) -> &Arc<CheckInRecord> {
        // Non-empty since construction, and rotation never shrinks it.
        &self.records[0]
    }

    pub fn records(&self) -> impl ExactSizeIterator<Item = &Arc<CheckInRecord>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rotations applied since the seed was loaded.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
