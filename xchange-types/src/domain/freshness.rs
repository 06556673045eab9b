//! Timestamp of the last full rate refresh.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marks the end of a refresh that populated the entire rate set.
///
/// Only deltas matter, so the mark is kept in UTC and never normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessMark {
    fetched_at: DateTime<Utc>,
}

impl FreshnessMark {
    pub fn new(fetched_at: DateTime<Utc>) -> Self {
        Self { fetched_at }
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Whole minutes elapsed between the mark and `now`, truncated toward zero.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        (now - self.fetched_at).num_minutes()
    }

    /// Returns true while `0 <= elapsed < ttl_minutes`.
    ///
    /// A mark more than a minute in the future (wall clock moved backwards)
    /// is treated as stale.
    pub fn is_within(&self, now: DateTime<Utc>, ttl_minutes: i64) -> bool {
        let elapsed = self.elapsed_minutes(now);
        (0..ttl_minutes).contains(&elapsed)
    }
}
