//! Aggregate review statistics

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::ReviewRecord;
use crate::status::Status;

/// Per-status review counts for one owning entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub pending: u64,
    pub submitted: u64,
    pub approved: u64,
    pub rejected: u64,
    pub total: u64,
}

impl ReviewStats {
    /// Counts the given records per status
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let mut stats = ReviewStats::default();
        for record in records {
            match record.status {
                Status::Pending => stats.pending += 1,
                Status::Submitted => stats.submitted += 1,
                Status::Approved => stats.approved += 1,
                Status::Rejected => stats.rejected += 1,
            }
            stats.total += 1;
        }
        stats
    }

    /// Count for one status
    pub fn count_for(&self, status: Status) -> u64 {
        match status {
            Status::Pending => self.pending,
            Status::Submitted => self.submitted,
            Status::Approved => self.approved,
            Status::Rejected => self.rejected,
        }
    }

    /// The stats as a map from status value to count, plus a `total` key
    pub fn as_map(&self) -> BTreeMap<String, u64> {
        let mut map: BTreeMap<String, u64> = Status::ALL
            .iter()
            .map(|status| (status.as_str().to_string(), self.count_for(*status)))
            .collect();
        map.insert("total".to_string(), self.total);
        map
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
