//! Partition statistics and result structures

use crate::app::models::TripRecord;

/// Statistics for one partition run
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct PartitionStats {
    /// Number of input trips
    pub total_input: usize,
    /// Number of distinct identity keys (equals the kept count)
    pub distinct_keys: usize,
    /// Number of keys seen more than once
    pub duplicate_groups: usize,
    /// Number of trips classified as duplicates
    pub duplicates: usize,
}

impl PartitionStats {
    /// Percentage of input trips that were duplicates
    pub fn duplicate_rate(&self) -> f64 {
        if self.total_input == 0 {
            0.0
        } else {
            (self.duplicates as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Get summary of partition statistics
    pub fn summary(&self) -> String {
        format!(
            "Partition Summary: {} trips -> {} unique, {} duplicates ({:.1}%) in {} groups",
            self.total_input,
            self.distinct_keys,
            self.duplicates,
            self.duplicate_rate(),
            self.duplicate_groups
        )
    }
}

/// Kept and duplicate trips produced by a partition
#[derive(Debug, Clone)]
pub struct PartitionResult {
    /// First trip seen for each identity key, in first-seen order
    pub kept: Vec<TripRecord>,
    /// Every later trip with an already-seen key
    pub duplicates: Vec<TripRecord>,
    pub stats: PartitionStats,
}

impl PartitionResult {
    /// Total number of trips across both sequences
    pub fn total(&self) -> usize {
        self.kept.len() + self.duplicates.len()
    }
}
