//! Record deduplication logic for trip records
//!
//! Groups trips by identity key (pickup time, dropoff time, passenger count)
//! and keeps the earliest record of each group. There is no secondary sort
//! key: input order alone decides which record is kept.

use crate::app::models::{IdentityKey, TripRecord};
use indicatif::ProgressBar;
use std::collections::HashMap;
use tracing::{debug, info};

use super::stats::{PartitionResult, PartitionStats};

/// Group records by identity key, preserving first-seen order
///
/// Groups are returned in the order their key first appears; each group holds
/// its records in input order. The hash map only indexes into the group list,
/// so the result never depends on hash iteration order.
pub fn group_by_identity(records: Vec<TripRecord>) -> Vec<(IdentityKey, Vec<TripRecord>)> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut groups: Vec<(IdentityKey, Vec<TripRecord>)> = Vec::new();

    for record in records {
        let key = record.identity_key();
        match index.get(&key) {
            Some(&position) => groups[position].1.push(record),
            None => {
                index.insert(key, groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

/// Partition records into kept and duplicate sequences
///
/// For each key group in first-seen order, the first record goes to `kept`
/// and the remaining records go to `duplicates` in their original relative
/// order.
///
/// # Arguments
///
/// * `records` - Normalized trips in input order
/// * `progress_bar` - Optional progress bar advanced once per group
pub fn partition_records(
    records: Vec<TripRecord>,
    progress_bar: Option<&ProgressBar>,
) -> PartitionResult {
    let mut stats = PartitionStats {
        total_input: records.len(),
        ..Default::default()
    };

    let groups = group_by_identity(records);
    stats.distinct_keys = groups.len();

    if let Some(pb) = progress_bar {
        pb.set_length(groups.len() as u64);
        pb.set_position(0);
    }

    let mut kept = Vec::with_capacity(groups.len());
    let mut duplicates = Vec::new();

    for (key, group) in groups {
        let group_size = group.len();
        let mut members = group.into_iter();

        if let Some(first) = members.next() {
            kept.push(first);
        }

        if group_size > 1 {
            stats.duplicate_groups += 1;
            duplicates.extend(members);
            debug!("Identity key {} has {} duplicates", key, group_size - 1);
        }

        if let Some(pb) = progress_bar {
            pb.inc(1);
        }
    }

    stats.duplicates = duplicates.len();

    info!(
        "Deduplication complete: {} unique trips, {} duplicates in {} groups",
        kept.len(),
        stats.duplicates,
        stats.duplicate_groups
    );

    PartitionResult {
        kept,
        duplicates,
        stats,
    }
}
