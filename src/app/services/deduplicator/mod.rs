//! Trip deduplication module
//!
//! Splits normalized trips into the first record seen for each identity key
//! (kept) and every later record with an already-seen key (duplicates).
//!
//! # Architecture
//!
//! - [`deduplication`] - Grouping, partitioning and duplicate analysis helpers
//! - [`stats`] - Partition statistics and result structures
//!
//! # Ordering
//!
//! The partition depends only on input order. Groups are emitted in the order
//! their key first appeared, and records inside a group keep their relative
//! input order, so the same input always yields the same `kept` and
//! `duplicates` sequences.
//!
//! # Example Usage
//!
//! ```rust
//! use cab_etl::app::services::deduplicator::partition_records;
//!
//! let result = partition_records(Vec::new(), None);
//! assert!(result.kept.is_empty());
//! println!("{}", result.stats.summary());
//! ```

pub mod deduplication;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use deduplication::{group_by_identity, partition_records};
pub use stats::{PartitionResult, PartitionStats};
