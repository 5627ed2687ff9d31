//! Parsing statistics and result structures for trip CSV processing
//!
//! This module provides types for tracking row counts, rejected rows and
//! organizing parsed records for the deduplication stage.

use crate::app::models::TripRecord;
use crate::constants::MAX_RECORDED_ERRORS;

/// Parsing result with trip records and statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Successfully normalized trips, in input order
    pub records: Vec<TripRecord>,

    pub stats: ParseStats,
}

/// Row-level parsing statistics
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParseStats {
    /// Total number of data rows encountered
    pub total_records: usize,

    /// Number of rows normalized into trips
    pub records_parsed: usize,

    /// Number of rows rejected
    pub records_skipped: usize,

    /// Number of parsed trips with at least one unset timestamp
    pub records_with_unset_times: usize,

    /// Rejection messages, capped at the first hundred
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rejected row
    pub fn add_error(&mut self, message: String) {
        self.records_skipped += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(message);
        }
    }

    /// Calculate success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.records_parsed as f64 / self.total_records as f64) * 100.0
        }
    }

    /// Check if parsing was mostly successful (>90% success rate)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}
