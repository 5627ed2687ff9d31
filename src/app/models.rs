//! Data models for trip processing
//!
//! This module contains the normalized trip record, its identity key for
//! deduplication, and the store-and-forward flag enumeration.

use crate::app::services::bulk_loader::schema::CellValue;
use crate::constants::{FLAG_NO, FLAG_RAW_YES, FLAG_YES};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Sentinel Timestamp
// =============================================================================

/// The "unset" timestamp standing in for blank or unparseable input
///
/// Uses `0001-01-01 00:00:00`, the smallest value both sinks can store.
pub fn unset_timestamp() -> NaiveDateTime {
    chrono::NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

/// Check whether a timestamp is the unset sentinel
pub fn is_unset(timestamp: &NaiveDateTime) -> bool {
    *timestamp == unset_timestamp()
}

// =============================================================================
// Store-and-Forward Flag
// =============================================================================

/// Whether the trip record was held in vehicle memory before being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StoreAndForward {
    Yes,
    #[default]
    No,
}

impl StoreAndForward {
    /// Normalize a raw flag value: trimmed `"Y"` is `Yes`, anything else is `No`
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == FLAG_RAW_YES {
            Self::Yes
        } else {
            Self::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => FLAG_YES,
            Self::No => FLAG_NO,
        }
    }
}

impl fmt::Display for StoreAndForward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Trip Record
// =============================================================================

/// A fully normalized taxi trip
///
/// Every field is defined: blank input has already been resolved to a
/// type-appropriate default by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Pickup time, or [`unset_timestamp`] when missing
    pub pickup_time: NaiveDateTime,

    /// Dropoff time, or [`unset_timestamp`] when missing
    pub dropoff_time: NaiveDateTime,

    pub passenger_count: i32,

    /// Trip distance in miles
    pub trip_distance: f32,

    pub store_and_fwd_flag: StoreAndForward,

    /// Taxi zone where the meter was engaged
    pub pickup_location_id: i32,

    /// Taxi zone where the meter was disengaged
    pub dropoff_location_id: i32,

    pub fare_amount: Decimal,

    pub tip_amount: Decimal,
}

impl TripRecord {
    /// Identity key used for deduplication
    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey {
            pickup_time: self.pickup_time,
            dropoff_time: self.dropoff_time,
            passenger_count: self.passenger_count,
        }
    }

    /// Check whether either timestamp fell back to the unset sentinel
    pub fn has_unset_times(&self) -> bool {
        is_unset(&self.pickup_time) || is_unset(&self.dropoff_time)
    }

    /// Convert to typed cells in destination table column order
    pub fn to_row(&self) -> Vec<CellValue> {
        vec![
            CellValue::Timestamp(self.pickup_time),
            CellValue::Timestamp(self.dropoff_time),
            CellValue::Integer(self.passenger_count),
            CellValue::Float(self.trip_distance),
            CellValue::Text(self.store_and_fwd_flag.as_str().to_string()),
            CellValue::Integer(self.pickup_location_id),
            CellValue::Integer(self.dropoff_location_id),
            CellValue::FixedPoint(self.fare_amount),
            CellValue::FixedPoint(self.tip_amount),
        ]
    }
}

impl Default for TripRecord {
    fn default() -> Self {
        Self {
            pickup_time: unset_timestamp(),
            dropoff_time: unset_timestamp(),
            passenger_count: 0,
            trip_distance: 0.0,
            store_and_fwd_flag: StoreAndForward::No,
            pickup_location_id: 0,
            dropoff_location_id: 0,
            fare_amount: Decimal::ZERO,
            tip_amount: Decimal::ZERO,
        }
    }
}

// =============================================================================
// Identity Key
// =============================================================================

/// Tuple deciding whether two trips are the same logical event
///
/// Two records with equal keys are duplicates regardless of their other fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub pickup_time: NaiveDateTime,
    pub dropoff_time: NaiveDateTime,
    pub passenger_count: i32,
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({} -> {}, {} passengers)",
            self.pickup_time, self.dropoff_time, self.passenger_count
        )
    }
}
