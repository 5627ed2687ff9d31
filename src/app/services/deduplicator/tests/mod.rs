//! Tests for the trip deduplicator
//!
//! Fixtures build trips whose identity keys are controlled by a single label,
//! with the location id used to tell individual input rows apart.


use crate::app::models::TripRecord;
use chrono::{NaiveDate, NaiveDateTime};

/// Timestamp on a fixed day at the given hour and minute
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 5)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Create a trip whose identity key is derived from `key` and whose
/// pickup location id identifies the input row
pub fn create_keyed_trip(key: char, row_id: i32) -> TripRecord {
    let offset = (key as u32) - ('A' as u32);
    TripRecord {
        pickup_time: at(8, offset),
        dropoff_time: at(9, offset),
        passenger_count: 1 + offset as i32,
        pickup_location_id: row_id,
        ..Default::default()
    }
}

/// Build a trip sequence from a key pattern like "AABAC"
///
/// Row ids are assigned 1..=n in input order.
pub fn create_trip_sequence(pattern: &str) -> Vec<TripRecord> {
    pattern
        .chars()
        .enumerate()
        .map(|(index, key)| create_keyed_trip(key, index as i32 + 1))
        .collect()
}

/// Row ids of a trip sequence
pub fn row_ids(trips: &[TripRecord]) -> Vec<i32> {
    trips.iter().map(|trip| trip.pickup_location_id).collect()
}
