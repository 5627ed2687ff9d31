//! Individual trip record normalization
//!
//! Applies the field coercion rules to the nine trip columns. Columns are
//! independent of each other except for the blank-check source chosen by the
//! configured policy.

use super::field_parsers::{
    parse_decimal_or_zero, parse_f32_or_zero, parse_flag, parse_i32_or_zero,
    parse_timestamp_or_unset,
};
use super::raw_row::RawRow;
use crate::Result;
use crate::app::models::TripRecord;
use crate::config::BlankCheckPolicy;
use crate::constants::columns;

/// Normalize one raw row into a trip record
///
/// Fails only when a non-blank numeric field is malformed; the error names
/// the offending column and text.
pub fn normalize(row: &RawRow, policy: BlankCheckPolicy) -> Result<TripRecord> {
    let pickup_time = parse_timestamp_or_unset(row, columns::PICKUP_DATETIME);
    let dropoff_time = parse_timestamp_or_unset(row, columns::DROPOFF_DATETIME);

    let passenger_count = parse_i32_or_zero(
        row,
        columns::PASSENGER_COUNT,
        policy.blank_source(columns::PASSENGER_COUNT),
    )?;
    let trip_distance = parse_f32_or_zero(
        row,
        columns::TRIP_DISTANCE,
        policy.blank_source(columns::TRIP_DISTANCE),
    )?;
    let store_and_fwd_flag = parse_flag(row, columns::STORE_AND_FWD_FLAG);

    let pickup_location_id = parse_i32_or_zero(
        row,
        columns::PU_LOCATION_ID,
        policy.blank_source(columns::PU_LOCATION_ID),
    )?;
    let dropoff_location_id = parse_i32_or_zero(
        row,
        columns::DO_LOCATION_ID,
        policy.blank_source(columns::DO_LOCATION_ID),
    )?;

    let fare_amount = parse_decimal_or_zero(
        row,
        columns::FARE_AMOUNT,
        policy.blank_source(columns::FARE_AMOUNT),
    )?;
    let tip_amount = parse_decimal_or_zero(
        row,
        columns::TIP_AMOUNT,
        policy.blank_source(columns::TIP_AMOUNT),
    )?;

    Ok(TripRecord {
        pickup_time,
        dropoff_time,
        passenger_count,
        trip_distance,
        store_and_fwd_flag,
        pickup_location_id,
        dropoff_location_id,
        fare_amount,
        tip_amount,
    })
}
