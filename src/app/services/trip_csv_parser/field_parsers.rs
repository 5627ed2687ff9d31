//! Field coercion rules for trip CSV rows
//!
//! Every rule resolves blank input to a default. Timestamps never fail:
//! unparseable text becomes the unset sentinel and a warning is logged.
//! Numeric fields fail only on malformed non-blank text.

use super::raw_row::RawRow;
use crate::app::models::{StoreAndForward, unset_timestamp};
use crate::constants::TIMESTAMP_FORMAT;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt::Display;
use std::str::FromStr;
use tracing::warn;

/// Strictly parse a trip timestamp (`MM/dd/yyyy hh:mm:ss AM|PM`)
///
/// chrono accepts unpadded fields, signed or short years and a lowercase
/// meridiem for this format, so a value is only accepted when it formats
/// back to exactly the same text.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .ok()
        .filter(|parsed| parsed.format(TIMESTAMP_FORMAT).to_string() == value)
}

/// Parse a timestamp column, falling back to the unset sentinel
pub fn parse_timestamp_or_unset(row: &RawRow, field_name: &str) -> NaiveDateTime {
    let Some(value) = row.get(field_name).filter(|v| !v.trim().is_empty()) else {
        warn!(
            line = row.line(),
            column = field_name,
            "Empty or missing timestamp, using unset value"
        );
        return unset_timestamp();
    };

    parse_timestamp(value).unwrap_or_else(|| {
        warn!(
            line = row.line(),
            column = field_name,
            value,
            "Timestamp does not match '{}', using unset value",
            TIMESTAMP_FORMAT
        );
        unset_timestamp()
    })
}

/// Parse a numeric column, using `default` when `blank_source` is blank
///
/// `blank_source` is normally `field_name` itself; see
/// [`BlankCheckPolicy`](crate::config::BlankCheckPolicy).
pub fn parse_or_default<T>(
    row: &RawRow,
    field_name: &str,
    blank_source: &str,
    default: T,
) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    if row.is_blank(blank_source) {
        return Ok(default);
    }

    let raw = row.get(field_name).unwrap_or_default();
    parse_strict(field_name, raw)
}

/// Strictly parse trimmed text, reporting the column and raw value on failure
pub fn parse_strict<T>(field_name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| Error::field_coercion(field_name, raw, e.to_string()))
}

/// Parse an integer column; blank yields 0
pub fn parse_i32_or_zero(row: &RawRow, field_name: &str, blank_source: &str) -> Result<i32> {
    parse_or_default(row, field_name, blank_source, 0)
}

/// Parse a floating point column; blank yields 0.0, non-finite values are rejected
pub fn parse_f32_or_zero(row: &RawRow, field_name: &str, blank_source: &str) -> Result<f32> {
    let value: f32 = parse_or_default(row, field_name, blank_source, 0.0)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::field_coercion(
            field_name,
            row.get(field_name).unwrap_or_default(),
            "value is not a finite number",
        ))
    }
}

/// Parse a fixed-point monetary column; blank yields 0.0
pub fn parse_decimal_or_zero(row: &RawRow, field_name: &str, blank_source: &str) -> Result<Decimal> {
    parse_or_default(row, field_name, blank_source, Decimal::ZERO)
}

/// Parse the store-and-forward flag; blank yields `No`
pub fn parse_flag(row: &RawRow, field_name: &str) -> StoreAndForward {
    row.get(field_name)
        .map(StoreAndForward::from_raw)
        .unwrap_or_default()
}
