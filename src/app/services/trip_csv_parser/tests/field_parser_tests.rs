//! Tests for per-field coercion rules

use super::*;
use crate::Error;
use crate::app::models::{StoreAndForward, unset_timestamp};
use crate::app::services::trip_csv_parser::RawRow;
use crate::app::services::trip_csv_parser::field_parsers::{
    parse_decimal_or_zero, parse_f32_or_zero, parse_flag, parse_i32_or_zero, parse_timestamp,
    parse_timestamp_or_unset,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing_test::traced_test;

fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

#[test]
fn test_parse_timestamp_morning() {
    assert_eq!(
        parse_timestamp("01/05/2023 08:15:00 AM"),
        Some(ymd_hms(2023, 1, 5, 8, 15, 0))
    );
}

#[test]
fn test_parse_timestamp_twelve_hour_clock() {
    assert_eq!(
        parse_timestamp("12/31/2022 11:59:59 PM"),
        Some(ymd_hms(2022, 12, 31, 23, 59, 59))
    );
    assert_eq!(
        parse_timestamp("01/01/2023 12:00:00 AM"),
        Some(ymd_hms(2023, 1, 1, 0, 0, 0))
    );
    assert_eq!(
        parse_timestamp("01/01/2023 12:30:00 PM"),
        Some(ymd_hms(2023, 1, 1, 12, 30, 0))
    );
}

#[test]
fn test_parse_timestamp_rejects_other_formats() {
    assert_eq!(parse_timestamp(""), None);
    assert_eq!(parse_timestamp("not-a-date"), None);
    assert_eq!(parse_timestamp("2023-01-05 08:15:00"), None);
    assert_eq!(parse_timestamp("01/05/2023 08:15:00"), None);
    assert_eq!(parse_timestamp("13/05/2023 08:15:00 AM"), None);
}

#[test]
fn test_parse_timestamp_requires_exact_layout() {
    // Unpadded fields
    assert_eq!(parse_timestamp("1/5/2023 8:15:00 AM"), None);
    // Signed year
    assert_eq!(parse_timestamp("01/05/+2023 08:15:00 AM"), None);
    // Two-digit year would otherwise land in year 23
    assert_eq!(parse_timestamp("01/05/23 08:15:00 AM"), None);
    // Meridiem must be upper case
    assert_eq!(parse_timestamp("01/05/2023 08:15:00 am"), None);
    // Surrounding whitespace
    assert_eq!(parse_timestamp(" 01/05/2023 08:15:00 AM"), None);
}

#[test]
fn test_parse_timestamp_accepts_sentinel_text() {
    assert_eq!(
        parse_timestamp("01/01/0001 12:00:00 AM"),
        Some(unset_timestamp())
    );
}

#[test]
fn test_non_conforming_timestamp_falls_back_to_unset() {
    let mapping = test_mapping();
    let column = crate::constants::columns::PICKUP_DATETIME;

    for raw in ["1/5/2023 8:15:00 AM", "01/05/23 08:15:00 AM"] {
        let record = record_of(&fields_with(column, raw));
        let row = RawRow::new(&record, &mapping, 2);
        assert_eq!(
            parse_timestamp_or_unset(&row, column),
            unset_timestamp(),
            "{:?}",
            raw
        );
    }
}

#[test]
#[traced_test]
fn test_unset_timestamp_fallback_is_logged() {
    let mapping = test_mapping();
    let column = crate::constants::columns::PICKUP_DATETIME;

    let blank = record_of(&fields_with(column, ""));
    parse_timestamp_or_unset(&RawRow::new(&blank, &mapping, 2), column);
    assert!(logs_contain("Empty or missing timestamp, using unset value"));

    let garbled = record_of(&fields_with(column, "not-a-date"));
    parse_timestamp_or_unset(&RawRow::new(&garbled, &mapping, 3), column);
    assert!(logs_contain("does not match"));
    assert!(logs_contain("not-a-date"));
}

#[test]
fn test_timestamp_blank_or_invalid_falls_back_to_unset() {
    let mapping = test_mapping();

    let blank = record_of(&fields_with(crate::constants::columns::PICKUP_DATETIME, ""));
    let row = RawRow::new(&blank, &mapping, 2);
    assert_eq!(
        parse_timestamp_or_unset(&row, crate::constants::columns::PICKUP_DATETIME),
        unset_timestamp()
    );

    let garbled = record_of(&fields_with(
        crate::constants::columns::PICKUP_DATETIME,
        "not-a-date",
    ));
    let row = RawRow::new(&garbled, &mapping, 3);
    assert_eq!(
        parse_timestamp_or_unset(&row, crate::constants::columns::PICKUP_DATETIME),
        unset_timestamp()
    );

    // The other timestamp on the same row is unaffected
    assert_eq!(
        parse_timestamp_or_unset(&row, crate::constants::columns::DROPOFF_DATETIME),
        ymd_hms(2023, 1, 5, 8, 45, 30)
    );
}

#[test]
fn test_flag_coercion() {
    let mapping = test_mapping();
    let cases = [
        ("Y", StoreAndForward::Yes),
        (" Y ", StoreAndForward::Yes),
        ("y ", StoreAndForward::No),
        ("N", StoreAndForward::No),
        ("", StoreAndForward::No),
        ("   ", StoreAndForward::No),
        ("YES", StoreAndForward::No),
    ];

    for (raw, expected) in cases {
        let record = record_of(&fields_with(crate::constants::columns::STORE_AND_FWD_FLAG, raw));
        let row = RawRow::new(&record, &mapping, 2);
        assert_eq!(
            parse_flag(&row, crate::constants::columns::STORE_AND_FWD_FLAG),
            expected,
            "raw flag {:?}",
            raw
        );
    }
}

#[test]
fn test_integer_blank_defaults_to_zero() {
    let mapping = test_mapping();
    let column = crate::constants::columns::PASSENGER_COUNT;

    for raw in ["", "  "] {
        let record = record_of(&fields_with(column, raw));
        let row = RawRow::new(&record, &mapping, 2);
        assert_eq!(parse_i32_or_zero(&row, column, column).unwrap(), 0);
    }

    let record = record_of(&fields_with(column, " 3 "));
    let row = RawRow::new(&record, &mapping, 2);
    assert_eq!(parse_i32_or_zero(&row, column, column).unwrap(), 3);
}

#[test]
fn test_integer_malformed_is_hard_failure() {
    let mapping = test_mapping();
    let column = crate::constants::columns::PU_LOCATION_ID;

    for raw in ["abc", "2.5", "1e3"] {
        let record = record_of(&fields_with(column, raw));
        let row = RawRow::new(&record, &mapping, 2);
        match parse_i32_or_zero(&row, column, column) {
            Err(Error::FieldCoercion { column: c, value, .. }) => {
                assert_eq!(c, column);
                assert_eq!(value, raw);
            }
            other => panic!("expected coercion error for {:?}, got {:?}", raw, other),
        }
    }
}

#[test]
fn test_float_coercion() {
    let mapping = test_mapping();
    let column = crate::constants::columns::TRIP_DISTANCE;

    let record = record_of(&fields_with(column, ""));
    let row = RawRow::new(&record, &mapping, 2);
    assert_eq!(parse_f32_or_zero(&row, column, column).unwrap(), 0.0);

    let record = record_of(&fields_with(column, "1.25"));
    let row = RawRow::new(&record, &mapping, 2);
    assert_eq!(parse_f32_or_zero(&row, column, column).unwrap(), 1.25);

    for raw in ["NaN", "inf", "far"] {
        let record = record_of(&fields_with(column, raw));
        let row = RawRow::new(&record, &mapping, 2);
        assert!(parse_f32_or_zero(&row, column, column).is_err(), "{:?}", raw);
    }
}

#[test]
fn test_decimal_coercion() {
    let mapping = test_mapping();
    let column = crate::constants::columns::FARE_AMOUNT;

    let record = record_of(&fields_with(column, "12.50"));
    let row = RawRow::new(&record, &mapping, 2);
    assert_eq!(
        parse_decimal_or_zero(&row, column, column).unwrap(),
        Decimal::new(1250, 2)
    );

    let record = record_of(&fields_with(column, ""));
    let row = RawRow::new(&record, &mapping, 2);
    assert_eq!(parse_decimal_or_zero(&row, column, column).unwrap(), Decimal::ZERO);

    let record = record_of(&fields_with(column, "12,5"));
    let row = RawRow::new(&record, &mapping, 2);
    assert!(parse_decimal_or_zero(&row, column, column).is_err());
}

#[test]
fn test_blank_source_from_another_column() {
    let mapping = test_mapping();
    let passenger = crate::constants::columns::PASSENGER_COUNT;
    let location = crate::constants::columns::PU_LOCATION_ID;

    // Source blank: the field defaults even though its own text is garbage
    let mut fields = fields_with(location, "abc");
    fields[2] = "";
    let record = record_of(&fields);
    let row = RawRow::new(&record, &mapping, 2);
    assert_eq!(parse_i32_or_zero(&row, location, passenger).unwrap(), 0);

    // Source present: a blank field is parsed strictly and fails
    let record = record_of(&fields_with(location, ""));
    let row = RawRow::new(&record, &mapping, 2);
    assert!(parse_i32_or_zero(&row, location, passenger).is_err());
    assert_eq!(parse_i32_or_zero(&row, location, location).unwrap(), 0);
}
