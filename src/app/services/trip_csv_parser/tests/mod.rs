//! Test utilities for trip CSV parser testing
//!
//! Shared fixtures for building raw rows, CSV content and temporary files.

use csv::StringRecord;
use std::io::Write;
use tempfile::NamedTempFile;

use super::column_mapping::ColumnMapping;
use crate::constants::columns;

// Test modules
mod field_parser_tests;

/// Header line naming the nine trip columns
pub const TRIP_HEADER: &str = "tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,store_and_fwd_flag,PULocationID,DOLocationID,fare_amount,tip_amount";

/// A complete, valid set of field values in header order
pub const COMPLETE_FIELDS: [&str; 9] = [
    "01/05/2023 08:15:00 AM",
    "01/05/2023 08:45:30 AM",
    "2",
    "3.4",
    "N",
    "142",
    "236",
    "17.70",
    "3.50",
];

/// Column mapping for the standard trip header
pub fn test_mapping() -> ColumnMapping {
    ColumnMapping::analyze(&StringRecord::from(columns::ALL.to_vec()), "test.csv").unwrap()
}

/// Build a record from field values
pub fn record_of(fields: &[&str]) -> StringRecord {
    StringRecord::from(fields.to_vec())
}

/// Copy of the complete fields with one column replaced
pub fn fields_with(column: &str, value: &'static str) -> [&'static str; 9] {
    let mut fields = COMPLETE_FIELDS;
    let index = columns::ALL.iter().position(|c| *c == column).unwrap();
    fields[index] = value;
    fields
}

/// Build trip CSV content from data lines
pub fn create_trip_csv(lines: &[&str]) -> String {
    let mut content = String::from(TRIP_HEADER);
    for line in lines {
        content.push('\n');
        content.push_str(line);
    }
    content.push('\n');
    content
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file.flush().unwrap();
    temp_file
}
