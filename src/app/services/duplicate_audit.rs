//! Duplicate audit writer
//!
//! Writes every trip classified as a duplicate to a side CSV so discarded rows
//! can be reviewed. The header is always written, even with no duplicates.
//! Timestamps use the input format, so the audit file can be fed back through
//! the parser.

use crate::app::models::TripRecord;
use crate::constants::{TIMESTAMP_FORMAT, columns};
use crate::{Error, Result};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writer for the duplicates CSV
#[derive(Debug, Clone)]
pub struct DuplicateAuditWriter {
    path: PathBuf,
}

impl DuplicateAuditWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the duplicates to the audit file, replacing any previous file
    ///
    /// Returns the number of data rows written.
    pub fn write(&self, duplicates: &[TripRecord]) -> Result<usize> {
        let file = File::create(&self.path).map_err(|e| {
            Error::io(
                format!("Failed to create audit file {}", self.path.display()),
                e,
            )
        })?;

        let written = self.write_to(file, duplicates)?;

        info!(
            "Wrote {} duplicate trips to {}",
            written,
            self.path.display()
        );
        Ok(written)
    }

    /// Write the header and duplicate rows to any writer
    pub fn write_to<W: Write>(&self, destination: W, duplicates: &[TripRecord]) -> Result<usize> {
        let file_name = self.path.display().to_string();
        let csv_error =
            |e: csv::Error| Error::csv_parsing(&file_name, "failed to write audit row", Some(e));

        let mut writer = Writer::from_writer(destination);
        writer.write_record(columns::ALL).map_err(csv_error)?;

        for trip in duplicates {
            writer.write_record(audit_fields(trip)).map_err(csv_error)?;
        }

        writer.flush().map_err(|e| {
            Error::io(format!("Failed to flush audit file {}", file_name), e)
        })?;

        Ok(duplicates.len())
    }
}

/// Render one trip as audit CSV fields in column order
fn audit_fields(trip: &TripRecord) -> [String; 9] {
    [
        trip.pickup_time.format(TIMESTAMP_FORMAT).to_string(),
        trip.dropoff_time.format(TIMESTAMP_FORMAT).to_string(),
        trip.passenger_count.to_string(),
        trip.trip_distance.to_string(),
        trip.store_and_fwd_flag.to_string(),
        trip.pickup_location_id.to_string(),
        trip.dropoff_location_id.to_string(),
        trip.fare_amount.to_string(),
        trip.tip_amount.to_string(),
    ]
}
