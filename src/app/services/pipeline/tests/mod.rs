//! Tests for the pipeline driver
//!
//! Each test works in its own temporary directory holding the input CSV and
//! the duplicates audit file.


use crate::config::EtlConfig;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header line naming the nine trip columns
pub const TRIP_HEADER: &str = "tpep_pickup_datetime,tpep_dropoff_datetime,passenger_count,trip_distance,store_and_fwd_flag,PULocationID,DOLocationID,fare_amount,tip_amount";

/// Trip line whose identity key is selected by `key` and whose pickup
/// location id identifies the row
pub fn keyed_line(key: char, row_id: i32) -> String {
    let minute = (key as u32) - ('A' as u32);
    format!(
        "01/05/2023 08:{minute:02}:00 AM,01/05/2023 09:{minute:02}:00 AM,1,2.5,N,{row_id},100,12.00,2.00"
    )
}

/// Workspace with an input file and audit path inside a temp directory
pub struct PipelineFixture {
    pub dir: TempDir,
    pub input: PathBuf,
    pub duplicates: PathBuf,
}

impl PipelineFixture {
    /// Create a fixture whose input holds the header plus `lines`
    pub fn with_lines(lines: &[String]) -> Self {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("trips.csv");
        let duplicates = dir.path().join("duplicates.csv");

        let mut content = String::from(TRIP_HEADER);
        for line in lines {
            content.push('\n');
            content.push_str(line);
        }
        content.push('\n');
        fs::write(&input, content).unwrap();

        Self {
            dir,
            input,
            duplicates,
        }
    }

    /// Fixture with one line per key in `pattern`, row ids 1..=n
    pub fn with_keys(pattern: &str) -> Self {
        let lines: Vec<String> = pattern
            .chars()
            .enumerate()
            .map(|(index, key)| keyed_line(key, index as i32 + 1))
            .collect();
        Self::with_lines(&lines)
    }

    pub fn config(&self) -> EtlConfig {
        EtlConfig::new(&self.input, &self.duplicates)
    }

    /// Pickup location ids of the rows in the audit file
    pub fn audit_row_ids(&self) -> Vec<i32> {
        let mut reader = csv::Reader::from_path(&self.duplicates).unwrap();
        reader
            .records()
            .map(|record| record.unwrap()[5].parse().unwrap())
            .collect()
    }
}
