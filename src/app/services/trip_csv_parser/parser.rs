//! Core trip CSV parser implementation
//!
//! This module handles file opening, header validation and the row loop,
//! collecting normalized trips and per-row rejections.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::StringRecord;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use super::column_mapping::ColumnMapping;
use super::raw_row::RawRow;
use super::record_parser::normalize;
use super::stats::{ParseResult, ParseStats};
use crate::config::{BlankCheckPolicy, EtlConfig};
use crate::constants::DEFAULT_DELIMITER;
use crate::{Error, Result};

/// Trip CSV parser
///
/// Reads the whole file into memory as normalized trips. A malformed row is
/// counted and skipped; only I/O failures and a bad header abort the parse.
#[derive(Debug, Clone)]
pub struct TripCsvParser {
    policy: BlankCheckPolicy,
    delimiter: u8,
    show_progress: bool,
}

impl TripCsvParser {
    /// Create a comma-delimited parser with the given blank-check policy
    pub fn new(policy: BlankCheckPolicy) -> Self {
        Self {
            policy,
            delimiter: DEFAULT_DELIMITER as u8,
            show_progress: false,
        }
    }

    /// Create a parser from pipeline configuration
    pub fn from_config(config: &EtlConfig) -> Result<Self> {
        Ok(Self {
            policy: config.parsing.blank_checks,
            delimiter: config.delimiter_byte()?,
            show_progress: config.show_progress,
        })
    }

    /// Parse a trip CSV file
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing trip CSV file: {}", file_path.display());

        let file = File::open(file_path).map_err(|e| {
            Error::io(
                format!("Failed to open input file {}", file_path.display()),
                e,
            )
        })?;

        self.parse_reader(BufReader::new(file), &file_path.display().to_string())
    }

    /// Parse trip CSV content from any reader
    ///
    /// `source` names the input in error messages.
    pub fn parse_reader<R: Read>(&self, reader: R, source: &str) -> Result<ParseResult> {
        let progress_bar = self.show_progress.then(Self::create_spinner);
        let result = self.parse_records(reader, source, progress_bar.as_ref());

        if let (Some(pb), Ok(parsed)) = (&progress_bar, &result) {
            pb.finish_with_message(format!("Read {} rows", parsed.stats.total_records));
        }

        result
    }

    /// Row loop shared by the public entry points
    ///
    /// `progress` advances once per data row, rejected or not.
    pub(crate) fn parse_records<R: Read>(
        &self,
        reader: R,
        source: &str,
        progress: Option<&ProgressBar>,
    ) -> Result<ParseResult> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers = csv_reader.headers().map_err(|e| {
            Error::csv_parsing(source, "Failed to read CSV header", Some(e))
        })?;
        let column_mapping = ColumnMapping::analyze(headers, source)?;

        let (total_cols, extra_cols) = column_mapping.stats();
        debug!(
            "Column mapping: {} total, {} ignored extra columns",
            total_cols, extra_cols
        );

        let mut stats = ParseStats::new();
        let mut records = Vec::new();
        let mut record = StringRecord::new();

        loop {
            match csv_reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => {
                    return Err(Error::csv_parsing(
                        source,
                        format!("Read failed after {} rows", stats.total_records),
                        Some(e),
                    ));
                }
                Err(e) => {
                    stats.total_records += 1;
                    stats.add_error(format!("CSV error at row {}: {}", stats.total_records, e));
                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    continue;
                }
            }

            stats.total_records += 1;
            if let Some(pb) = progress {
                pb.inc(1);
            }
            let line = record
                .position()
                .map_or(stats.total_records as u64 + 1, |p| p.line());
            let row = RawRow::new(&record, &column_mapping, line);

            match normalize(&row, self.policy) {
                Ok(trip) => {
                    if trip.has_unset_times() {
                        stats.records_with_unset_times += 1;
                    }
                    records.push(trip);
                    stats.records_parsed += 1;
                }
                Err(e) => {
                    warn!("Skipped line {}: {}", line, e);
                    stats.add_error(format!("Line {}: {}", line, e));
                }
            }
        }

        info!(
            "Parsed {} trips from {} rows ({} rejected)",
            stats.records_parsed, stats.total_records, stats.records_skipped
        );
        if stats.total_records > 0 && !stats.is_successful() {
            warn!(
                "Only {:.1}% of rows in {} could be normalized",
                stats.success_rate(),
                source
            );
        }
        if stats.records_with_unset_times > 0 {
            warn!(
                "{} trips have an unset pickup or dropoff time",
                stats.records_with_unset_times
            );
        }

        Ok(ParseResult { records, stats })
    }

    fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} rows {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Reading trips");
        pb
    }
}
