//! Pipeline driver: read, partition, audit, load
//!
//! Each step has its own failure boundary. A failed read leaves nothing to
//! partition, so later steps are skipped. The audit write and the bulk load
//! are independent unless `link_to_audit` is set.

use crate::Result;
use crate::app::models::TripRecord;
use crate::app::services::bulk_loader::{BulkLoader, trip_rows, trip_table_schema};
use crate::app::services::deduplicator::{PartitionResult, partition_records};
use crate::app::services::duplicate_audit::DuplicateAuditWriter;
use crate::app::services::trip_csv_parser::{ParseResult, ParseStats, TripCsvParser};
use crate::config::EtlConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;
use tracing::{debug, error, info, warn};

use super::report::{PipelineReport, StepStatus};

/// Cab trip ETL pipeline
///
/// # Example
///
/// ```rust,no_run
/// use cab_etl::EtlConfig;
/// use cab_etl::app::services::bulk_loader::MemoryLoader;
/// use cab_etl::app::services::pipeline::EtlPipeline;
///
/// let pipeline = EtlPipeline::new(EtlConfig::new("trips.csv", "duplicates.csv"));
/// let mut loader = MemoryLoader::new();
/// let report = pipeline.run(&mut loader);
/// println!("{}", report.summary());
/// ```
#[derive(Debug, Clone)]
pub struct EtlPipeline {
    config: EtlConfig,
}

impl EtlPipeline {
    pub fn new(config: EtlConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EtlConfig {
        &self.config
    }

    /// Read and normalize every row of the input file
    pub fn read(&self) -> Result<ParseResult> {
        let parser = TripCsvParser::from_config(&self.config)?;
        parser.parse_file(&self.config.input.path)
    }

    /// Split trips into kept and duplicate sequences
    pub fn partition(&self, records: Vec<TripRecord>) -> PartitionResult {
        let progress = self
            .config
            .show_progress
            .then(|| Self::create_progress_bar(records.len() as u64, "Deduplicating"));

        let result = partition_records(records, progress.as_ref());

        if let Some(pb) = progress {
            pb.finish_with_message(format!(
                "Deduplication complete: {} unique",
                result.kept.len()
            ));
        }

        debug!("{}", result.stats.summary());
        result
    }

    /// Read the input and partition it without writing anything
    pub fn normalize_and_partition(&self) -> Result<(ParseStats, PartitionResult)> {
        let ParseResult { records, stats } = self.read()?;
        let partition = self.partition(records);
        Ok((stats, partition))
    }

    /// Write duplicates to the configured audit file
    pub fn write_audit(&self, duplicates: &[TripRecord]) -> Result<usize> {
        DuplicateAuditWriter::new(&self.config.audit.path).write(duplicates)
    }

    /// Bulk-load kept trips into the configured table
    pub fn load(&self, loader: &mut dyn BulkLoader, kept: &[TripRecord]) -> Result<usize> {
        let rows = trip_rows(kept);
        loader.load_rows(&self.config.load.table_name, &trip_table_schema(), &rows)
    }

    /// Run every step and report the outcome
    ///
    /// Never returns an error: failures are recorded per step in the report.
    pub fn run(&self, loader: &mut dyn BulkLoader) -> PipelineReport {
        let start = Instant::now();
        let mut report = PipelineReport::new(
            self.config.input.path.clone(),
            self.config.audit.path.clone(),
            loader.describe(),
            self.config.load.table_name.clone(),
        );

        info!("Reading trips from {}", self.config.input.path.display());

        let parsed = match self.read() {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Read step failed: {}", e);
                report.read = StepStatus::failed(&e);
                let reason = "input could not be read";
                report.partition = StepStatus::skipped(reason);
                report.audit = StepStatus::skipped(reason);
                report.load = StepStatus::skipped(reason);
                report.duration_secs = start.elapsed().as_secs_f64();
                return report;
            }
        };

        report.record_parse(&parsed.stats);
        report.read = StepStatus::Completed {
            rows: parsed.records.len(),
        };
        info!("Records: {}", parsed.records.len());

        if parsed.stats.records_skipped > 0 {
            warn!(
                "{} rows rejected during normalization",
                parsed.stats.records_skipped
            );
        }

        let partition = self.partition(parsed.records);
        report.kept = partition.kept.len();
        report.duplicates = partition.duplicates.len();
        report.partition = StepStatus::Completed {
            rows: partition.total(),
        };
        info!(
            "Unique records: {}, duplicates found: {}",
            report.kept, report.duplicates
        );

        report.audit = match self.write_audit(&partition.duplicates) {
            Ok(rows) => StepStatus::Completed { rows },
            Err(e) => {
                error!("Audit step failed: {}", e);
                StepStatus::failed(&e)
            }
        };

        report.load = if self.config.load.link_to_audit && report.audit.is_failed() {
            warn!("Skipping bulk load because the audit write failed");
            StepStatus::skipped("audit write failed")
        } else {
            match self.load(loader, &partition.kept) {
                Ok(rows) => StepStatus::Completed { rows },
                Err(e) => {
                    error!("Load step failed: {}", e);
                    StepStatus::failed(&e)
                }
            }
        };

        report.duration_secs = start.elapsed().as_secs_f64();
        info!(
            "Pipeline finished in {:.2}s: {}",
            report.duration_secs,
            report.summary()
        );

        report
    }

    fn create_progress_bar(total: u64, operation: &str) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message(operation.to_string());
        pb
    }
}
