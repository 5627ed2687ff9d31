//! Run report and per-step outcomes

use crate::app::services::trip_csv_parser::ParseStats;
use crate::{Error, FailureKind};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of one pipeline step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    /// The step ran to completion and handled `rows` rows
    Completed { rows: usize },
    /// The step failed; later independent steps still ran
    Failed { kind: FailureKind, message: String },
    /// The step did not run because an earlier step it depends on failed
    Skipped { reason: String },
    /// The step has not been reached
    Pending,
}

impl StepStatus {
    pub fn failed(error: &Error) -> Self {
        Self::Failed {
            kind: error.category(),
            message: error.to_string(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { rows } => write!(f, "completed ({} rows)", rows),
            Self::Failed { kind, message } => {
                let label = match kind {
                    FailureKind::Io => "I/O error",
                    FailureKind::BulkLoad => "bulk load error",
                    FailureKind::Other => "unexpected error",
                };
                write!(f, "failed: {}: {}", label, message)
            }
            Self::Skipped { reason } => write!(f, "skipped: {}", reason),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Counts and step outcomes for one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub input_path: PathBuf,
    pub duplicates_path: PathBuf,
    pub destination: String,
    pub table_name: String,

    /// Data rows found in the input, including rejected rows
    pub rows_in_input: usize,
    /// Rows normalized into trips ("total read")
    pub total_read: usize,
    /// Rows rejected by field coercion
    pub rows_rejected: usize,
    /// Trips whose pickup or dropoff time fell back to the unset sentinel
    pub rows_with_unset_times: usize,
    pub kept: usize,
    pub duplicates: usize,

    /// Up to the first hundred row-level error messages
    pub row_errors: Vec<String>,

    pub read: StepStatus,
    pub partition: StepStatus,
    pub audit: StepStatus,
    pub load: StepStatus,

    pub duration_secs: f64,
}

impl PipelineReport {
    pub fn new(
        input_path: PathBuf,
        duplicates_path: PathBuf,
        destination: String,
        table_name: String,
    ) -> Self {
        Self {
            input_path,
            duplicates_path,
            destination,
            table_name,
            rows_in_input: 0,
            total_read: 0,
            rows_rejected: 0,
            rows_with_unset_times: 0,
            kept: 0,
            duplicates: 0,
            row_errors: Vec::new(),
            read: StepStatus::Pending,
            partition: StepStatus::Pending,
            audit: StepStatus::Pending,
            load: StepStatus::Pending,
            duration_secs: 0.0,
        }
    }

    /// Copy parse counts into the report
    pub fn record_parse(&mut self, stats: &ParseStats) {
        self.rows_in_input = stats.total_records;
        self.total_read = stats.records_parsed;
        self.rows_rejected = stats.records_skipped;
        self.rows_with_unset_times = stats.records_with_unset_times;
        self.row_errors = stats.errors.clone();
    }

    /// Steps in execution order with their names
    pub fn steps(&self) -> [(&'static str, &StepStatus); 4] {
        [
            ("read", &self.read),
            ("partition", &self.partition),
            ("audit", &self.audit),
            ("load", &self.load),
        ]
    }

    /// True when every step completed
    pub fn is_success(&self) -> bool {
        self.steps().iter().all(|(_, status)| status.is_completed())
    }

    /// Names of the steps that failed
    pub fn failed_steps(&self) -> Vec<&'static str> {
        self.steps()
            .iter()
            .filter(|(_, status)| status.is_failed())
            .map(|(name, _)| *name)
            .collect()
    }

    /// One-line summary of the run counts
    pub fn summary(&self) -> String {
        format!(
            "Records: {}, unique: {}, duplicates: {}, rejected: {}",
            self.total_read, self.kept, self.duplicates, self.rows_rejected
        )
    }
}
