//! Cab ETL Library
//!
//! A Rust library for cleaning taxi trip CSV exports, separating duplicate
//! trips from unique ones, and bulk-loading the unique trips into a relational
//! table.
//!
//! This library provides tools for:
//! - Parsing trip CSV files with per-field coercion rules and defaults
//! - Partitioning trips into kept and duplicate sets by identity key
//! - Writing duplicate trips to an audit CSV for review
//! - Bulk-loading kept trips through a pluggable loader (DuckDB or in-memory)
//! - Per-step error isolation and run reporting

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod bulk_loader;
        pub mod deduplicator;
        pub mod duplicate_audit;
        pub mod pipeline;
        pub mod trip_csv_parser;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{IdentityKey, StoreAndForward, TripRecord};
pub use config::EtlConfig;

/// Result type alias for the cab ETL pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for trip ingestion, deduplication and loading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV reading or writing error
    #[error("CSV error in '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Input header lacks one or more required columns
    #[error("Missing required columns in '{file}': {}", columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    /// A non-blank field could not be coerced to its target type
    #[error("Invalid value for {column}: '{value}' ({reason})")]
    FieldCoercion {
        column: String,
        value: String,
        reason: String,
    },

    /// Destination store rejected the bulk load
    #[error("Bulk load into '{table}' failed: {message}")]
    BulkLoad {
        table: String,
        message: String,
        #[source]
        source: Option<duckdb::Error>,
    },

    /// Rows handed to a loader do not match the declared table schema
    #[error("Schema mismatch for table '{table}': {message}")]
    SchemaMismatch { table: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse failure classes used when reporting step outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Reading the input or writing the audit file failed
    Io,
    /// The destination store rejected the load
    BulkLoad,
    /// Anything else
    Other,
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a missing columns error
    pub fn missing_columns(file: impl Into<String>, columns: Vec<String>) -> Self {
        Self::MissingColumns {
            file: file.into(),
            columns,
        }
    }

    /// Create a field coercion error
    pub fn field_coercion(
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::FieldCoercion {
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a bulk load error
    pub fn bulk_load(
        table: impl Into<String>,
        message: impl Into<String>,
        source: Option<duckdb::Error>,
    ) -> Self {
        Self::BulkLoad {
            table: table.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Classify this error for step reporting
    pub fn category(&self) -> FailureKind {
        match self {
            Self::Io { .. } | Self::CsvParsing { .. } | Self::MissingColumns { .. } => {
                FailureKind::Io
            }
            Self::BulkLoad { .. } | Self::SchemaMismatch { .. } => FailureKind::BulkLoad,
            Self::FieldCoercion { .. } | Self::Configuration { .. } => FailureKind::Other,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV operation failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(error: duckdb::Error) -> Self {
        Self::BulkLoad {
            table: "unknown".to_string(),
            message: error.to_string(),
            source: Some(error),
        }
    }
}
