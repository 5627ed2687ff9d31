//! Command-line argument definitions for the cab ETL tool
//!
//! Every flag is optional: anything left unset falls back to the config file,
//! then environment variables, then built-in defaults.

use crate::{Error, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Clean, deduplicate and bulk-load taxi trip CSV exports
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cab-etl",
    version,
    about = "Clean taxi trip CSV data, audit duplicate trips and bulk-load unique trips",
    long_about = "Reads a taxi trip CSV export, normalizes every row, separates duplicate trips \
                  (same pickup time, dropoff time and passenger count) into an audit CSV, and \
                  bulk-loads the unique trips into a DuckDB table."
)]
pub struct Args {
    /// Trip CSV file to ingest
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Trip CSV file to ingest"
    )]
    pub input_path: Option<PathBuf>,

    /// Where duplicate trips are written
    #[arg(
        long = "duplicates",
        value_name = "PATH",
        help = "Output CSV for duplicate trips"
    )]
    pub duplicates_path: Option<PathBuf>,

    /// DuckDB database file, created if missing
    #[arg(
        long = "database",
        value_name = "PATH",
        conflicts_with = "in_memory",
        help = "DuckDB database file to load into"
    )]
    pub database_path: Option<PathBuf>,

    /// Load into a throwaway in-memory database
    #[arg(long = "in-memory", help = "Load into an in-memory DuckDB database")]
    pub in_memory: bool,

    /// Destination table name
    #[arg(long = "table", value_name = "NAME", help = "Destination table name")]
    pub table_name: Option<String>,

    /// Input field delimiter
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        help = "Input field delimiter (single ASCII character)"
    )]
    pub delimiter: Option<char>,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Decide location and amount defaults the way early loads did
    ///
    /// Location ids default only when passenger_count is blank and amounts
    /// only when trip_distance is blank.
    #[arg(
        long = "legacy-blank-checks",
        help = "Use passenger_count/trip_distance blankness for location and amount defaults"
    )]
    pub legacy_blank_checks: bool,

    /// Do not create the destination table
    #[arg(
        long = "no-create-table",
        help = "Expect the destination table to exist already"
    )]
    pub no_create_table: bool,

    /// Skip the load when writing the duplicates file fails
    #[arg(
        long = "link-audit-and-load",
        help = "Skip the bulk load if the duplicates file cannot be written"
    )]
    pub link_audit_and_load: bool,

    /// Run the pipeline without touching a database
    ///
    /// The duplicates file is still written; kept trips go to an in-memory sink.
    #[arg(long = "dry-run", help = "Run without loading into a database")]
    pub dry_run: bool,

    /// Only read and partition the input, writing nothing
    #[arg(
        long = "check-only",
        conflicts_with = "dry_run",
        help = "Read and deduplicate the input, report counts, write nothing"
    )]
    pub check_only: bool,

    /// Show progress bars
    #[arg(long = "progress", help = "Show progress bars while reading and deduplicating")]
    pub progress: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the run summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the run summary"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Validate argument consistency before any configuration is loaded
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        if let Some(input_path) = &self.input_path {
            if input_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is a directory: {}",
                    input_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars
    pub fn show_progress(&self) -> bool {
        self.progress && !self.quiet
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input_path: None,
            duplicates_path: None,
            database_path: None,
            in_memory: false,
            table_name: None,
            delimiter: None,
            config_file: None,
            legacy_blank_checks: false,
            no_create_table: false,
            link_audit_and_load: false,
            dry_run: false,
            check_only: false,
            progress: false,
            verbose: 0,
            quiet: false,
            output_format: OutputFormat::Human,
        }
    }
}
