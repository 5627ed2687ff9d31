//! Command implementations for the cab ETL CLI
//!
//! Sets up logging, layers configuration (file, environment, flags), picks a
//! bulk-load sink, runs the pipeline and prints the run summary.

use crate::app::services::bulk_loader::{BulkLoader, DuckDbLoader, MemoryLoader};
use crate::app::services::deduplicator::PartitionStats;
use crate::app::services::pipeline::{EtlPipeline, PipelineReport, StepStatus};
use crate::app::services::trip_csv_parser::ParseStats;
use crate::cli::args::{Args, OutputFormat};
use crate::config::{BlankCheckPolicy, DatabaseTarget, EtlConfig};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Result of one CLI invocation
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// A full pipeline run
    Pipeline(PipelineReport),
    /// A read-and-partition check that wrote nothing
    Check(CheckSummary),
}

impl CommandOutcome {
    /// True when the process should exit with status 0
    pub fn is_success(&self) -> bool {
        match self {
            Self::Pipeline(report) => report.is_success(),
            Self::Check(_) => true,
        }
    }
}

/// Counts from a `--check-only` run
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub parse: ParseStats,
    pub partition: PartitionStats,
}

/// Main command runner
///
/// 1. Set up logging
/// 2. Build the layered configuration
/// 3. Run the pipeline (or the check) against the selected sink
/// 4. Print the summary
pub fn run(args: Args) -> Result<CommandOutcome> {
    setup_logging(&args)?;

    info!("Starting cab ETL");
    debug!("Command line arguments: {:?}", args);

    args.validate().context("Invalid command line arguments")?;

    let config = load_configuration(&args)?;
    let pipeline = EtlPipeline::new(config);

    let outcome = if args.check_only {
        let (parse, partition) = pipeline
            .normalize_and_partition()
            .context("Failed to read and partition input")?;
        CommandOutcome::Check(CheckSummary {
            parse,
            partition: partition.stats,
        })
    } else {
        let mut loader = create_loader(&args, pipeline.config());
        info!("Loading into {}", loader.describe());
        CommandOutcome::Pipeline(pipeline.run(loader.as_mut()))
    };

    generate_final_report(&args, &outcome)?;
    Ok(outcome)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cab_etl={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> env -> args)
fn load_configuration(args: &Args) -> Result<EtlConfig> {
    if let Some(config_path) = &args.config_file {
        info!("Using config file: {}", config_path.display());
    }

    let mut config = EtlConfig::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, args);

    config.validate().context("Invalid configuration")?;
    debug!("Effective configuration: {:?}", config);

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut EtlConfig, args: &Args) {
    if let Some(input) = &args.input_path {
        config.input.path = input.clone();
    }
    if let Some(duplicates) = &args.duplicates_path {
        config.audit.path = duplicates.clone();
    }
    if let Some(delimiter) = args.delimiter {
        config.input.delimiter = delimiter;
    }

    if args.in_memory {
        config.load.database = DatabaseTarget::InMemory;
    } else if let Some(database) = &args.database_path {
        config.load.database = DatabaseTarget::File(database.clone());
    }
    if let Some(table) = &args.table_name {
        config.load.table_name = table.clone();
    }
    if args.no_create_table {
        config.load.create_table = false;
    }
    if args.link_audit_and_load {
        config.load.link_to_audit = true;
    }

    if args.legacy_blank_checks {
        config.parsing.blank_checks = BlankCheckPolicy::Legacy;
    }
    if args.show_progress() {
        config.show_progress = true;
    } else if args.quiet {
        config.show_progress = false;
    }
}

/// Pick the bulk-load sink for this run
fn create_loader(args: &Args, config: &EtlConfig) -> Box<dyn BulkLoader> {
    if args.dry_run {
        info!("Dry run: kept trips will not be written to a database");
        Box::new(MemoryLoader::new())
    } else {
        Box::new(DuckDbLoader::new(
            config.load.database.clone(),
            config.load.create_table,
        ))
    }
}

/// Print the run summary in the requested format
fn generate_final_report(args: &Args, outcome: &CommandOutcome) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            match outcome {
                CommandOutcome::Pipeline(report) => print_human_report(report),
                CommandOutcome::Check(summary) => print_human_check(summary),
            }
            Ok(())
        }
        OutputFormat::Json => {
            let json = match outcome {
                CommandOutcome::Pipeline(report) => serde_json::to_string_pretty(report),
                CommandOutcome::Check(summary) => serde_json::to_string_pretty(summary),
            }
            .context("Failed to serialize run summary")?;
            println!("{}", json);
            Ok(())
        }
    }
}

fn format_step(status: &StepStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        StepStatus::Completed { .. } => text.green(),
        StepStatus::Failed { .. } => text.red().bold(),
        StepStatus::Skipped { .. } | StepStatus::Pending => text.yellow(),
    }
}

/// Human-readable pipeline report
fn print_human_report(report: &PipelineReport) {
    let duration = indicatif::HumanDuration(Duration::from_secs_f64(report.duration_secs));

    println!();
    if report.is_success() {
        println!("{}", "Cab ETL complete".bright_green().bold());
    } else {
        println!("{}", "Cab ETL finished with errors".bright_red().bold());
    }
    println!("{}", "=".repeat(40).bright_black());
    println!("  Input:       {}", report.input_path.display());
    println!("  Duplicates:  {}", report.duplicates_path.display());
    println!("  Destination: {} ({})", report.destination, report.table_name);
    println!();
    println!("  Records:          {}", report.total_read.to_string().bright_cyan());
    println!("  Unique records:   {}", report.kept.to_string().bright_cyan());
    println!("  Duplicates found: {}", report.duplicates.to_string().bright_cyan());

    if report.rows_rejected > 0 {
        println!(
            "  Rejected rows:    {}",
            report.rows_rejected.to_string().yellow()
        );
        for message in report.row_errors.iter().take(5) {
            println!("    {}", message.bright_black());
        }
    }
    if report.rows_with_unset_times > 0 {
        println!(
            "  Missing times:    {}",
            report.rows_with_unset_times.to_string().yellow()
        );
    }

    println!();
    for (name, status) in report.steps() {
        println!("  {:<10} {}", name, format_step(status));
    }
    println!("  Elapsed:   {}", duration);
    println!();
}

/// Human-readable check summary
fn print_human_check(summary: &CheckSummary) {
    println!();
    println!("{}", "Input check complete (nothing written)".bright_green().bold());
    println!("{}", "=".repeat(40).bright_black());
    println!("  Rows in input:    {}", summary.parse.total_records);
    println!("  Records:          {}", summary.parse.records_parsed);
    println!("  Rejected rows:    {}", summary.parse.records_skipped);
    println!("  {}", summary.partition.summary());
    println!();
}
