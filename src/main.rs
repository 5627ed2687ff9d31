use cab_etl::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    let args = Args::parse();

    match commands::run(args) {
        Ok(outcome) if outcome.is_success() => process::exit(0),
        Ok(commands::CommandOutcome::Pipeline(report)) => {
            eprintln!(
                "Error: pipeline steps failed: {}",
                report.failed_steps().join(", ")
            );
            process::exit(1);
        }
        Ok(_) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
