//! End-to-end cab trip pipeline
//!
//! Reads the input CSV, normalizes rows, partitions trips into kept and
//! duplicate sets, writes duplicates to the audit file and bulk-loads kept
//! trips. The outcome of every step is collected in a [`PipelineReport`].
//!
//! - [`driver`] - [`EtlPipeline`] and the step sequence
//! - [`report`] - Run counts and per-step status

pub mod driver;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use driver::EtlPipeline;
pub use report::{PipelineReport, StepStatus};
