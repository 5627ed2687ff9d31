//! Trip CSV parser for taxi trip exports
//!
//! This module turns ragged, partially-missing CSV rows into fully defined
//! [`TripRecord`](crate::app::models::TripRecord) values. Blank fields take a
//! type-appropriate default; malformed numeric text rejects only the row it
//! appears in.
//!
//! ## Architecture
//!
//! - [`parser`] - File reading and row loop orchestration
//! - [`column_mapping`] - Header validation and column lookup
//! - [`raw_row`] - Borrowed name-to-text view of one CSV record
//! - [`record_parser`] - Assembles one trip from a raw row
//! - [`field_parsers`] - Per-field coercion rules
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cab_etl::app::services::trip_csv_parser::TripCsvParser;
//! use cab_etl::config::BlankCheckPolicy;
//!
//! # fn example() -> cab_etl::Result<()> {
//! let parser = TripCsvParser::new(BlankCheckPolicy::OwnColumn);
//! let result = parser.parse_file(std::path::Path::new("trips.csv"))?;
//!
//! println!("Parsed {} trips from {} rows",
//!          result.stats.records_parsed,
//!          result.stats.total_records);
//! # Ok(())
//! # }
//! ```

pub mod column_mapping;
pub mod field_parsers;
pub mod parser;
pub mod raw_row;
pub mod record_parser;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use column_mapping::ColumnMapping;
pub use parser::TripCsvParser;
pub use raw_row::RawRow;
pub use record_parser::normalize;
pub use stats::{ParseResult, ParseStats};
