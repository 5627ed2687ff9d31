//! Bulk-load sinks for kept trips
//!
//! The pipeline only talks to the [`BulkLoader`] trait: hand it a table name,
//! the table schema, and rows of typed cells. Two implementations exist:
//!
//! - [`DuckDbLoader`] - appends rows into a DuckDB database file or an
//!   in-memory database
//! - [`MemoryLoader`] - records every load call, used by tests and dry runs

pub mod duckdb_loader;
pub mod memory_loader;
pub mod schema;

use crate::Result;

pub use duckdb_loader::DuckDbLoader;
pub use memory_loader::{MemoryLoader, RecordedLoad};
pub use schema::{CellValue, ColumnSpec, ColumnType, TableSchema, trip_rows, trip_table_schema};

/// Batch-insert capable tabular store
pub trait BulkLoader {
    /// Load all rows into the named table, returning the number of rows written
    ///
    /// Either every row is written or an error is returned.
    fn load_rows(
        &mut self,
        table_name: &str,
        schema: &TableSchema,
        rows: &[Vec<CellValue>],
    ) -> Result<usize>;

    /// Short description of the destination for logs and reports
    fn describe(&self) -> String;
}
