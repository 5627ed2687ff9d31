//! In-memory bulk loader
//!
//! Keeps every load call for later inspection. Used by tests and by dry runs,
//! where the pipeline should run end to end without touching a database.

use super::BulkLoader;
use super::schema::{CellValue, TableSchema};
use crate::{Error, Result};
use tracing::info;

/// One recorded `load_rows` call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLoad {
    pub table_name: String,
    pub schema: TableSchema,
    pub rows: Vec<Vec<CellValue>>,
}

/// Loader that stores rows in memory
#[derive(Debug, Default)]
pub struct MemoryLoader {
    loads: Vec<RecordedLoad>,
    failure: Option<String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader whose every call fails with a bulk-load error
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            loads: Vec::new(),
            failure: Some(message.into()),
        }
    }

    pub fn loads(&self) -> &[RecordedLoad] {
        &self.loads
    }

    /// Total rows accepted across all calls
    pub fn total_rows(&self) -> usize {
        self.loads.iter().map(|load| load.rows.len()).sum()
    }
}

impl BulkLoader for MemoryLoader {
    fn load_rows(
        &mut self,
        table_name: &str,
        schema: &TableSchema,
        rows: &[Vec<CellValue>],
    ) -> Result<usize> {
        if let Some(message) = &self.failure {
            return Err(Error::bulk_load(table_name, message.clone(), None));
        }

        schema.validate_rows(table_name, rows)?;

        self.loads.push(RecordedLoad {
            table_name: table_name.to_string(),
            schema: schema.clone(),
            rows: rows.to_vec(),
        });

        info!("Recorded {} rows for '{}' in memory", rows.len(), table_name);
        Ok(rows.len())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
