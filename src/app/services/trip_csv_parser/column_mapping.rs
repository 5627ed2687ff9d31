//! Header analysis for trip CSV files
//!
//! Maps column names to indices and checks that every required trip column
//! is present. Extra columns are recorded but otherwise ignored.

use crate::constants::columns;
use crate::{Error, Result};
use csv::StringRecord;
use std::collections::HashMap;

/// Column mapping for a trip CSV header
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    /// Column name to index mapping (first occurrence wins)
    pub name_to_index: HashMap<String, usize>,

    /// Columns present in the header that the pipeline does not use
    pub extra_columns: Vec<String>,
}

impl ColumnMapping {
    /// Analyze a header record, failing if a required column is missing
    ///
    /// Names are matched exactly and case-sensitively.
    pub fn analyze(headers: &StringRecord, file: &str) -> Result<Self> {
        let mut name_to_index = HashMap::new();
        let mut extra_columns = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            if name_to_index.contains_key(header) {
                continue;
            }
            name_to_index.insert(header.to_string(), index);

            if !columns::ALL.contains(&header) {
                extra_columns.push(header.to_string());
            }
        }

        let missing: Vec<String> = columns::ALL
            .iter()
            .filter(|name| !name_to_index.contains_key(**name))
            .map(|name| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(Error::missing_columns(file, missing));
        }

        Ok(ColumnMapping {
            name_to_index,
            extra_columns,
        })
    }

    /// Get the index for a given column name
    pub fn get_index(&self, column_name: &str) -> Option<usize> {
        self.name_to_index.get(column_name).copied()
    }

    /// Get (total, extra) column counts
    pub fn stats(&self) -> (usize, usize) {
        (self.name_to_index.len(), self.extra_columns.len())
    }
}
