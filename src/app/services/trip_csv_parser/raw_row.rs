//! Borrowed view of one raw CSV row

use super::column_mapping::ColumnMapping;
use csv::StringRecord;

/// Ordered column-name-to-text view over a single CSV record
///
/// A column missing from a short (ragged) record reads as `None`.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    record: &'a StringRecord,
    mapping: &'a ColumnMapping,
    line: u64,
}

impl<'a> RawRow<'a> {
    pub fn new(record: &'a StringRecord, mapping: &'a ColumnMapping, line: u64) -> Self {
        Self {
            record,
            mapping,
            line,
        }
    }

    /// Raw text for a column, untrimmed
    pub fn get(&self, column: &str) -> Option<&'a str> {
        self.mapping
            .get_index(column)
            .and_then(|index| self.record.get(index))
    }

    /// True when the column is absent, empty or whitespace-only
    pub fn is_blank(&self, column: &str) -> bool {
        self.get(column).is_none_or(|value| value.trim().is_empty())
    }

    /// 1-based line number of the row in its source file
    pub fn line(&self) -> u64 {
        self.line
    }
}
