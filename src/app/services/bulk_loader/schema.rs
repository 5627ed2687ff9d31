//! Destination table schema and typed cell values
//!
//! The schema is declared once and handed to every loader alongside the rows,
//! so a loader can create the table and check rows without knowing about
//! trips.

use crate::app::models::TripRecord;
use crate::constants::{MONEY_PRECISION, MONEY_SCALE, columns};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Logical column type of the destination table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Timestamp,
    Integer,
    Float,
    Text,
    FixedPoint { precision: u8, scale: u8 },
}

impl ColumnType {
    /// SQL type name used in `CREATE TABLE`
    pub fn sql_type(&self) -> String {
        match self {
            Self::Timestamp => "TIMESTAMP".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::Float => "FLOAT".to_string(),
            Self::Text => "VARCHAR".to_string(),
            Self::FixedPoint { precision, scale } => format!("DECIMAL({precision},{scale})"),
        }
    }

    /// Check whether a cell value can be stored in a column of this type
    pub fn accepts(&self, value: &CellValue) -> bool {
        matches!(
            (self, value),
            (Self::Timestamp, CellValue::Timestamp(_))
                | (Self::Integer, CellValue::Integer(_))
                | (Self::Float, CellValue::Float(_))
                | (Self::Text, CellValue::Text(_))
                | (Self::FixedPoint { .. }, CellValue::FixedPoint(_))
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql_type())
    }
}

/// One typed cell of a row handed to a loader
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Timestamp(NaiveDateTime),
    Integer(i32),
    Float(f32),
    Text(String),
    FixedPoint(Decimal),
}

impl CellValue {
    /// Short type label for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Timestamp(_) => "timestamp",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::FixedPoint(_) => "fixed-point",
        }
    }
}

/// A named, typed column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }
}

/// Ordered column list of a destination table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnSpec>) -> Self {
        Self { columns }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Check a row's width and cell types against this schema
    pub fn validate_row(&self, table_name: &str, row_index: usize, row: &[CellValue]) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::schema_mismatch(
                table_name,
                format!(
                    "row {} has {} values, expected {}",
                    row_index,
                    row.len(),
                    self.columns.len()
                ),
            ));
        }

        for (column, value) in self.columns.iter().zip(row) {
            if !column.column_type.accepts(value) {
                return Err(Error::schema_mismatch(
                    table_name,
                    format!(
                        "row {} column '{}' expects {}, got {} value",
                        row_index,
                        column.name,
                        column.column_type,
                        value.type_name()
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Validate every row, stopping at the first mismatch
    pub fn validate_rows(&self, table_name: &str, rows: &[Vec<CellValue>]) -> Result<()> {
        rows.iter()
            .enumerate()
            .try_for_each(|(index, row)| self.validate_row(table_name, index, row))
    }

    /// `CREATE TABLE IF NOT EXISTS` statement with quoted identifiers
    pub fn create_table_sql(&self, table_name: &str) -> String {
        let column_defs = self
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_identifier(&c.name), c.column_type.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            quote_identifier(table_name),
            column_defs
        )
    }
}

/// Quote a SQL identifier, doubling embedded quotes
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Schema of the trip destination table
pub fn trip_table_schema() -> TableSchema {
    let money = ColumnType::FixedPoint {
        precision: MONEY_PRECISION,
        scale: MONEY_SCALE,
    };

    TableSchema::new(vec![
        ColumnSpec::new(columns::PICKUP_DATETIME, ColumnType::Timestamp),
        ColumnSpec::new(columns::DROPOFF_DATETIME, ColumnType::Timestamp),
        ColumnSpec::new(columns::PASSENGER_COUNT, ColumnType::Integer),
        ColumnSpec::new(columns::TRIP_DISTANCE, ColumnType::Float),
        ColumnSpec::new(columns::STORE_AND_FWD_FLAG, ColumnType::Text),
        ColumnSpec::new(columns::PU_LOCATION_ID, ColumnType::Integer),
        ColumnSpec::new(columns::DO_LOCATION_ID, ColumnType::Integer),
        ColumnSpec::new(columns::FARE_AMOUNT, money),
        ColumnSpec::new(columns::TIP_AMOUNT, money),
    ])
}

/// Convert trips to rows in trip table column order
pub fn trip_rows(trips: &[TripRecord]) -> Vec<Vec<CellValue>> {
    trips.iter().map(TripRecord::to_row).collect()
}
