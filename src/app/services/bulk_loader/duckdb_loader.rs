//! DuckDB bulk loader
//!
//! Opens the database for the duration of one `load_rows` call, optionally
//! creates the table from the schema, and appends every row through the
//! DuckDB appender inside a single transaction.

use super::BulkLoader;
use super::schema::{CellValue, TableSchema};
use crate::config::DatabaseTarget;
use crate::{Error, Result};
use duckdb::types::{TimeUnit, Value};
use duckdb::{Connection, ToSql};
use std::time::Instant;
use tracing::{debug, info};

/// Loader writing into a DuckDB database
#[derive(Debug, Clone)]
pub struct DuckDbLoader {
    target: DatabaseTarget,
    create_table: bool,
}

impl DuckDbLoader {
    pub fn new(target: DatabaseTarget, create_table: bool) -> Self {
        Self {
            target,
            create_table,
        }
    }

    fn open(&self, table_name: &str) -> Result<Connection> {
        let connection = match &self.target {
            DatabaseTarget::File(path) => Connection::open(path),
            DatabaseTarget::InMemory => Connection::open_in_memory(),
        };

        connection.map_err(|e| {
            Error::bulk_load(
                table_name,
                format!("cannot open {}: {}", self.describe(), e),
                Some(e),
            )
        })
    }
}

/// Convert a cell into a DuckDB value
///
/// Fixed-point cells are bound as text and cast by DuckDB to the column's
/// DECIMAL type, which keeps the exact digits.
fn to_duckdb_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Timestamp(ts) => {
            Value::Timestamp(TimeUnit::Microsecond, ts.and_utc().timestamp_micros())
        }
        CellValue::Integer(v) => Value::Int(*v),
        CellValue::Float(v) => Value::Float(*v),
        CellValue::Text(v) => Value::Text(v.clone()),
        CellValue::FixedPoint(v) => Value::Text(v.to_string()),
    }
}

impl BulkLoader for DuckDbLoader {
    fn load_rows(
        &mut self,
        table_name: &str,
        schema: &TableSchema,
        rows: &[Vec<CellValue>],
    ) -> Result<usize> {
        schema.validate_rows(table_name, rows)?;
        debug!(
            "Appending {} rows to '{}' ({})",
            rows.len(),
            table_name,
            schema.column_names().join(", ")
        );

        let start = Instant::now();
        let mut connection = self.open(table_name)?;
        let load_error =
            |e: duckdb::Error| Error::bulk_load(table_name, e.to_string(), Some(e));

        if self.create_table {
            let sql = schema.create_table_sql(table_name);
            debug!("Ensuring destination table: {}", sql);
            connection.execute_batch(&sql).map_err(load_error)?;
        }

        let transaction = connection.transaction().map_err(load_error)?;
        {
            let mut appender = transaction.appender(table_name).map_err(load_error)?;

            for row in rows {
                let values: Vec<Value> = row.iter().map(to_duckdb_value).collect();
                let params: Vec<&dyn ToSql> = values.iter().map(|v| v as &dyn ToSql).collect();
                appender.append_row(params.as_slice()).map_err(load_error)?;
            }

            appender.flush().map_err(load_error)?;
        }
        transaction.commit().map_err(load_error)?;

        info!(
            "Loaded {} rows into '{}' ({}) in {:.2}s",
            rows.len(),
            table_name,
            self.describe(),
            start.elapsed().as_secs_f64()
        );

        Ok(rows.len())
    }

    fn describe(&self) -> String {
        match &self.target {
            DatabaseTarget::File(path) => format!("duckdb:{}", path.display()),
            DatabaseTarget::InMemory => "duckdb:memory".to_string(),
        }
    }
}
