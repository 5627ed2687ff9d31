//! Configuration management and validation.
//!
//! Provides the pipeline configuration: input location, duplicate audit
//! output, bulk-load destination and field parsing policy. Configuration is
//! layered: defaults, then an optional TOML file, then environment variables,
//! then CLI overrides applied by the command layer.

use crate::constants::{
    DEFAULT_DATABASE_PATH, DEFAULT_DELIMITER, DEFAULT_DUPLICATES_PATH, DEFAULT_INPUT_PATH,
    DEFAULT_TABLE_NAME, ENV_DATABASE_PATH, ENV_INPUT_PATH, columns,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which column's blankness decides whether a field takes its default
///
/// Early versions of this pipeline decided the location ids from
/// `passenger_count` and the monetary amounts from `trip_distance`. `Legacy`
/// keeps that behaviour for reproducing old loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankCheckPolicy {
    /// Each field's own text decides
    #[default]
    OwnColumn,
    /// Location ids follow `passenger_count`, amounts follow `trip_distance`
    Legacy,
}

impl BlankCheckPolicy {
    /// Column whose blankness decides the default for `column`
    pub fn blank_source(&self, column: &'static str) -> &'static str {
        match self {
            Self::OwnColumn => column,
            Self::Legacy => match column {
                columns::PU_LOCATION_ID | columns::DO_LOCATION_ID => columns::PASSENGER_COUNT,
                columns::FARE_AMOUNT | columns::TIP_AMOUNT => columns::TRIP_DISTANCE,
                other => other,
            },
        }
    }
}

/// Where the bulk loader writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseTarget {
    /// A DuckDB database file, created if missing
    File(PathBuf),
    /// A throwaway in-memory database
    InMemory,
}

/// Input file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Trip CSV to ingest
    pub path: PathBuf,

    /// Field delimiter (single ASCII character)
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT_PATH),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Duplicate audit file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Destination of the duplicates CSV
    pub path: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DUPLICATES_PATH),
        }
    }
}

/// Bulk-load destination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    pub database: DatabaseTarget,

    /// Destination table name
    pub table_name: String,

    /// Issue `CREATE TABLE IF NOT EXISTS` before loading
    pub create_table: bool,

    /// Skip the load when the audit write failed
    pub link_to_audit: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            database: DatabaseTarget::File(PathBuf::from(DEFAULT_DATABASE_PATH)),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            create_table: true,
            link_to_audit: false,
        }
    }
}

/// Field parsing settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub blank_checks: BlankCheckPolicy,
}

/// Global configuration for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtlConfig {
    pub input: InputConfig,
    pub audit: AuditConfig,
    pub load: LoadConfig,
    pub parsing: ParsingConfig,

    /// Show progress bars for the read and partition stages
    pub show_progress: bool,
}

impl EtlConfig {
    /// Create configuration for the given input and duplicates paths
    pub fn new(input_path: impl Into<PathBuf>, duplicates_path: impl Into<PathBuf>) -> Self {
        Self {
            input: InputConfig {
                path: input_path.into(),
                ..Default::default()
            },
            audit: AuditConfig {
                path: duplicates_path.into(),
            },
            ..Default::default()
        }
    }

    /// Set the destination database
    pub fn with_database(mut self, database: DatabaseTarget) -> Self {
        self.load.database = database;
        self
    }

    /// Set the destination table name
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.load.table_name = table_name.into();
        self
    }

    /// Set the blank-check policy
    pub fn with_blank_checks(mut self, policy: BlankCheckPolicy) -> Self {
        self.parsing.blank_checks = policy;
        self
    }

    /// Set the input delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.input.delimiter = delimiter;
        self
    }

    /// Skip the load when the audit write fails
    pub fn with_linked_audit_and_load(mut self) -> Self {
        self.load.link_to_audit = true;
        self
    }

    /// Do not create the destination table
    pub fn without_table_creation(mut self) -> Self {
        self.load.create_table = false;
        self
    }

    /// Enable progress bars
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::configuration(format!("Invalid configuration file: {}", e)))
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read config file {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&content)
    }

    /// Load defaults, then the optional config file, then environment overrides
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides_with(|key| std::env::var(key).ok());
        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply environment overrides using the given variable lookup
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(input) = lookup(ENV_INPUT_PATH).filter(|v| !v.trim().is_empty()) {
            self.input.path = PathBuf::from(input);
        }
        if let Some(database) = lookup(ENV_DATABASE_PATH).filter(|v| !v.trim().is_empty()) {
            self.load.database = DatabaseTarget::File(PathBuf::from(database));
        }
    }

    /// Input delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.input.delimiter.is_ascii() {
            Ok(self.input.delimiter as u8)
        } else {
            Err(Error::configuration(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.input.delimiter
            )))
        }
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<()> {
        if self.input.path.as_os_str().is_empty() {
            return Err(Error::configuration("Input path must not be empty"));
        }

        if self.audit.path.as_os_str().is_empty() {
            return Err(Error::configuration("Duplicates path must not be empty"));
        }

        if self.audit.path == self.input.path {
            return Err(Error::configuration(format!(
                "Duplicates path would overwrite the input file: {}",
                self.input.path.display()
            )));
        }

        self.delimiter_byte()?;

        let table = &self.load.table_name;
        if table.is_empty() {
            return Err(Error::configuration("Table name must not be empty"));
        }
        if !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::configuration(format!(
                "Table name '{}' may only contain ASCII letters, digits and underscores",
                table
            )));
        }

        if let DatabaseTarget::File(path) = &self.load.database {
            if path.as_os_str().is_empty() {
                return Err(Error::configuration("Database path must not be empty"));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = EtlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.load.table_name, "CabInfo");
        assert_eq!(config.audit.path, PathBuf::from("duplicates.csv"));
        assert_eq!(config.parsing.blank_checks, BlankCheckPolicy::OwnColumn);
        assert!(!config.load.link_to_audit);
    }

    #[test]
    fn test_toml_partial_overrides_keep_defaults() {
        let config = EtlConfig::from_toml_str(
            r#"
            show_progress = true

            [input]
            path = "trips.csv"

            [load]
            database = "in_memory"
            table_name = "Trips"

            [parsing]
            blank_checks = "legacy"
            "#,
        )
        .unwrap();

        assert_eq!(config.input.path, PathBuf::from("trips.csv"));
        assert_eq!(config.input.delimiter, ',');
        assert_eq!(config.load.database, DatabaseTarget::InMemory);
        assert_eq!(config.load.table_name, "Trips");
        assert!(config.load.create_table);
        assert_eq!(config.parsing.blank_checks, BlankCheckPolicy::Legacy);
        assert!(config.show_progress);
    }

    #[test]
    fn test_toml_database_file() {
        let config = EtlConfig::from_toml_str(
            r#"
            [load]
            database = { file = "/tmp/trips.duckdb" }
            "#,
        )
        .unwrap();

        assert_eq!(
            config.load.database,
            DatabaseTarget::File(PathBuf::from("/tmp/trips.duckdb"))
        );
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let result = EtlConfig::from_toml_str("[input\npath = 1");
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_INPUT_PATH, "/data/in.csv"),
            (ENV_DATABASE_PATH, "/data/out.duckdb"),
        ]
        .into_iter()
        .collect();

        let mut config = EtlConfig::default();
        config.apply_env_overrides_with(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.input.path, PathBuf::from("/data/in.csv"));
        assert_eq!(
            config.load.database,
            DatabaseTarget::File(PathBuf::from("/data/out.duckdb"))
        );
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut config = EtlConfig::default();
        config.apply_env_overrides_with(|_| Some("  ".to_string()));
        assert_eq!(config, EtlConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(EtlConfig::new("trips.csv", "trips.csv").validate().is_err());
        assert!(
            EtlConfig::default()
                .with_table_name("Cab Info; DROP")
                .validate()
                .is_err()
        );
        assert!(EtlConfig::default().with_table_name("").validate().is_err());
        assert!(EtlConfig::default().with_delimiter('§').validate().is_err());
        assert!(EtlConfig::default().with_delimiter(';').validate().is_ok());
    }

    #[test]
    fn test_blank_source_policy() {
        let own = BlankCheckPolicy::OwnColumn;
        let legacy = BlankCheckPolicy::Legacy;

        assert_eq!(own.blank_source(columns::PU_LOCATION_ID), columns::PU_LOCATION_ID);
        assert_eq!(legacy.blank_source(columns::PU_LOCATION_ID), columns::PASSENGER_COUNT);
        assert_eq!(legacy.blank_source(columns::DO_LOCATION_ID), columns::PASSENGER_COUNT);
        assert_eq!(legacy.blank_source(columns::FARE_AMOUNT), columns::TRIP_DISTANCE);
        assert_eq!(legacy.blank_source(columns::TIP_AMOUNT), columns::TRIP_DISTANCE);
        assert_eq!(legacy.blank_source(columns::PASSENGER_COUNT), columns::PASSENGER_COUNT);
    }
}
