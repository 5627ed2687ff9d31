//! Application constants for the cab ETL pipeline
//!
//! This module contains column names, formats, default paths and the
//! destination table layout used throughout the pipeline.

// =============================================================================
// Input Columns
// =============================================================================

/// Trip CSV column names (exact, case-sensitive header matches)
pub mod columns {
    pub const PICKUP_DATETIME: &str = "tpep_pickup_datetime";
    pub const DROPOFF_DATETIME: &str = "tpep_dropoff_datetime";
    pub const PASSENGER_COUNT: &str = "passenger_count";
    pub const TRIP_DISTANCE: &str = "trip_distance";
    pub const STORE_AND_FWD_FLAG: &str = "store_and_fwd_flag";
    pub const PU_LOCATION_ID: &str = "PULocationID";
    pub const DO_LOCATION_ID: &str = "DOLocationID";
    pub const FARE_AMOUNT: &str = "fare_amount";
    pub const TIP_AMOUNT: &str = "tip_amount";

    /// All required columns in destination table order
    pub const ALL: [&str; 9] = [
        PICKUP_DATETIME,
        DROPOFF_DATETIME,
        PASSENGER_COUNT,
        TRIP_DISTANCE,
        STORE_AND_FWD_FLAG,
        PU_LOCATION_ID,
        DO_LOCATION_ID,
        FARE_AMOUNT,
        TIP_AMOUNT,
    ];
}

// =============================================================================
// Field Formats
// =============================================================================

/// Trip timestamp format: `MM/dd/yyyy hh:mm:ss AM|PM`
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Raw flag value that maps to [`FLAG_YES`]
pub const FLAG_RAW_YES: &str = "Y";

/// Normalized store-and-forward flag values
pub const FLAG_YES: &str = "Yes";
pub const FLAG_NO: &str = "No";

/// Fixed-point column precision and scale for monetary amounts
pub const MONEY_PRECISION: u8 = 18;
pub const MONEY_SCALE: u8 = 2;

// =============================================================================
// Defaults
// =============================================================================

/// Default input file name
pub const DEFAULT_INPUT_PATH: &str = "sample-cab-data.csv";

/// Default duplicate audit file name
pub const DEFAULT_DUPLICATES_PATH: &str = "duplicates.csv";

/// Default DuckDB database file
pub const DEFAULT_DATABASE_PATH: &str = "cab_etl.duckdb";

/// Default destination table name
pub const DEFAULT_TABLE_NAME: &str = "CabInfo";

/// Default input delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Environment variable overriding the input path
pub const ENV_INPUT_PATH: &str = "CAB_ETL_INPUT";

/// Environment variable overriding the database path
pub const ENV_DATABASE_PATH: &str = "CAB_ETL_DATABASE";

/// Maximum number of row errors kept verbatim in parse statistics
pub const MAX_RECORDED_ERRORS: usize = 100;
