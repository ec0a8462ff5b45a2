//! SQLite storage for the exercise catalog, plans and completion records.
//!
//! This module provides the low-level, synchronous database operations used
//! by [`crate::planner::Planner`]. Each query module extends [`Database`]
//! with one area of the schema.

use std::path::Path;

use jiff::Timestamp;
use rusqlite::{types::Type, Connection};

use crate::error::{DatabaseResultExt, Result};

pub mod catalog_queries;
pub mod completion_queries;
pub mod entry_queries;
pub mod migrations;
pub mod plan_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, mainly for tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Read an integer column that must fit in `T`.
pub(crate) fn int_at<T: TryFrom<i64>>(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<T> {
    let value: i64 = row.get(idx)?;
    T::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}

/// Parse an RFC 3339 timestamp column.
pub(crate) fn timestamp_at(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a nullable RFC 3339 timestamp column.
pub(crate) fn optional_timestamp_at(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<Option<Timestamp>> {
    row.get::<_, Option<String>>(idx)?
        .map(|s| {
            s.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32(sql: &str) -> rusqlite::Result<u32> {
        let connection = Connection::open_in_memory()?;
        connection.query_row(sql, [], |row| int_at(row, 0))
    }

    #[test]
    fn test_int_at_reads_values_in_range() {
        assert_eq!(read_u32("SELECT 42").unwrap(), 42);
        assert_eq!(read_u32("SELECT 4294967295").unwrap(), u32::MAX);
    }

    #[test]
    fn test_int_at_rejects_negative_and_oversized_values() {
        assert!(matches!(
            read_u32("SELECT -1"),
            Err(rusqlite::Error::IntegralValueOutOfRange(0, -1))
        ));
        assert!(matches!(
            read_u32("SELECT 4294967296"),
            Err(rusqlite::Error::IntegralValueOutOfRange(0, 4294967296))
        ));
    }
}
