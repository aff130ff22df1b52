//! SQLite bootstrap for the row stores.
//!
//! # Responsibility
//! - Open and configure SQLite connections used by `list::sqlite`.
//! - Apply the row schema migrations in deterministic order.
//! - Refuse databases that do not hold a usable `rows` table.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - A failed migration leaves `user_version` and the schema unchanged.
//! - Row stores must not read/write rows before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding both tasks and task lists.
pub const ROWS_TABLE: &str = "rows";

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The script for `version` failed and its transaction was rolled back.
    MigrationFailed {
        version: u32,
        source: rusqlite::Error,
    },
    /// The file reports a current schema version but has no `rows` table.
    MissingRowsTable { db_version: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "row database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::MigrationFailed { version, source } => {
                write!(f, "row schema migration {version} failed: {source}")
            }
            Self::MissingRowsTable { db_version } => write!(
                f,
                "row database at schema version {db_version} has no `{ROWS_TABLE}` table"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MigrationFailed { source, .. } => Some(source),
            Self::UnsupportedSchemaVersion { .. } | Self::MissingRowsTable { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn migration_failure_names_version_and_keeps_source() {
        let err = DbError::MigrationFailed {
            version: 1,
            source: rusqlite::Error::QueryReturnedNoRows,
        };
        assert!(err.to_string().starts_with("row schema migration 1 failed"));
        assert!(err.source().is_some());
    }

    #[test]
    fn missing_rows_table_names_the_table() {
        let err = DbError::MissingRowsTable { db_version: 1 };
        assert_eq!(
            err.to_string(),
            "row database at schema version 1 has no `rows` table"
        );
        assert!(err.source().is_none());
    }
}
