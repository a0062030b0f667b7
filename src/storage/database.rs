//! `SQLite` database connection.
//!
//! The database is stored at `~/.mypa/mypa.db` and holds a single
//! `kv_store` table backing the [`KeyValueStore`] port.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Paths;
use crate::error::MypaError;

use super::kv::KeyValueStore;
use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open() -> Result<Self, MypaError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, MypaError> {
        let conn = Connection::open(path).map_err(|e| {
            MypaError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        log::debug!("opened database {}", path.display());

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, MypaError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            MypaError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), MypaError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, MypaError> {
        migrations::get_version(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, MypaError> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| MypaError::PersistenceRead(format!("{key}: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), MypaError> {
        self.conn
            .execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                 updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )
            .map(|_| ())
            .map_err(|e| MypaError::PersistenceWrite(format!("{key}: {e}")))
    }

    fn remove(&self, key: &str) -> Result<(), MypaError> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1", [key])
            .map(|_| ())
            .map_err(|e| MypaError::PersistenceWrite(format!("{key}: {e}")))
    }
}
