//! Database module for SQLite operations
//!
//! This module handles the local review store:
//! - Schema creation
//! - Review inserts and per-account queries

pub mod queries;
pub mod schema;

use std::path::PathBuf;
use std::sync::Mutex;

use rusqlite::Connection;
use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Lock poisoned")]
    LockPoisoned,

    #[error("Review has no id")]
    MissingId,
}

/// Database connection wrapper
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (or create) a database file
    pub fn new(path: PathBuf) -> Result<Self, DbError> {
        let conn = Connection::open(&path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Initialize the database schema
    pub fn initialize(&self) -> Result<(), DbError> {
        self.with_connection(schema::create_tables)
    }

    /// Get the database file path; `None` for in-memory databases
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Execute a query with the database connection
    pub fn with_connection<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self.conn.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }
}

/// Get the default database path
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("review-dashboard").join("reviews.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_initialize() {
        let db = Database::in_memory().unwrap();
        db.initialize().unwrap();
        // Idempotent
        db.initialize().unwrap();
        assert!(db.path().is_none());
    }

    #[test]
    fn test_file_database() {
        let path = std::env::temp_dir().join("review_dashboard_test_db.sqlite");
        std::fs::remove_file(&path).ok();

        let db = Database::new(path.clone()).unwrap();
        db.initialize().unwrap();
        assert_eq!(db.path(), Some(&path));

        drop(db);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_default_db_path() {
        let path = default_db_path();
        assert!(path.ends_with("review-dashboard/reviews.db"));
    }
}
