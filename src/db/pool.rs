//! SQLite connection pool wrapper (lightweight for CLI usage).

use rusqlite::{Connection, OpenFlags, Result};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open (or create) the database file.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::configure(conn, DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// Open an existing database file without creating it.
    pub fn open_existing(path: &str, busy_timeout_ms: u64) -> Result<Self> {
        let conn = Connection::open_with_flags(
            Path::new(path),
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Self::configure(conn, busy_timeout_ms)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn, DEFAULT_BUSY_TIMEOUT_MS)
    }

    fn configure(conn: Connection, busy_timeout_ms: u64) -> Result<Self> {
        conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
        Ok(Self { conn })
    }

    /// Returns true when both core tables exist.
    pub fn ping(&self) -> Result<bool> {
        let found: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master
             WHERE type = 'table' AND name IN ('user_profiles', 'timesheets')",
            [],
            |row| row.get(0),
        )?;
        Ok(found == 2)
    }
}
