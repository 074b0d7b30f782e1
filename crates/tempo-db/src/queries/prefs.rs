//! Preference query functions.
//!
//! Missing keys are never an error: `get` returns `None` and callers
//! supply their own defaults. Typed accessors (booleans, JSON blobs)
//! live with the store adapter in `tempo-accounts`.

use rusqlite::Connection;

use crate::{DbError, Result};

/// Get a preference value by key, `None` when absent.
pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    match conn.query_row("SELECT value FROM prefs WHERE key = ?1", [key], |row| {
        row.get(0)
    }) {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(other) => Err(DbError::Sqlite(other)),
    }
}

/// Set a preference value, inserting or overwriting.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO prefs (key, value) VALUES (?1, ?2)",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

/// Remove a preference. Removing an absent key is a no-op.
pub fn remove(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM prefs WHERE key = ?1", [key])?;
    Ok(())
}
