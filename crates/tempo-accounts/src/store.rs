//! The preference store seam.
//!
//! Account components never touch SQLite directly; they go through
//! [`PrefStore`], a string-keyed store with safe-by-default reads.
//! Production code wires in [`SqlitePrefs`] over the daemon database,
//! tests wire in [`MemoryPrefs`].

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use rusqlite::Connection;
use tempo_db::queries::prefs;

/// A string-keyed preference store.
///
/// Reads of absent keys yield the caller's default instead of an
/// error, and writes are durable before the call returns. Values are
/// plain strings; booleans are encoded as `"true"` / `"false"` (reads
/// also accept `"1"` for compatibility with older stores).
pub trait PrefStore: Send + Sync {
    /// Raw read, `None` when the key is absent.
    fn get(&self, key: &str) -> tempo_db::Result<Option<String>>;

    /// Insert or overwrite a value.
    fn set(&self, key: &str, value: &str) -> tempo_db::Result<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> tempo_db::Result<()>;

    /// Read with a fallback default.
    fn get_or(&self, key: &str, default: &str) -> tempo_db::Result<String> {
        Ok(self.get(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Boolean read with a fallback default. Anything that is not a
    /// recognized truthy spelling reads as `false`.
    fn get_bool(&self, key: &str, default: bool) -> tempo_db::Result<bool> {
        Ok(match self.get(key)? {
            Some(value) => value == "true" || value == "1",
            None => default,
        })
    }

    /// Boolean write.
    fn set_bool(&self, key: &str, value: bool) -> tempo_db::Result<()> {
        self.set(key, if value { "true" } else { "false" })
    }

    /// Whether the key currently holds a value.
    fn contains(&self, key: &str) -> tempo_db::Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// [`PrefStore`] backed by the daemon's SQLite database.
pub struct SqlitePrefs {
    conn: Mutex<Connection>,
}

impl SqlitePrefs {
    /// Wrap an already-opened and migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PrefStore for SqlitePrefs {
    fn get(&self, key: &str) -> tempo_db::Result<Option<String>> {
        prefs::get(&self.conn(), key)
    }

    fn set(&self, key: &str, value: &str) -> tempo_db::Result<()> {
        prefs::set(&self.conn(), key, value)
    }

    fn remove(&self, key: &str) -> tempo_db::Result<()> {
        prefs::remove(&self.conn(), key)
    }
}

/// In-memory [`PrefStore`] for tests.
#[derive(Default)]
pub struct MemoryPrefs {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryPrefs {
    fn get(&self, key: &str) -> tempo_db::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> tempo_db::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> tempo_db::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}
