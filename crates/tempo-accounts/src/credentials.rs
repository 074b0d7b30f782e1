//! The credential table: the username to password map that is the
//! authentication source of truth.
//!
//! The whole table lives under one preference key as a JSON object.
//! Every mutation is a read-modify-write of that blob, serialized by a
//! table-level lock so concurrent writers cannot drop each other's
//! entries.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use crate::error::{AccountError, Result};
use crate::keys;
use crate::store::PrefStore;

/// Username to password map stored under [`keys::USERS`].
///
/// Passwords are stored verbatim. That is the format every released
/// version of the app has written, the store is device-local, and
/// changing it would orphan existing installs.
pub struct CredentialTable {
    store: Arc<dyn PrefStore>,
    write_lock: Mutex<()>,
}

impl CredentialTable {
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Snapshot of the full table, sorted by username.
    ///
    /// A missing or undecodable blob reads as an empty table.
    pub fn load_all(&self) -> Result<BTreeMap<String, String>> {
        let raw = self.store.get_or(keys::USERS, "{}")?;
        Ok(decode_users(&raw))
    }

    /// Add a new account. Fails with [`AccountError::Conflict`] when
    /// the username is already taken.
    pub fn create(&self, username: &str, password: &str) -> Result<()> {
        let _guard = self.guard();
        let mut users = self.load_all()?;
        if users.contains_key(username) {
            return Err(AccountError::Conflict(username.to_string()));
        }
        users.insert(username.to_string(), password.to_string());
        self.save_all(&users)
    }

    /// Replace an existing account's password. Fails with
    /// [`AccountError::NotFound`] when the username is absent.
    pub fn update(&self, username: &str, password: &str) -> Result<()> {
        let _guard = self.guard();
        let mut users = self.load_all()?;
        match users.get_mut(username) {
            Some(stored) => *stored = password.to_string(),
            None => return Err(AccountError::NotFound(username.to_string())),
        }
        self.save_all(&users)
    }

    /// Remove an account. Fails with [`AccountError::NotFound`] when
    /// the username is absent.
    ///
    /// This table does not special-case the admin account; the refusal
    /// to delete it lives in the manager so the policy is applied at
    /// the call surface every caller goes through.
    pub fn delete(&self, username: &str) -> Result<()> {
        let _guard = self.guard();
        let mut users = self.load_all()?;
        if users.remove(username).is_none() {
            return Err(AccountError::NotFound(username.to_string()));
        }
        self.save_all(&users)
    }

    /// Whether `password` matches the stored password for `username`.
    /// Unknown usernames validate to `false`, same as a wrong password.
    pub fn validate(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.load_all()?;
        Ok(users.get(username).map(String::as_str) == Some(password))
    }

    /// Whether an account with this username exists.
    pub fn exists(&self, username: &str) -> Result<bool> {
        Ok(self.load_all()?.contains_key(username))
    }

    fn save_all(&self, users: &BTreeMap<String, String>) -> Result<()> {
        let encoded = encode_users(users)?;
        self.store.set(keys::USERS, &encoded)?;
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Decode a credential blob, recovering from corruption by starting
/// over with an empty table.
pub(crate) fn decode_users(raw: &str) -> BTreeMap<String, String> {
    match serde_json::from_str(raw) {
        Ok(users) => users,
        Err(err) => {
            warn!("Credential blob failed to decode, treating as empty: {err}");
            BTreeMap::new()
        }
    }
}

pub(crate) fn encode_users(users: &BTreeMap<String, String>) -> Result<String> {
    Ok(serde_json::to_string(users)?)
}
