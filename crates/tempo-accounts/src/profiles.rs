//! Per-user display fields: bio and avatar seed.
//!
//! Profiles are an extension table, not part of the credential map.
//! Rows live and die independently of accounts: deleting an account
//! leaves its row behind, and reads for a user with no row fall back
//! to defaults (empty bio, username as avatar seed).

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::keys;
use crate::store::PrefStore;

/// One profile row as stored. Serialized field names keep the
/// camelCase spelling of the on-disk blob format.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar_seed: Option<String>,
}

/// Profile fields with defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub bio: String,
    pub avatar_seed: String,
}

/// Username to profile map stored under [`keys::USER_PROFILES`].
pub struct ProfileTable {
    store: Arc<dyn PrefStore>,
    write_lock: Mutex<()>,
}

impl ProfileTable {
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Profile for `username`, with defaults where fields are unset.
    /// Never fails on a missing row.
    pub fn get(&self, username: &str) -> Result<Profile> {
        let rows = self.load_rows()?;
        let row = rows.get(username);
        Ok(Profile {
            bio: row.and_then(|r| r.bio.clone()).unwrap_or_default(),
            avatar_seed: row
                .and_then(|r| r.avatar_seed.clone())
                .unwrap_or_else(|| username.to_string()),
        })
    }

    /// Set the bio, creating the row if needed.
    pub fn update_bio(&self, username: &str, bio: &str) -> Result<()> {
        self.update_row(username, |row| row.bio = Some(bio.to_string()))
    }

    /// Set the avatar seed, creating the row if needed.
    pub fn update_avatar_seed(&self, username: &str, seed: &str) -> Result<()> {
        self.update_row(username, |row| row.avatar_seed = Some(seed.to_string()))
    }

    fn update_row(&self, username: &str, apply: impl FnOnce(&mut ProfileRow)) -> Result<()> {
        let _guard = self.guard();
        let mut rows = self.load_rows()?;
        apply(rows.entry(username.to_string()).or_default());
        self.save_rows(&rows)
    }

    fn load_rows(&self) -> Result<BTreeMap<String, ProfileRow>> {
        let raw = self.store.get_or(keys::USER_PROFILES, "{}")?;
        Ok(match serde_json::from_str(&raw) {
            Ok(rows) => rows,
            Err(err) => {
                warn!("Profile blob failed to decode, treating as empty: {err}");
                BTreeMap::new()
            }
        })
    }

    fn save_rows(&self, rows: &BTreeMap<String, ProfileRow>) -> Result<()> {
        let encoded = serde_json::to_string(rows)?;
        self.store.set(keys::USER_PROFILES, &encoded)?;
        Ok(())
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Generate a fresh random avatar seed.
pub fn random_seed() -> String {
    let mut bytes = [0u8; 8];
    rand::RngCore::fill_bytes(&mut rand::rngs::OsRng, &mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPrefs;

    fn test_table() -> ProfileTable {
        ProfileTable::new(Arc::new(MemoryPrefs::new()))
    }

    #[test]
    fn test_missing_row_resolves_defaults() {
        let table = test_table();
        let profile = table.get("alice").expect("get");
        assert_eq!(profile.bio, "");
        assert_eq!(profile.avatar_seed, "alice");
    }

    #[test]
    fn test_update_bio() {
        let table = test_table();
        table.update_bio("alice", "drummer").expect("update");
        let profile = table.get("alice").expect("get");
        assert_eq!(profile.bio, "drummer");
        // Unset seed still resolves to the username
        assert_eq!(profile.avatar_seed, "alice");
    }

    #[test]
    fn test_update_seed_keeps_bio() {
        let table = test_table();
        table.update_bio("alice", "drummer").expect("update bio");
        table.update_avatar_seed("alice", "f00dcafe").expect("update seed");

        let profile = table.get("alice").expect("get");
        assert_eq!(profile.bio, "drummer");
        assert_eq!(profile.avatar_seed, "f00dcafe");
    }

    #[test]
    fn test_rows_are_independent_of_accounts() {
        // No account registry here at all; any username can get a row.
        let table = test_table();
        table.update_bio("never-registered", "hi").expect("update");
        assert_eq!(table.get("never-registered").expect("get").bio, "hi");
    }

    #[test]
    fn test_stored_field_names_are_camel_case() {
        let store = Arc::new(MemoryPrefs::new());
        let table = ProfileTable::new(Arc::clone(&store) as Arc<dyn PrefStore>);
        table.update_avatar_seed("alice", "abc123").expect("update");

        let raw = store.get(keys::USER_PROFILES).expect("get").expect("blob");
        assert!(raw.contains(r#""avatarSeed":"abc123""#), "raw blob: {raw}");
    }

    #[test]
    fn test_malformed_blob_recovers_empty() {
        let store = Arc::new(MemoryPrefs::new());
        store.set(keys::USER_PROFILES, "[1, 2, 3]").expect("seed");

        let table = ProfileTable::new(Arc::clone(&store) as Arc<dyn PrefStore>);
        assert_eq!(table.get("alice").expect("get").bio, "");

        table.update_bio("alice", "recovered").expect("update");
        assert_eq!(table.get("alice").expect("get").bio, "recovered");
    }

    #[test]
    fn test_random_seed_shape() {
        let seed = random_seed();
        assert_eq!(seed.len(), 16);
        assert!(seed.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(random_seed(), seed);
    }
}
