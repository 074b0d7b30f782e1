//! One-shot upgrade from the single-user layout, plus the admin
//! bootstrap guarantee.
//!
//! The first release stored exactly one account as two plain keys.
//! [`migrate_legacy`] folds that pair into the multi-user credential
//! map. The presence of the map key is the tombstone: once it exists,
//! the legacy keys are never consulted again, and they are left in
//! place untouched. Later deleting the migrated account therefore
//! cannot resurrect it.

use std::collections::BTreeMap;

use tracing::info;

use tempo_types::{MigrationOutcome, ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD};

use crate::credentials::{decode_users, encode_users, CredentialTable};
use crate::error::{AccountError, Result};
use crate::keys;
use crate::store::PrefStore;

/// Upgrade the store in place. Idempotent; call at every cold start
/// before serving account traffic.
///
/// Ends with the admin account guaranteed present, even when there is
/// nothing to migrate. Writes at most once.
pub fn migrate_legacy(store: &dyn PrefStore) -> Result<MigrationOutcome> {
    let mut seeded_legacy_user = None;

    let mut users = if store.contains(keys::USERS)? {
        decode_users(&store.get_or(keys::USERS, "{}")?)
    } else {
        let username = store.get(keys::LEGACY_USERNAME)?.filter(|v| !v.is_empty());
        let password = store.get(keys::LEGACY_PASSWORD)?.filter(|v| !v.is_empty());

        let mut users = BTreeMap::new();
        if let (Some(username), Some(password)) = (username, password) {
            info!("Migrating legacy single-user account '{username}'");
            users.insert(username.clone(), password);
            seeded_legacy_user = Some(username);
        }
        users
    };

    let admin_created = !users.contains_key(ADMIN_USERNAME);
    if admin_created {
        users.insert(
            ADMIN_USERNAME.to_string(),
            DEFAULT_ADMIN_PASSWORD.to_string(),
        );
        info!("Created built-in admin account");
    }

    if seeded_legacy_user.is_some() || admin_created {
        store.set(keys::USERS, &encode_users(&users)?)?;
    }

    Ok(MigrationOutcome {
        seeded_legacy_user,
        admin_created,
        user_count: users.len() as u32,
    })
}

/// Guarantee the admin account exists, returning whether it had to be
/// created. An existing admin row is never touched, so a changed admin
/// password survives restarts.
pub fn ensure_admin(table: &CredentialTable) -> Result<bool> {
    match table.create(ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD) {
        Ok(()) => {
            info!("Created built-in admin account");
            Ok(true)
        }
        Err(AccountError::Conflict(_)) => Ok(false),
        Err(err) => Err(err),
    }
}
