//! The account manager facade.
//!
//! One handle over credential, profile, and session state, sharing a
//! single preference store. Daemon commands go through this type; the
//! underlying tables stay reachable through accessors for callers that
//! need them directly.

use std::sync::Arc;

use tempo_types::{MigrationOutcome, StartRoute, UserView, ADMIN_USERNAME};

use crate::credentials::CredentialTable;
use crate::error::{AccountError, Result};
use crate::migrate;
use crate::profiles::{self, ProfileTable};
use crate::session::Session;
use crate::store::PrefStore;

pub struct AccountManager {
    store: Arc<dyn PrefStore>,
    credentials: CredentialTable,
    profiles: ProfileTable,
    session: Session,
}

impl AccountManager {
    /// Build the facade over `store`. The admin account is guaranteed
    /// to exist before this returns.
    pub fn new(store: Arc<dyn PrefStore>) -> Result<Self> {
        let manager = Self {
            credentials: CredentialTable::new(Arc::clone(&store)),
            profiles: ProfileTable::new(Arc::clone(&store)),
            session: Session::new(Arc::clone(&store)),
            store,
        };
        migrate::ensure_admin(&manager.credentials)?;
        Ok(manager)
    }

    /// Re-run the legacy upgrade over this manager's store. Idempotent,
    /// so callers may invoke it at every launch.
    pub fn run_migration(&self) -> Result<MigrationOutcome> {
        migrate::migrate_legacy(self.store.as_ref())
    }

    /// Create a new account. Registering does not log the user in.
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        self.credentials.create(username, password)
    }

    /// Log in and record the remember-me choice. Unknown usernames and
    /// wrong passwords fail identically.
    pub fn login(&self, username: &str, password: &str, remember: bool) -> Result<()> {
        if !self.credentials.validate(username, password)? {
            return Err(AccountError::InvalidCredentials);
        }
        self.session.set_current_user(Some(username))?;
        self.session.set_remember_me(remember)
    }

    /// Clear the session. The remember flag goes with it.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    /// Complete record for one user, or `None` when unknown.
    pub fn user_view(&self, username: &str) -> Result<Option<UserView>> {
        let users = self.credentials.load_all()?;
        let Some(password) = users.get(username) else {
            return Ok(None);
        };
        let profile = self.profiles.get(username)?;
        Ok(Some(UserView::new(
            username,
            password,
            profile.bio,
            profile.avatar_seed,
        )))
    }

    /// View of the logged-in user. `None` when logged out, and also
    /// when the session still names an account that has since been
    /// deleted (session validity is checked at read time, not write
    /// time).
    pub fn current_user_view(&self) -> Result<Option<UserView>> {
        match self.session.current_user()? {
            Some(username) => self.user_view(&username),
            None => Ok(None),
        }
    }

    pub fn update_bio(&self, username: &str, bio: &str) -> Result<()> {
        self.profiles.update_bio(username, bio)
    }

    /// Roll a new random avatar seed for `username` and return it.
    pub fn regenerate_avatar(&self, username: &str) -> Result<String> {
        let seed = profiles::random_seed();
        self.profiles.update_avatar_seed(username, &seed)?;
        Ok(seed)
    }

    /// All usernames, sorted.
    pub fn list_users(&self) -> Result<Vec<String>> {
        Ok(self.credentials.load_all()?.into_keys().collect())
    }

    pub fn update_password(&self, username: &str, password: &str) -> Result<()> {
        self.credentials.update(username, password)
    }

    /// Delete an account. The admin account is refused here so that
    /// every caller hits the same wall; the table itself stays
    /// policy-free.
    pub fn delete_user(&self, username: &str) -> Result<()> {
        if username == ADMIN_USERNAME {
            return Err(AccountError::ProtectedAccount);
        }
        self.credentials.delete(username)
    }

    /// Where the app should land on launch. First launch wins over a
    /// remembered session; otherwise auto-login decides.
    pub fn start_route(&self) -> Result<StartRoute> {
        if self.session.is_first_launch()? {
            Ok(StartRoute::Onboarding)
        } else if self.session.should_auto_login()? {
            Ok(StartRoute::Home)
        } else {
            Ok(StartRoute::Login)
        }
    }

    pub fn credentials(&self) -> &CredentialTable {
        &self.credentials
    }

    pub fn profiles(&self) -> &ProfileTable {
        &self.profiles
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}
