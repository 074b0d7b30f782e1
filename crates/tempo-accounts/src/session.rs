//! Login session state.
//!
//! Three scalars stored as individual preference entries: the current
//! user, the remember-me flag, and the first-launch flag. All reads
//! have defaults, so a fresh install behaves as logged out with
//! onboarding pending.

use std::sync::Arc;

use tempo_types::SessionSnapshot;

use crate::error::Result;
use crate::keys;
use crate::store::PrefStore;

pub struct Session {
    store: Arc<dyn PrefStore>,
}

impl Session {
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self { store }
    }

    /// Username of the logged-in user, `None` when logged out. An
    /// empty stored value also reads as logged out.
    pub fn current_user(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(keys::CURRENT_USER)?
            .filter(|name| !name.is_empty()))
    }

    /// Set or clear the logged-in user. Clearing removes the entry
    /// rather than storing an empty string.
    pub fn set_current_user(&self, username: Option<&str>) -> Result<()> {
        match username {
            Some(name) => self.store.set(keys::CURRENT_USER, name)?,
            None => self.store.remove(keys::CURRENT_USER)?,
        }
        Ok(())
    }

    /// Whether the current user opted into auto-login. Defaults to
    /// `false`; every login records the choice anew.
    pub fn remember_me(&self) -> Result<bool> {
        Ok(self.store.get_bool(keys::REMEMBER_ME, false)?)
    }

    pub fn set_remember_me(&self, remember: bool) -> Result<()> {
        Ok(self.store.set_bool(keys::REMEMBER_ME, remember)?)
    }

    /// Whether onboarding has never been completed on this install.
    /// Defaults to `true` and flips exactly once.
    pub fn is_first_launch(&self) -> Result<bool> {
        Ok(self.store.get_bool(keys::IS_FIRST_LAUNCH, true)?)
    }

    /// Record that onboarding finished. This is the only writer of the
    /// first-launch flag; nothing ever sets it back.
    pub fn complete_onboarding(&self) -> Result<()> {
        Ok(self.store.set_bool(keys::IS_FIRST_LAUNCH, false)?)
    }

    /// Whether the app should skip the login screen: a remembered user
    /// must both exist and have opted in.
    pub fn should_auto_login(&self) -> Result<bool> {
        Ok(self.remember_me()? && self.current_user()?.is_some())
    }

    /// Clear the logged-in user and the remember flag. The
    /// first-launch flag is untouched. Safe to call when already
    /// logged out.
    pub fn logout(&self) -> Result<()> {
        self.set_current_user(None)?;
        self.set_remember_me(false)
    }

    /// One consistent view of all session state.
    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(SessionSnapshot {
            current_user: self.current_user()?,
            remember_me: self.remember_me()?,
            first_launch: self.is_first_launch()?,
            should_auto_login: self.should_auto_login()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryPrefs;

    fn test_session() -> Session {
        Session::new(Arc::new(MemoryPrefs::new()))
    }

    #[test]
    fn test_fresh_install_defaults() {
        let session = test_session();
        assert_eq!(session.current_user().expect("user"), None);
        assert!(!session.remember_me().expect("remember"));
        assert!(session.is_first_launch().expect("first launch"));
        assert!(!session.should_auto_login().expect("auto login"));
    }

    #[test]
    fn test_auto_login_requires_both() {
        let session = test_session();

        session.set_remember_me(true).expect("set remember");
        assert!(!session.should_auto_login().expect("no user yet"));

        session
            .set_current_user(Some("alice"))
            .expect("set user");
        assert!(session.should_auto_login().expect("both set"));

        session.set_remember_me(false).expect("clear remember");
        assert!(!session.should_auto_login().expect("not remembered"));
    }

    #[test]
    fn test_logout_clears_user_and_remember() {
        let session = test_session();
        session.complete_onboarding().expect("onboard");
        session.set_current_user(Some("alice")).expect("set user");
        session.set_remember_me(true).expect("set remember");

        session.logout().expect("logout");

        assert_eq!(session.current_user().expect("user"), None);
        assert!(!session.remember_me().expect("remember"));
        // Onboarding state survives logout
        assert!(!session.is_first_launch().expect("first launch"));
    }

    #[test]
    fn test_logout_while_logged_out() {
        let session = test_session();
        session.logout().expect("logout is a no-op");
        assert_eq!(session.current_user().expect("user"), None);
    }

    #[test]
    fn test_empty_stored_user_reads_as_logged_out() {
        let store = Arc::new(MemoryPrefs::new());
        store.set(keys::CURRENT_USER, "").expect("seed");

        let session = Session::new(Arc::clone(&store) as Arc<dyn PrefStore>);
        assert_eq!(session.current_user().expect("user"), None);
        assert!(!session.should_auto_login().expect("auto login"));
    }

    #[test]
    fn test_clearing_user_removes_entry() {
        let store = Arc::new(MemoryPrefs::new());
        let session = Session::new(Arc::clone(&store) as Arc<dyn PrefStore>);

        session.set_current_user(Some("alice")).expect("set");
        session.set_current_user(None).expect("clear");
        assert!(!store.contains(keys::CURRENT_USER).expect("contains"));
    }

    #[test]
    fn test_snapshot_matches_accessors() {
        let session = test_session();
        session.set_current_user(Some("alice")).expect("set user");
        session.set_remember_me(true).expect("set remember");

        let snap = session.snapshot().expect("snapshot");
        assert_eq!(snap.current_user.as_deref(), Some("alice"));
        assert!(snap.remember_me);
        assert!(snap.first_launch);
        assert!(snap.should_auto_login);
    }
}
