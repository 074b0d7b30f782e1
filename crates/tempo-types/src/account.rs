//! Account structures shared between the store and the UI.

use serde::{Deserialize, Serialize};

use crate::{avatar_url_for, ADMIN_USERNAME};

/// A complete user record as presented to the UI: the stored credential
/// merged with profile fields and derived attributes.
///
/// `password` is the verbatim stored value. The store keeps passwords in
/// plain text (a known, deliberate defect inherited from the product's
/// first release), so this view must never leave the device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct UserView {
    pub username: String,
    pub password: String,
    /// Free-text bio. Empty when the user never wrote one.
    pub bio: String,
    /// Seed for avatar rendering. Defaults to the username.
    pub avatar_seed: String,
    /// Rendered avatar URL derived from `avatar_seed`.
    pub avatar_url: String,
    /// True only for the built-in administrator account.
    pub is_admin: bool,
}

impl UserView {
    /// Build a view, deriving `avatar_url` and `is_admin` from the inputs.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        bio: impl Into<String>,
        avatar_seed: impl Into<String>,
    ) -> Self {
        let username = username.into();
        let avatar_seed = avatar_seed.into();
        Self {
            avatar_url: avatar_url_for(&avatar_seed),
            is_admin: username == ADMIN_USERNAME,
            username,
            password: password.into(),
            bio: bio.into(),
            avatar_seed,
        }
    }
}

/// Where the UI should land when the app starts.
///
/// Ordering matters: a first launch always wins over a remembered
/// session, so onboarding is shown exactly once even when auto-login
/// would otherwise apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StartRoute {
    Onboarding,
    Login,
    Home,
}

/// Snapshot of the persisted session scalars, plus the derived
/// auto-login decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct SessionSnapshot {
    /// Username of the logged-in user, if any.
    pub current_user: Option<String>,
    pub remember_me: bool,
    pub first_launch: bool,
    /// True iff `remember_me` is set and a current user exists.
    pub should_auto_login: bool,
}

/// Summary of what a migration run changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[ts(export)]
pub struct MigrationOutcome {
    /// Username carried over from the single-user schema, if one was found.
    pub seeded_legacy_user: Option<String>,
    /// True when this run had to insert the administrator account.
    pub admin_created: bool,
    /// Number of credential entries after the run.
    pub user_count: u32,
}
