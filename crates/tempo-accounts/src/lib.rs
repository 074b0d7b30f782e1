//! Account state for the Tempo daemon.
//!
//! Everything the app knows about its users lives in a handful of
//! preference entries: a credential map, a profile map, and a few
//! session scalars. This crate owns those entries end to end:
//!
//! - [`store`] is the preference-store seam. Components talk to a
//!   [`PrefStore`] trait object, so tests swap the SQLite-backed store
//!   for an in-memory map.
//! - [`credentials`] holds the username/password map that is the
//!   authentication source of truth.
//! - [`profiles`] holds per-user display fields (bio, avatar seed)
//!   with an independent lifecycle from credentials.
//! - [`session`] tracks who is logged in, the remember-me flag, and
//!   the first-launch flag.
//! - [`migrate`] upgrades the single-user layout shipped in the first
//!   release and guarantees the built-in admin account.
//! - [`manager`] is the facade the daemon commands call.
//!
//! Credential and profile maps are stored as single JSON blobs and
//! every mutation is a whole-blob read-modify-write. That is deliberate:
//! the store holds tens of users, not thousands, and one blob per table
//! keeps the storage layout identical to what existing installs already
//! have on disk.

pub mod credentials;
pub mod error;
pub mod manager;
pub mod migrate;
pub mod profiles;
pub mod session;
pub mod store;

pub use credentials::CredentialTable;
pub use error::{AccountError, Result};
pub use manager::AccountManager;
pub use profiles::ProfileTable;
pub use session::Session;
pub use store::{MemoryPrefs, PrefStore, SqlitePrefs};

/// Well-known preference keys.
///
/// These spellings are load-bearing: they match the entries written by
/// every released version of the app, so existing stores keep working
/// after an upgrade.
pub mod keys {
    /// Credential map, a JSON object of username to password.
    pub const USERS: &str = "users";
    /// Profile map, a JSON object of username to profile fields.
    pub const USER_PROFILES: &str = "user_profiles";
    /// Username of the logged-in user. Absent when logged out.
    pub const CURRENT_USER: &str = "current_user";
    /// Whether the current user opted into auto-login.
    pub const REMEMBER_ME: &str = "remember_me";
    /// Whether onboarding has never been completed on this install.
    pub const IS_FIRST_LAUNCH: &str = "is_first_launch";

    /// Single account username from the pre-multi-user layout. Read
    /// once by migration, never written.
    pub const LEGACY_USERNAME: &str = "username";
    /// Single account password from the pre-multi-user layout. Read
    /// once by migration, never written.
    pub const LEGACY_PASSWORD: &str = "password";
}
