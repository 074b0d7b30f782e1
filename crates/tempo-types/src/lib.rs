//! # tempo-types
//!
//! Shared account types used across the Tempo workspace and exported as
//! TypeScript bindings for the desktop UI.

pub mod account;

pub use account::{MigrationOutcome, SessionSnapshot, StartRoute, UserView};

/// The built-in administrator username. This account always exists and
/// can never be deleted.
pub const ADMIN_USERNAME: &str = "admin";

/// Initial password for the built-in administrator account.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// DiceBear endpoint used to render avatars from a seed string.
pub const AVATAR_API_BASE: &str = "https://api.dicebear.com/7.x";

/// DiceBear style rendered by the UI.
pub const AVATAR_STYLE: &str = "adventurer";

/// Derive the avatar image URL for a seed.
pub fn avatar_url_for(seed: &str) -> String {
    format!("{AVATAR_API_BASE}/{AVATAR_STYLE}/svg?seed={seed}")
}
