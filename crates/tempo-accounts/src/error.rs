//! Error types for account operations.

/// Errors surfaced by account operations.
///
/// There is deliberately no variant for a corrupt stored blob: decode
/// failures are recovered in place by substituting an empty collection
/// (logged at warn level), so the app keeps working with whatever data
/// is still readable.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// The named user is not in the credential table.
    #[error("no such user: {0}")]
    NotFound(String),

    /// An account with the requested username already exists.
    #[error("username already taken: {0}")]
    Conflict(String),

    /// Login failed. Unknown usernames and wrong passwords both map
    /// here so callers cannot probe which usernames exist.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The built-in admin account cannot be deleted.
    #[error("the admin account cannot be deleted")]
    ProtectedAccount,

    /// A stored blob could not be re-encoded. Should not happen for
    /// maps of strings; propagated rather than swallowed.
    #[error("failed to encode stored blob: {0}")]
    Encode(#[from] serde_json::Error),

    /// The underlying preference store failed.
    #[error("preference store error: {0}")]
    Store(#[from] tempo_db::DbError),
}

pub type Result<T> = std::result::Result<T, AccountError>;
