//! Profile command handlers. These all operate on the logged-in user.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Composite view of the logged-in user, or null when logged out (and
/// when the session names an account that no longer exists).
pub async fn get_current_user_view(state: &Arc<DaemonState>) -> Result {
    let view = state.accounts.current_user_view()?;
    serde_json::to_value(view).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Replace the logged-in user's bio.
pub async fn update_bio(state: &Arc<DaemonState>, params: &Value) -> Result {
    let bio = params
        .get("bio")
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params("bio required"))?
        .trim();

    let username = state
        .accounts
        .session()
        .current_user()?
        .ok_or_else(RpcError::not_logged_in)?;

    state.accounts.update_bio(&username, bio)?;

    Ok(serde_json::json!({"username": username, "bio": bio}))
}

/// Roll a new random avatar for the logged-in user, returning the new
/// seed and the refreshed view.
pub async fn regenerate_avatar(state: &Arc<DaemonState>) -> Result {
    let username = state
        .accounts
        .session()
        .current_user()?
        .ok_or_else(RpcError::not_logged_in)?;

    info!("Regenerating avatar for '{username}'");

    let seed = state.accounts.regenerate_avatar(&username)?;
    let view = state.accounts.user_view(&username)?;

    Ok(serde_json::json!({"seed": seed, "user": view}))
}
