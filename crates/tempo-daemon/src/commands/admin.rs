//! User administration command handlers.
//!
//! There is no role gate here: whether to offer the management screen
//! is the UI's call. The one hard rule, that the admin account cannot
//! be deleted, is enforced beneath this layer and reported as
//! PROTECTED_ACCOUNT.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// All usernames, sorted.
pub async fn list_users(state: &Arc<DaemonState>) -> Result {
    let users = state.accounts.list_users()?;
    Ok(serde_json::json!({"users": users}))
}

/// Create an account on another user's behalf.
pub async fn create_user(state: &Arc<DaemonState>, params: &Value) -> Result {
    let username = params
        .get("username")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params("username required"))?;
    let password = params
        .get("password")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params("password required"))?;

    info!("Creating account '{username}'");

    state.accounts.register(username, password)?;

    Ok(serde_json::json!({"created": true, "username": username}))
}

/// Replace an existing account's password.
pub async fn update_user_password(state: &Arc<DaemonState>, params: &Value) -> Result {
    let username = params
        .get("username")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params("username required"))?;
    let password = params
        .get("password")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params("password required"))?;

    info!("Updating password for '{username}'");

    state.accounts.update_password(username, password)?;

    Ok(serde_json::json!({"updated": true, "username": username}))
}

/// Delete an account.
pub async fn delete_user(state: &Arc<DaemonState>, params: &Value) -> Result {
    let username = params
        .get("username")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RpcError::invalid_params("username required"))?;

    info!("Deleting account '{username}'");

    state.accounts.delete_user(username)?;

    Ok(serde_json::json!({"deleted": true, "username": username}))
}
