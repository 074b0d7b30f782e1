//! Authentication command handlers.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Create a new account. Registering does not log the user in; the UI
/// sends them to the login screen afterwards.
pub async fn register(state: &Arc<DaemonState>, params: &Value) -> Result {
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

    info!("Registering account '{username}'");

    state.accounts.register(username, password)?;

    // Sign-up optionally includes a first bio in the same step
    if let Some(bio) = params.get("bio").and_then(|v| v.as_str()) {
        let bio = bio.trim();
        if !bio.is_empty() {
            state.accounts.update_bio(username, bio)?;
        }
    }

    Ok(serde_json::json!({"registered": true, "username": username}))
}

/// Log in, recording the remember-me choice (defaults to off).
pub async fn login(state: &Arc<DaemonState>, params: &Value) -> Result {
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
    let remember = params
        .get("remember")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    info!("Authenticating '{username}'");

    state.accounts.login(username, password, remember)?;

    Ok(serde_json::json!({"username": username, "remember": remember}))
}

/// Clear the session.
pub async fn logout(state: &Arc<DaemonState>) -> Result {
    info!("Logging out");
    state.accounts.logout()?;
    Ok(serde_json::json!({"logged_out": true}))
}
