//! Startup and session lifecycle command handlers.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::rpc::RpcError;
use crate::DaemonState;

type Result = std::result::Result<Value, RpcError>;

/// Upgrade the store layout. Idempotent, so the UI may call it on
/// every launch. The daemon also runs this once at startup.
pub async fn run_migration(state: &Arc<DaemonState>) -> Result {
    let outcome = state.accounts.run_migration()?;
    serde_json::to_value(&outcome).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Which screen the app should land on.
pub async fn get_start_route(state: &Arc<DaemonState>) -> Result {
    let route = state.accounts.start_route()?;
    serde_json::to_value(route).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Session scalars plus the derived auto-login decision, in one read.
pub async fn get_session(state: &Arc<DaemonState>) -> Result {
    let snapshot = state.accounts.session().snapshot()?;
    serde_json::to_value(&snapshot).map_err(|e| RpcError::internal_error(&e.to_string()))
}

/// Record that onboarding finished. There is no way back.
pub async fn complete_onboarding(state: &Arc<DaemonState>) -> Result {
    info!("Onboarding completed");
    state.accounts.session().complete_onboarding()?;
    Ok(serde_json::json!({"first_launch": false}))
}
