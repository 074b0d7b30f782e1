//! tempo-daemon: the Tempo companion daemon.
//!
//! Single OS process running a Tokio async runtime, owning every piece
//! of persistent account state on the device. The UI communicates with
//! it via newline-delimited JSON-RPC over a Unix socket.

mod commands;
mod config;
mod rpc;

use std::sync::Arc;

use tracing::{error, info};

use tempo_accounts::{AccountManager, PrefStore, SqlitePrefs};

use crate::config::DaemonConfig;
use crate::rpc::RpcServer;

/// Daemon-wide shared state.
pub struct DaemonState {
    /// Account facade shared by every connection.
    pub accounts: AccountManager,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load config (logging level comes from it)
    let config = DaemonConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("tempo={}", config.advanced.log_level).parse()?),
        )
        .init();

    info!("Tempo daemon starting");

    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir)?;

    // 2. Open the store
    let db_path = data_dir.join("tempo.db");
    let conn = tempo_db::open(&db_path)?;
    let store: Arc<dyn PrefStore> = Arc::new(SqlitePrefs::new(conn));

    // 3. Bring the account layout up to date before serving anything
    let outcome = tempo_accounts::migrate::migrate_legacy(store.as_ref())?;
    if let Some(username) = &outcome.seeded_legacy_user {
        info!("Migrated legacy account '{username}'");
    }
    info!("Store ready with {} account(s)", outcome.user_count);

    // 4. Build daemon state
    let accounts = AccountManager::new(store)?;
    let state = Arc::new(DaemonState { accounts });

    // 5. Run the RPC server until shutdown
    let socket_path = data_dir.join("daemon.sock");
    let rpc_server = RpcServer::new(state, socket_path.clone());

    info!("Starting JSON-RPC server on {:?}", socket_path);

    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                error!("RPC server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl-C received, shutting down");
        }
    }

    // Clean up socket file
    info!("Daemon shutting down");
    let _ = std::fs::remove_file(&socket_path);

    info!("Daemon stopped");
    Ok(())
}
