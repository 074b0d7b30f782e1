//! JSON-RPC server over Unix socket.
//!
//! Listens on a Unix domain socket, accepts connections, and dispatches
//! newline-delimited JSON-RPC 2.0 calls to the command handlers.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tempo_accounts::AccountError;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tracing::{debug, error, info, warn};

use crate::commands;
use crate::DaemonState;

/// JSON-RPC request.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version (must be "2.0").
    pub jsonrpc: String,
    /// Request ID.
    pub id: serde_json::Value,
    /// Method name.
    pub method: String,
    /// Parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

/// JSON-RPC response.
#[derive(Debug, Serialize)]
pub struct RpcResponse {
    /// JSON-RPC version.
    pub jsonrpc: String,
    /// Request ID.
    pub id: serde_json::Value,
    /// Result or error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC error object.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RpcError {
    /// Error code.
    pub code: i32,
    /// Error name.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl RpcResponse {
    /// Create a success response.
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: serde_json::Value, error: RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl RpcError {
    // Standard JSON-RPC errors

    /// Parse error (-32700).
    pub fn parse_error() -> Self {
        Self {
            code: -32700,
            message: "PARSE_ERROR".to_string(),
            data: None,
        }
    }

    /// Invalid request (-32600).
    pub fn invalid_request() -> Self {
        Self {
            code: -32600,
            message: "INVALID_REQUEST".to_string(),
            data: None,
        }
    }

    /// Method not found (-32601).
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "METHOD_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"method": method})),
        }
    }

    /// Invalid params (-32602).
    pub fn invalid_params(detail: &str) -> Self {
        Self {
            code: -32602,
            message: "INVALID_PARAMS".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    /// Internal error (-32603).
    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: -32603,
            message: "INTERNAL_ERROR".to_string(),
            data: Some(serde_json::json!({"detail": detail})),
        }
    }

    // Application errors

    /// Username already taken (-32020).
    pub fn username_exists(username: &str) -> Self {
        Self {
            code: -32020,
            message: "USERNAME_EXISTS".to_string(),
            data: Some(serde_json::json!({"username": username})),
        }
    }

    /// Login rejected (-32021). Deliberately carries no detail about
    /// whether the username or the password was wrong.
    pub fn invalid_credentials() -> Self {
        Self {
            code: -32021,
            message: "INVALID_CREDENTIALS".to_string(),
            data: None,
        }
    }

    /// No such user (-32022).
    pub fn user_not_found(username: &str) -> Self {
        Self {
            code: -32022,
            message: "USER_NOT_FOUND".to_string(),
            data: Some(serde_json::json!({"username": username})),
        }
    }

    /// Attempt to delete the admin account (-32023).
    pub fn protected_account() -> Self {
        Self {
            code: -32023,
            message: "PROTECTED_ACCOUNT".to_string(),
            data: None,
        }
    }

    /// Method needs a logged-in user (-32024).
    pub fn not_logged_in() -> Self {
        Self {
            code: -32024,
            message: "NOT_LOGGED_IN".to_string(),
            data: None,
        }
    }
}

impl From<AccountError> for RpcError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::Conflict(username) => Self::username_exists(&username),
            AccountError::InvalidCredentials => Self::invalid_credentials(),
            AccountError::NotFound(username) => Self::user_not_found(&username),
            AccountError::ProtectedAccount => Self::protected_account(),
            other => Self::internal_error(&other.to_string()),
        }
    }
}

/// The RPC server.
pub struct RpcServer {
    state: Arc<DaemonState>,
    socket_path: PathBuf,
}

impl RpcServer {
    /// Create a new RPC server.
    pub fn new(state: Arc<DaemonState>, socket_path: PathBuf) -> Self {
        Self { state, socket_path }
    }

    /// Run the server, accepting connections.
    pub async fn run(&self) -> anyhow::Result<()> {
        // Remove stale socket file
        let _ = std::fs::remove_file(&self.socket_path);

        let listener = UnixListener::bind(&self.socket_path)?;
        info!("IPC server listening on {:?}", self.socket_path);

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let state = self.state.clone();
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(state, stream).await {
                            warn!("Connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }
    }
}

/// Handle a single client connection.
async fn handle_connection(
    state: Arc<DaemonState>,
    stream: tokio::net::UnixStream,
) -> anyhow::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let response = match serde_json::from_str::<RpcRequest>(&line) {
            Ok(request) => dispatch_request(state.clone(), request).await,
            Err(_) => RpcResponse::error(serde_json::Value::Null, RpcError::parse_error()),
        };

        let mut response_json = serde_json::to_string(&response)?;
        response_json.push('\n');
        writer.write_all(response_json.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Dispatch a JSON-RPC request to the appropriate command handler.
async fn dispatch_request(state: Arc<DaemonState>, request: RpcRequest) -> RpcResponse {
    let id = request.id.clone();
    let method = request.method.as_str();

    if request.jsonrpc != "2.0" {
        return RpcResponse::error(id, RpcError::invalid_request());
    }

    debug!("Dispatching RPC method: {}", method);

    let result = match method {
        // Auth commands
        "register" => commands::auth::register(&state, &request.params).await,
        "login" => commands::auth::login(&state, &request.params).await,
        "logout" => commands::auth::logout(&state).await,

        // Profile commands
        "get_current_user_view" => commands::profile::get_current_user_view(&state).await,
        "update_bio" => commands::profile::update_bio(&state, &request.params).await,
        "regenerate_avatar" => commands::profile::regenerate_avatar(&state).await,

        // Admin commands
        "list_users" => commands::admin::list_users(&state).await,
        "create_user" => commands::admin::create_user(&state, &request.params).await,
        "update_user_password" => {
            commands::admin::update_user_password(&state, &request.params).await
        }
        "delete_user" => commands::admin::delete_user(&state, &request.params).await,

        // Lifecycle commands
        "run_migration" => commands::lifecycle::run_migration(&state).await,
        "get_start_route" => commands::lifecycle::get_start_route(&state).await,
        "get_session" => commands::lifecycle::get_session(&state).await,
        "complete_onboarding" => commands::lifecycle::complete_onboarding(&state).await,

        _ => Err(RpcError::method_not_found(method)),
    };

    match result {
        Ok(value) => RpcResponse::success(id, value),
        Err(err) => RpcResponse::error(id, err),
    }
}
