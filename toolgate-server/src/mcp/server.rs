// Copyright 2025 Toolgate Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! HTTP transport for the gateway.

use crate::mcp::handlers::{McpHandler, REGISTRY_NAME};
use crate::telemetry::{InteractionLogger, InteractionRecord};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use toolgate_core::{JsonRpcRequest, JsonRpcResponse};

/// Shared gateway state.
#[derive(Clone)]
pub struct GatewayState {
    pub handler: Arc<McpHandler>,
    pub logger: Arc<InteractionLogger>,
}

/// The gateway HTTP server.
pub struct McpServer {
    state: GatewayState,
}

impl McpServer {
    /// Create a new server over the given handler and telemetry sink.
    pub fn new(handler: Arc<McpHandler>, logger: Arc<InteractionLogger>) -> Self {
        Self {
            state: GatewayState { handler, logger },
        }
    }

    /// Get the axum router for the gateway.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", post(handle_mcp_request))
            .route("/health", get(handle_health))
            .route("/log/chat", post(handle_log_chat))
            .with_state(self.state.clone())
    }
}

/// Handle a JSON-RPC request over HTTP POST.
async fn handle_mcp_request(
    State(state): State<GatewayState>,
    Json(request): Json<JsonRpcRequest>,
) -> Json<JsonRpcResponse> {
    let response = state.handler.handle_request(request).await;
    Json(response)
}

/// Health check (GET /health).
async fn handle_health() -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "server_name": REGISTRY_NAME,
        "server_version": env!("CARGO_PKG_VERSION"),
        "protocol": "jsonrpc-2.0",
    }))
}

/// Forward a chat interaction to the experiment-tracking sink
/// (POST /log/chat). Fire-and-forget: the reply does not wait on the sink.
async fn handle_log_chat(
    State(state): State<GatewayState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let field = |name: &str, default: &str| {
        body.get(name)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };

    state.logger.log(InteractionRecord {
        session_id: field("sessionId", "unknown"),
        model: field("model", "unknown"),
        input: field("input", ""),
        output: field("output", ""),
    });

    Json(serde_json::json!({
        "status": "success",
        "message": "Interaction logged",
    }))
}
