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

//! Toolgate server: a tool-invocation gateway for an LLM agent.
//!
//! Receives JSON-RPC-shaped requests over HTTP, resolves tools against a
//! registry sourced from a SQLite config store, executes them, and returns
//! standardized result text.

pub mod config;
pub mod mcp;
pub mod telemetry;
pub mod tools;

use anyhow::Result;
use config::ServerConfig;
use mcp::{McpHandler, McpServer};
use std::net::SocketAddr;
use std::sync::Arc;
use telemetry::InteractionLogger;
use tools::{ExecutorContext, ExecutorRegistry};
use toolgate_store::{ConfigStore, SqliteConfigStore, ToolConfig};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub async fn run_server(config: ServerConfig) -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "toolgate_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Toolgate gateway");
    config.validate()?;

    // Open the config store. Create-if-missing mirrors the store's own
    // semantics: a missing database behaves as an empty registry.
    tracing::info!("Opening config store at: {:?}", config.store.path);
    let store: Arc<dyn ConfigStore> =
        Arc::new(SqliteConfigStore::connect(&config.store.path).await?);

    let ctx = ExecutorContext::new(ToolConfig::new(store.clone()));
    let handler = Arc::new(McpHandler::new(store, ExecutorRegistry::builtin(), ctx));

    let logger = Arc::new(InteractionLogger::new(&config.telemetry));
    match &config.telemetry.tracking_uri {
        Some(uri) => tracing::info!("Telemetry sink: {uri}"),
        None => tracing::info!("Telemetry disabled (no tracking_uri configured)"),
    }

    let app = McpServer::new(handler, logger)
        .router()
        .layer(if config.server.enable_cors {
            if config.server.cors_origins.is_empty() {
                tracing::warn!(
                    "CORS: Allowing all origins (development mode). Set cors_origins in production!"
                );
            } else {
                tracing::info!("CORS: Allowing origins: {:?}", config.server.cors_origins);
            }
            // Origin allow-listing is not implemented; the frontend is
            // served same-host in production deployments.
            CorsLayer::new()
                .allow_methods(Any)
                .allow_headers(Any)
                .allow_origin(Any)
        } else {
            CorsLayer::new()
        })
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server.listen_addr.parse()?;
    tracing::info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
