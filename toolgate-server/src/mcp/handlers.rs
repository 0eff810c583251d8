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

//! JSON-RPC request handlers.

use crate::tools::{ExecutorContext, ExecutorRegistry};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use toolgate_core::{
    CallToolParams, CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult,
};
use toolgate_store::ConfigStore;
use tracing::{info, warn};

/// Registry name advertised in `tools/list` responses.
pub const REGISTRY_NAME: &str = "TimeWeatherServer";

/// Request handler: the dispatch router of the gateway.
pub struct McpHandler {
    store: Arc<dyn ConfigStore>,
    executors: ExecutorRegistry,
    ctx: ExecutorContext,
}

impl McpHandler {
    /// Create a new handler.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        executors: ExecutorRegistry,
        ctx: ExecutorContext,
    ) -> Self {
        Self {
            store,
            executors,
            ctx,
        }
    }

    /// Handle a JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!(method = %request.method, "MCP request received");

        match request.method.as_str() {
            "tools/list" => self.handle_tools_list(request.id).await,
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => {
                warn!(method = %request.method, "Unknown MCP method");
                JsonRpcResponse::error(request.id, JsonRpcError::method_not_found())
            }
        }
    }

    /// Handle `tools/list`.
    ///
    /// Never errors: an empty or unreachable config store yields an empty
    /// registry, not an error envelope.
    async fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = match self.store.tools().await {
            Ok(tools) => tools,
            Err(err) => {
                warn!(error = %err, "config store unavailable, serving empty tool list");
                Vec::new()
            }
        };
        let configs = match self.store.entries().await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "config store unavailable, serving empty config snapshot");
                BTreeMap::new()
            }
        };

        let result = ListToolsResult {
            tools,
            name: REGISTRY_NAME.to_string(),
            configs,
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap())
    }

    /// Handle `tools/call`.
    ///
    /// Missing or malformed params degrade to an empty tool name, which the
    /// registry soft-fails as "Tool not found" result text.
    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let text = self
            .executors
            .run(&params.name, &params.arguments, &self.ctx)
            .await;

        JsonRpcResponse::success(id, serde_json::to_value(CallToolResult::text(text)).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use toolgate_core::ToolDescriptor;
    use toolgate_store::{MemoryConfigStore, ToolConfig};

    fn handler_with_store(store: Arc<MemoryConfigStore>) -> McpHandler {
        let config = ToolConfig::new(store.clone() as Arc<dyn ConfigStore>);
        McpHandler::new(store, ExecutorRegistry::builtin(), ExecutorContext::new(config))
    }

    fn handler() -> McpHandler {
        handler_with_store(Arc::new(MemoryConfigStore::new()))
    }

    fn request(method: &str, params: Value, id: Value) -> JsonRpcRequest {
        serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn unknown_method_is_a_protocol_error() {
        let response = handler()
            .handle_request(request("foo/bar", json!({}), json!(3)))
            .await;

        assert!(response.result.is_none());
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found");
        assert_eq!(response.id, json!(3));
    }

    #[tokio::test]
    async fn unknown_tool_is_result_text_not_an_error() {
        let response = handler()
            .handle_request(request(
                "tools/call",
                json!({ "name": "no_such_tool", "arguments": {} }),
                json!("req-1"),
            ))
            .await;

        assert!(response.error.is_none());
        assert_eq!(response.id, json!("req-1"));
        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "Tool not found");
    }

    #[tokio::test]
    async fn tools_call_echoes_null_id() {
        let req: JsonRpcRequest = serde_json::from_value(json!({
            "method": "tools/call",
            "params": { "name": "currency_calculator",
                        "arguments": { "amount": 2, "rate": 1500, "label": "IDR" } },
        }))
        .unwrap();

        let response = handler().handle_request(req).await;
        assert_eq!(response.id, Value::Null);
        let result = response.result.unwrap();
        assert_eq!(
            result["content"][0]["text"],
            "2.0000 x 1500.0000 = 3,000.00 IDR"
        );
    }

    #[tokio::test]
    async fn tools_call_tolerates_missing_params() {
        let response = handler()
            .handle_request(request("tools/call", Value::Null, json!(9)))
            .await;

        let result = response.result.unwrap();
        assert_eq!(result["content"][0]["text"], "Tool not found");
    }

    #[tokio::test]
    async fn tools_list_never_errors_on_empty_store() {
        let response = handler()
            .handle_request(request("tools/list", json!({}), json!(1)))
            .await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["tools"], json!([]));
        assert_eq!(result["name"], REGISTRY_NAME);
        assert_eq!(result["configs"], json!({}));
    }

    #[tokio::test]
    async fn tools_list_serves_descriptors_verbatim() {
        let store = Arc::new(MemoryConfigStore::new());
        store.set("model", "qwen2.5:1.5b");
        store.add_tool(ToolDescriptor {
            name: "get_weather".to_string(),
            description: "Get current weather for a city (simulations).".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": { "city": { "type": "string" } },
                "required": ["city"],
            }),
        });

        let response = handler_with_store(store)
            .handle_request(request("tools/list", json!({}), json!(2)))
            .await;

        let result = response.result.unwrap();
        assert_eq!(result["tools"][0]["name"], "get_weather");
        assert_eq!(result["tools"][0]["inputSchema"]["required"], json!(["city"]));
        assert_eq!(result["configs"]["model"], "qwen2.5:1.5b");
    }
}
