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

//! MCP-style JSON-RPC dispatch layer.
//!
//! A single stateless request-response dispatcher: parse the envelope,
//! route `tools/list` to the registry resolver and `tools/call` to the
//! matching executor, and wrap the outcome in a response envelope carrying
//! the original request identifier. Tool failures surface as result text;
//! only an unknown method is a protocol-level error.

pub mod handlers;
pub mod server;

pub use handlers::{McpHandler, REGISTRY_NAME};
pub use server::{GatewayState, McpServer};
