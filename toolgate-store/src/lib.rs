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

//! Config store boundary for the Toolgate gateway.
//!
//! The gateway holds no compiled-in tool descriptors or endpoint URLs; both
//! live in an external key-value store queried at request time, with no
//! caching. This crate provides:
//!
//! - [`ConfigStore`]: the read-only store trait,
//! - [`SqliteConfigStore`]: the SQLite-backed production implementation,
//! - [`MemoryConfigStore`]: an in-memory fake for tests,
//! - [`ToolConfig`]: the typed accessor layer executors read through.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod typed;

pub use error::{Result, StoreError};
pub use memory::MemoryConfigStore;
pub use sqlite::SqliteConfigStore;
pub use typed::{ConfigError, ToolConfig, UrlTemplate};

use async_trait::async_trait;
use std::collections::BTreeMap;
use toolgate_core::ToolDescriptor;

/// Read-only access to the external configuration store.
///
/// Implementations query on demand; the gateway never writes through this
/// interface and never caches results, so a store row added at runtime is
/// visible to the next request.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Look up a single configuration value by key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// List every tool descriptor currently in the store.
    async fn tools(&self) -> Result<Vec<ToolDescriptor>>;

    /// Snapshot of all key-value pairs, for caller introspection.
    async fn entries(&self) -> Result<BTreeMap<String, String>>;
}
