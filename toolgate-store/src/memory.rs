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

//! In-memory config store, used as the swappable fake in tests.

use crate::{ConfigStore, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;
use toolgate_core::ToolDescriptor;

/// In-memory [`ConfigStore`] implementation.
#[derive(Default)]
pub struct MemoryConfigStore {
    configs: RwLock<BTreeMap<String, String>>,
    tools: RwLock<Vec<ToolDescriptor>>,
}

impl MemoryConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.configs
            .write()
            .expect("config store poisoned")
            .insert(key.into(), value.into());
    }

    /// Add a tool descriptor.
    pub fn add_tool(&self, descriptor: ToolDescriptor) {
        self.tools
            .write()
            .expect("config store poisoned")
            .push(descriptor);
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .configs
            .read()
            .expect("config store poisoned")
            .get(key)
            .cloned())
    }

    async fn tools(&self) -> Result<Vec<ToolDescriptor>> {
        Ok(self.tools.read().expect("config store poisoned").clone())
    }

    async fn entries(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.configs.read().expect("config store poisoned").clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn round_trips_configs_and_tools() {
        let store = MemoryConfigStore::new();
        store.set("model", "qwen2.5:1.5b");
        store.add_tool(ToolDescriptor {
            name: "get_weather".to_string(),
            description: "Get current weather for a city (simulations).".to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        });

        assert_eq!(
            store.get("model").await.unwrap().as_deref(),
            Some("qwen2.5:1.5b")
        );
        assert_eq!(store.tools().await.unwrap().len(), 1);
        assert_eq!(store.entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_store_returns_empty_collections() {
        let store = MemoryConfigStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
        assert!(store.tools().await.unwrap().is_empty());
        assert!(store.entries().await.unwrap().is_empty());
    }
}
