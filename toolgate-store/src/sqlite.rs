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

//! SQLite-backed config store.
//!
//! Schema (owned by the external provisioning step, not this crate):
//!
//! ```sql
//! CREATE TABLE configs (key TEXT PRIMARY KEY, value TEXT);
//! CREATE TABLE tools (name TEXT PRIMARY KEY, description TEXT, input_schema TEXT);
//! ```
//!
//! The store opens with create-if-missing so a missing database file behaves
//! like an empty store at the query level: queries against absent tables
//! return [`StoreError::Database`], which callers downgrade to empty results.

use crate::{ConfigStore, Result, StoreError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::BTreeMap;
use std::path::Path;
use toolgate_core::ToolDescriptor;

/// Config store reading from a SQLite database file.
#[derive(Clone)]
pub struct SqliteConfigStore {
    pool: SqlitePool,
}

impl SqliteConfigStore {
    /// Open the database at `path`.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .read_only(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Build a store from an existing pool (tests).
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigStore for SqliteConfigStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM configs WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get(0)))
    }

    async fn tools(&self) -> Result<Vec<ToolDescriptor>> {
        let rows = sqlx::query("SELECT name, description, input_schema FROM tools")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| {
                let name: String = row.get(0);
                let description: String = row.get(1);
                let raw_schema: String = row.get(2);
                let input_schema = serde_json::from_str(&raw_schema)
                    .map_err(|source| StoreError::Schema {
                        name: name.clone(),
                        source,
                    })?;

                Ok(ToolDescriptor {
                    name,
                    description,
                    input_schema,
                })
            })
            .collect()
    }

    async fn entries(&self) -> Result<BTreeMap<String, String>> {
        let rows = sqlx::query("SELECT key, value FROM configs")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.get(0), row.get(1)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_store() -> SqliteConfigStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query("CREATE TABLE configs (key TEXT PRIMARY KEY, value TEXT)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE tools (name TEXT PRIMARY KEY, description TEXT, input_schema TEXT)",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query("INSERT INTO configs (key, value) VALUES (?, ?)")
            .bind("ip_api_url")
            .bind("https://api.ipify.org/?format=json")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO tools (name, description, input_schema) VALUES (?, ?, ?)")
            .bind("get_ip")
            .bind("Get the IP address of the user.")
            .bind(r#"{"type": "object", "properties": {}}"#)
            .execute(&pool)
            .await
            .unwrap();

        SqliteConfigStore::from_pool(pool)
    }

    #[tokio::test]
    async fn get_returns_seeded_value() {
        let store = seeded_store().await;
        let value = store.get("ip_api_url").await.unwrap();
        assert_eq!(value.as_deref(), Some("https://api.ipify.org/?format=json"));
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tools_parses_schema_column() {
        let store = seeded_store().await;
        let tools = store.tools().await.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "get_ip");
        assert_eq!(tools[0].input_schema["type"], "object");
    }

    #[tokio::test]
    async fn entries_snapshots_all_configs() {
        let store = seeded_store().await;
        let entries = store.entries().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("ip_api_url"));
    }

    #[tokio::test]
    async fn connect_creates_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mcp_config.db");

        let store = SqliteConfigStore::connect(&path).await.unwrap();
        assert!(path.exists());
        // A freshly created file has no tables yet.
        assert!(store.get("anything").await.is_err());
    }

    #[tokio::test]
    async fn missing_tables_error_rather_than_panic() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = SqliteConfigStore::from_pool(pool);

        assert!(store.tools().await.is_err());
        assert!(store.entries().await.is_err());
    }
}
