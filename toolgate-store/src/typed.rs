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

//! Typed configuration accessors.
//!
//! Executors never parse raw store strings inline; this layer centralizes
//! parsing, default substitution, and missing-key policy. A key with a
//! sensible executor-local default uses [`ToolConfig::f64_or`]; everything
//! else treats a missing key as a hard failure for that invocation.

use crate::{ConfigStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors from the typed accessor layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The key has no row in the store and no default applies.
    #[error("configuration key `{0}` is not set")]
    Missing(String),

    /// The stored value failed to parse as the requested type.
    #[error("configuration key `{key}` has invalid value `{value}`")]
    Invalid { key: String, value: String },

    /// The store itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Typed view over a [`ConfigStore`].
#[derive(Clone)]
pub struct ToolConfig {
    store: Arc<dyn ConfigStore>,
}

impl ToolConfig {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Required string value; missing key is a hard failure.
    pub async fn string(&self, key: &str) -> Result<String, ConfigError> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    /// Numeric value with a default for a missing key. An unparsable stored
    /// value is still a hard failure, not a silent default.
    pub async fn f64_or(&self, key: &str, default: f64) -> Result<f64, ConfigError> {
        match self.store.get(key).await? {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
            }),
        }
    }

    /// Required endpoint URL.
    pub async fn url(&self, key: &str) -> Result<String, ConfigError> {
        self.string(key).await
    }

    /// Required URL template with one `{}` substitution slot.
    pub async fn url_template(&self, key: &str) -> Result<UrlTemplate, ConfigError> {
        Ok(UrlTemplate(self.string(key).await?))
    }
}

/// A URL with a single positional substitution slot.
#[derive(Debug, Clone)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Substitute the slot with `value`.
    pub fn render(&self, value: &str) -> String {
        self.0.replacen("{}", value, 1)
    }
}
