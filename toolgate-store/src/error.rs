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

//! Store error types.

use thiserror::Error;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by config store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure (unreachable file, missing table, ...).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored tool descriptor carried an unparsable input schema.
    #[error("invalid input schema for tool `{name}`: {source}")]
    Schema {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}
