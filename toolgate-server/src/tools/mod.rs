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

//! Tool executors and their registry.
//!
//! Each executor implements one tool: a fallible async function from
//! (arguments, live configuration) to a single human-readable text result.
//! [`ExecutorRegistry::run`] is the uniform soft-fail boundary: an unknown
//! tool name and any executor failure both come back as ordinary result
//! text, never as an RPC-level error.
//!
//! Adding a tool is a registration in [`ExecutorRegistry::builtin`] plus a
//! descriptor row in the config store; dispatch code does not change.

pub mod calculator;
pub mod clock;
pub mod local;
pub mod market;
pub mod network;

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use toolgate_store::ToolConfig;
use tracing::warn;

/// Result text for an unregistered tool name. A soft-fail by design: the
/// calling agent's zero-hallucination contract expects text, not an error.
pub const TOOL_NOT_FOUND: &str = "Tool not found";

/// Executor failure, rendered verbatim as the user-facing result text.
///
/// The `Display` strings are the contract: rate limiting and incomplete
/// payloads each get a distinguished message, distinct from the catch-all
/// transport template.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The remote service signalled rate limiting.
    #[error("{context}: Rate limited by {service}. Please try again in a minute.")]
    RateLimited {
        context: &'static str,
        service: &'static str,
    },

    /// The remote payload was missing an expected field.
    #[error("{context}: API returned incomplete data.")]
    IncompleteData { context: &'static str },

    /// Transport, configuration, or argument failure.
    #[error("{context}: {detail}")]
    Upstream {
        context: &'static str,
        detail: String,
    },

    /// The remote call succeeded transport-wise but reported a logical
    /// failure for the looked-up key.
    #[error("Could not retrieve details for {subject}: {message}")]
    LookupFailed { subject: String, message: String },
}

impl ToolError {
    /// Catch-all failure with the executor's message prefix.
    pub fn upstream(context: &'static str, detail: impl ToString) -> Self {
        Self::Upstream {
            context,
            detail: detail.to_string(),
        }
    }
}

/// Shared per-invocation environment handed to executors.
#[derive(Clone)]
pub struct ExecutorContext {
    /// Outbound HTTP client. No explicit timeout is configured beyond the
    /// client's defaults; remote calls run to completion or failure.
    pub http: reqwest::Client,
    /// Typed access to the live config store.
    pub config: ToolConfig,
}

impl ExecutorContext {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

/// Trait implemented by tool executors.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Stable name matching the descriptor row in the config store.
    fn name(&self) -> &'static str;

    /// Run the tool against the given arguments.
    async fn execute(
        &self,
        arguments: &Map<String, Value>,
        ctx: &ExecutorContext,
    ) -> Result<String, ToolError>;
}

/// Name→executor table.
#[derive(Default)]
pub struct ExecutorRegistry {
    executors: HashMap<&'static str, Arc<dyn ToolExecutor>>,
}

impl ExecutorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every compiled-in executor.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(clock::CurrentTime));
        registry.register(Arc::new(clock::CurrentDate));
        registry.register(Arc::new(local::Weather));
        registry.register(Arc::new(local::WebSearch));
        registry.register(Arc::new(network::GetIp));
        registry.register(Arc::new(network::IspDetails));
        registry.register(Arc::new(market::UsdIdrRate));
        registry.register(Arc::new(market::GoldBtcPrices));
        registry.register(Arc::new(calculator::CurrencyCalculator));
        registry
    }

    /// Register an executor under its own name.
    pub fn register(&mut self, executor: Arc<dyn ToolExecutor>) {
        self.executors.insert(executor.name(), executor);
    }

    /// Look up an executor by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolExecutor>> {
        self.executors.get(name).cloned()
    }

    /// Run a tool through the soft-fail boundary.
    ///
    /// Unknown names yield [`TOOL_NOT_FOUND`]; executor errors are rendered
    /// to their message text. Nothing escapes to the protocol layer.
    pub async fn run(
        &self,
        name: &str,
        arguments: &Map<String, Value>,
        ctx: &ExecutorContext,
    ) -> String {
        let Some(executor) = self.get(name) else {
            warn!(tool = name, "tool not registered");
            return TOOL_NOT_FOUND.to_string();
        };

        match executor.execute(arguments, ctx).await {
            Ok(text) => text,
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution failed");
                err.to_string()
            }
        }
    }
}

/// Format `value` with `decimals` fraction digits and thousands-grouped
/// integer digits, e.g. `3,000.00`.
pub(crate) fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.char_indices() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use toolgate_store::MemoryConfigStore;

    fn ctx() -> ExecutorContext {
        ExecutorContext::new(ToolConfig::new(Arc::new(MemoryConfigStore::new())))
    }

    #[test]
    fn thousands_groups_integer_digits() {
        assert_eq!(thousands(3000.0, 2), "3,000.00");
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(999.5, 2), "999.50");
        assert_eq!(thousands(0.0, 2), "0.00");
        assert_eq!(thousands(-16500.0, 2), "-16,500.00");
        assert_eq!(thousands(42.0, 0), "42");
    }

    #[tokio::test]
    async fn unknown_tool_soft_fails() {
        let registry = ExecutorRegistry::builtin();
        let result = registry.run("definitely_not_a_tool", &Map::new(), &ctx()).await;
        assert_eq!(result, TOOL_NOT_FOUND);
    }

    #[test]
    fn rate_limit_message_is_distinct_from_transport_template() {
        let rate_limited = ToolError::RateLimited {
            context: "Failed to fetch market prices",
            service: "CoinGecko",
        };
        let transport =
            ToolError::upstream("Failed to fetch market prices", "connection refused");

        assert_eq!(
            rate_limited.to_string(),
            "Failed to fetch market prices: Rate limited by CoinGecko. Please try again in a minute."
        );
        assert_eq!(
            transport.to_string(),
            "Failed to fetch market prices: connection refused"
        );
        assert_ne!(rate_limited.to_string(), transport.to_string());
    }

    #[test]
    fn incomplete_data_message_names_the_condition() {
        let err = ToolError::IncompleteData {
            context: "Failed to fetch exchange rate",
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch exchange rate: API returned incomplete data."
        );
    }

    #[test]
    fn builtin_registry_covers_all_nine_tools() {
        let registry = ExecutorRegistry::builtin();
        for name in [
            "get_current_time",
            "get_current_date",
            "get_weather",
            "web_search",
            "get_ip",
            "get_isp_details",
            "get_usd_idr_rate",
            "get_gold_btc_prices",
            "currency_calculator",
        ] {
            assert!(registry.get(name).is_some(), "missing executor: {name}");
        }
    }
}
