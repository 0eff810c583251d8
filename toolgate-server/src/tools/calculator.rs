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

//! The derived-value arithmetic tool.
//!
//! This is the only place in-band arithmetic is permitted: every numeric
//! combination of remote-fetched values is funneled through this one
//! auditable operation instead of ad hoc math in callers.

use super::{thousands, ExecutorContext, ToolError, ToolExecutor};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// `currency_calculator` — amount × rate with an optional unit label.
///
/// Missing or non-numeric operands default to 0 and a missing label to
/// "units"; this leniency is deliberately looser than the descriptor's
/// required-field schema, matching observed behavior.
pub struct CurrencyCalculator;

#[async_trait]
impl ToolExecutor for CurrencyCalculator {
    fn name(&self) -> &'static str {
        "currency_calculator"
    }

    async fn execute(
        &self,
        arguments: &Map<String, Value>,
        _ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let amount = arguments
            .get("amount")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let rate = arguments.get("rate").and_then(Value::as_f64).unwrap_or(0.0);
        let label = arguments
            .get("label")
            .and_then(Value::as_str)
            .unwrap_or("units");

        let total = amount * rate;

        // 4-decimal ungrouped operands, 2-decimal grouped product.
        Ok(format!(
            "{amount:.4} x {rate:.4} = {} {label}",
            thousands(total, 2)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use toolgate_store::{MemoryConfigStore, ToolConfig};

    fn ctx() -> ExecutorContext {
        ExecutorContext::new(ToolConfig::new(Arc::new(MemoryConfigStore::new())))
    }

    fn args(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn renders_exact_format() {
        let arguments = args(&[
            ("amount", json!(2)),
            ("rate", json!(1500)),
            ("label", json!("IDR")),
        ]);
        let text = CurrencyCalculator
            .execute(&arguments, &ctx())
            .await
            .unwrap();
        assert_eq!(text, "2.0000 x 1500.0000 = 3,000.00 IDR");
    }

    #[tokio::test]
    async fn defaults_missing_operands_to_zero() {
        let text = CurrencyCalculator
            .execute(&Map::new(), &ctx())
            .await
            .unwrap();
        assert_eq!(text, "0.0000 x 0.0000 = 0.00 units");
    }

    #[tokio::test]
    async fn handles_fractional_operands() {
        let arguments = args(&[
            ("amount", json!(103.75)),
            ("rate", json!(16250.5)),
            ("label", json!("IDR")),
        ]);
        let text = CurrencyCalculator
            .execute(&arguments, &ctx())
            .await
            .unwrap();
        assert_eq!(text, "103.7500 x 16250.5000 = 1,685,989.38 IDR");
    }
}
