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

//! Remote-backed market data tools.

use super::{thousands, ExecutorContext, ToolError, ToolExecutor};
use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};

/// Troy ounce to gram, used when `gold_conversion_factor` is not configured.
const DEFAULT_GOLD_FACTOR: f64 = 31.103_476_8;

/// `get_usd_idr_rate` — USD→IDR spot rate from the configured endpoint.
pub struct UsdIdrRate;

const RATE_CONTEXT: &str = "Failed to fetch exchange rate";

#[async_trait]
impl ToolExecutor for UsdIdrRate {
    fn name(&self) -> &'static str {
        "get_usd_idr_rate"
    }

    async fn execute(
        &self,
        _arguments: &Map<String, Value>,
        ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let url = ctx
            .config
            .url("exchange_rate_url")
            .await
            .map_err(|e| ToolError::upstream(RATE_CONTEXT, e))?;

        let payload: Value = ctx
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::upstream(RATE_CONTEXT, e))?
            .json()
            .await
            .map_err(|e| ToolError::upstream(RATE_CONTEXT, e))?;

        let rate = payload["rates"]["IDR"]
            .as_f64()
            .ok_or(ToolError::IncompleteData {
                context: RATE_CONTEXT,
            })?;

        Ok(format!(
            "The current USD to IDR exchange rate is: {} IDR",
            thousands(rate, 2)
        ))
    }
}

/// `get_gold_btc_prices` — Bitcoin and gold spot prices.
///
/// The upstream quotes gold per troy ounce; the per-gram figure is derived
/// with the configured conversion factor. The provider rate-limits
/// aggressively, so HTTP 429 gets its own message.
pub struct GoldBtcPrices;

const MARKET_CONTEXT: &str = "Failed to fetch market prices";

#[async_trait]
impl ToolExecutor for GoldBtcPrices {
    fn name(&self) -> &'static str {
        "get_gold_btc_prices"
    }

    async fn execute(
        &self,
        _arguments: &Map<String, Value>,
        ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let url = ctx
            .config
            .url("market_price_url")
            .await
            .map_err(|e| ToolError::upstream(MARKET_CONTEXT, e))?;
        let factor = ctx
            .config
            .f64_or("gold_conversion_factor", DEFAULT_GOLD_FACTOR)
            .await
            .map_err(|e| ToolError::upstream(MARKET_CONTEXT, e))?;

        let response = ctx
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::upstream(MARKET_CONTEXT, e))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ToolError::RateLimited {
                context: MARKET_CONTEXT,
                service: "CoinGecko",
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| ToolError::upstream(MARKET_CONTEXT, e))?;

        let btc_price = payload["bitcoin"]["usd"].as_f64();
        let gold_price_oz = payload["pax-gold"]["usd"].as_f64();
        let (Some(btc_price), Some(gold_price_oz)) = (btc_price, gold_price_oz) else {
            return Err(ToolError::IncompleteData {
                context: MARKET_CONTEXT,
            });
        };

        let gold_price_gram = gold_price_oz / factor;

        Ok(format!(
            "Market Update ({}):\n- Bitcoin (BTC): ${} USD\n- Gold (Spot): ${} USD per gram (derived from ${}/oz spot price)",
            Local::now().format("%H:%M"),
            thousands(btc_price, 2),
            thousands(gold_price_gram, 2),
            thousands(gold_price_oz, 2),
        ))
    }
}
