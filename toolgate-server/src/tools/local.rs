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

//! Local deterministic tools: the weather simulation and canned search.
//!
//! Neither issues an outbound call. Missing arguments substitute a
//! placeholder default instead of erroring.

use super::{ExecutorContext, ToolError, ToolExecutor};
use async_trait::async_trait;
use serde_json::{Map, Value};

const CONDITIONS: [&str; 5] = ["Sunny", "Cloudy", "Partly Cloudy", "Rainy", "Light Breeze"];

/// `get_weather` — deterministic pseudo-weather derived from the city name
/// length. Explicitly a simulation, not a real data source.
pub struct Weather;

#[async_trait]
impl ToolExecutor for Weather {
    fn name(&self) -> &'static str {
        "get_weather"
    }

    async fn execute(
        &self,
        arguments: &Map<String, Value>,
        _ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let city = arguments
            .get("city")
            .and_then(Value::as_str)
            .unwrap_or("Unknown City");

        let len = city.chars().count();
        let temp = (len * 3) % 15 + 15;
        let conditions = CONDITIONS[len % CONDITIONS.len()];
        let humidity = (len * 7) % 40 + 40;

        Ok(format!(
            "Current weather in {city}: {conditions}, {temp}\u{b0}C, Humidity: {humidity}%."
        ))
    }
}

/// `web_search` — naive substring-matched canned responses.
pub struct WebSearch;

#[async_trait]
impl ToolExecutor for WebSearch {
    fn name(&self) -> &'static str {
        "web_search"
    }

    async fn execute(
        &self,
        arguments: &Map<String, Value>,
        _ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let query = arguments.get("query").and_then(Value::as_str).unwrap_or("");
        let lowered = query.to_lowercase();

        let result = if lowered.contains("ollama") {
            "Ollama is an open-source tool that allows you to run open-source large language models locally.".to_string()
        } else if lowered.contains("weather") {
            "Latest weather news: Unusual warm front moving across the northern hemisphere."
                .to_string()
        } else {
            format!(
                "Search results for '{query}': Found 3 highly relevant articles discussing {query} in modern contexts."
            )
        };

        Ok(result)
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
    async fn weather_is_deterministic_for_a_city() {
        let arguments = args(&[("city", json!("Jakarta"))]);
        let first = Weather.execute(&arguments, &ctx()).await.unwrap();
        let second = Weather.execute(&arguments, &ctx()).await.unwrap();
        assert_eq!(first, second);
        // "Jakarta" has 7 chars: temp (7*3)%15+15 = 21, condition idx 2,
        // humidity (7*7)%40+40 = 49.
        assert_eq!(
            first,
            "Current weather in Jakarta: Partly Cloudy, 21\u{b0}C, Humidity: 49%."
        );
    }

    #[tokio::test]
    async fn weather_defaults_missing_city() {
        let text = Weather.execute(&Map::new(), &ctx()).await.unwrap();
        assert!(text.starts_with("Current weather in Unknown City: "));
    }

    #[tokio::test]
    async fn web_search_matches_canned_topics() {
        let text = WebSearch
            .execute(&args(&[("query", json!("what is Ollama?"))]), &ctx())
            .await
            .unwrap();
        assert!(text.starts_with("Ollama is an open-source tool"));

        let text = WebSearch
            .execute(&args(&[("query", json!("weather today"))]), &ctx())
            .await
            .unwrap();
        assert!(text.starts_with("Latest weather news:"));

        let text = WebSearch
            .execute(&args(&[("query", json!("rust async"))]), &ctx())
            .await
            .unwrap();
        assert_eq!(
            text,
            "Search results for 'rust async': Found 3 highly relevant articles discussing rust async in modern contexts."
        );
    }
}
