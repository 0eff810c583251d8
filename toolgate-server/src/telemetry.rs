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

//! Fire-and-forget forwarding to the experiment-tracking sink.
//!
//! Interactions are posted asynchronously; a slow or dead sink never delays
//! or fails a dispatch response. With no tracking URI configured the logger
//! is a no-op.

use crate::config::TelemetryConfig;
use chrono::Local;
use serde::Serialize;
use tracing::{debug, warn};

/// One logged interaction.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionRecord {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub model: String,
    pub input: String,
    pub output: String,
}

/// Client for the experiment-tracking sink.
pub struct InteractionLogger {
    http: reqwest::Client,
    tracking_uri: Option<String>,
    experiment: String,
}

impl InteractionLogger {
    /// Build from the telemetry config section.
    pub fn new(config: &TelemetryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            tracking_uri: config.tracking_uri.clone(),
            experiment: config.experiment.clone(),
        }
    }

    /// A logger that drops every record.
    pub fn disabled() -> Self {
        Self {
            http: reqwest::Client::new(),
            tracking_uri: None,
            experiment: String::new(),
        }
    }

    /// Forward an interaction to the sink without awaiting the outcome.
    pub fn log(&self, record: InteractionRecord) {
        let Some(uri) = self.tracking_uri.clone() else {
            debug!("telemetry disabled, dropping interaction record");
            return;
        };

        let run_name = format!(
            "Chat_{}_{}",
            record.session_id,
            Local::now().format("%Y%m%d_%H%M%S")
        );
        let payload = serde_json::json!({
            "experiment": self.experiment,
            "runName": run_name,
            "tags": { "type": "llm_interaction" },
            "sessionId": record.session_id,
            "model": record.model,
            "input": record.input,
            "output": record.output,
        });

        let http = self.http.clone();
        tokio::spawn(async move {
            if let Err(err) = http.post(format!("{uri}/log")).json(&payload).send().await {
                warn!(error = %err, "failed to forward interaction to tracking sink");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_logger_drops_records_without_a_runtime() {
        // No tokio::spawn happens on the disabled path, so this is safe in
        // a plain test.
        let logger = InteractionLogger::disabled();
        logger.log(InteractionRecord {
            session_id: "s1".to_string(),
            model: "qwen2.5:1.5b".to_string(),
            input: "hi".to_string(),
            output: "hello".to_string(),
        });
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = InteractionRecord {
            session_id: "abc".to_string(),
            model: "m".to_string(),
            input: "i".to_string(),
            output: "o".to_string(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["sessionId"], "abc");
        assert!(value.get("session_id").is_none());
    }
}
