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

//! Remote-backed network lookup tools.

use super::{ExecutorContext, ToolError, ToolExecutor};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// `get_ip` — public IP lookup via the configured `ip_api_url` endpoint.
pub struct GetIp;

const IP_CONTEXT: &str = "Failed to get IP address";

#[async_trait]
impl ToolExecutor for GetIp {
    fn name(&self) -> &'static str {
        "get_ip"
    }

    async fn execute(
        &self,
        _arguments: &Map<String, Value>,
        ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let url = ctx
            .config
            .url("ip_api_url")
            .await
            .map_err(|e| ToolError::upstream(IP_CONTEXT, e))?;

        let payload: Value = ctx
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ToolError::upstream(IP_CONTEXT, e))?
            .json()
            .await
            .map_err(|e| ToolError::upstream(IP_CONTEXT, e))?;

        let ip = payload
            .get("ip")
            .and_then(Value::as_str)
            .ok_or(ToolError::IncompleteData {
                context: IP_CONTEXT,
            })?;

        Ok(format!("The IP address of the user is: {ip}"))
    }
}

/// `get_isp_details` — ISP lookup by IP via the `isp_api_url` template.
///
/// The remote API signals logical failure in-band (`status == "fail"`),
/// which is surfaced distinctly from transport failures.
pub struct IspDetails;

const ISP_CONTEXT: &str = "Error calling ISP lookup API";

#[async_trait]
impl ToolExecutor for IspDetails {
    fn name(&self) -> &'static str {
        "get_isp_details"
    }

    async fn execute(
        &self,
        arguments: &Map<String, Value>,
        ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let ip = arguments
            .get("ip")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::upstream(ISP_CONTEXT, "missing required argument `ip`"))?;

        let template = ctx
            .config
            .url_template("isp_api_url")
            .await
            .map_err(|e| ToolError::upstream(ISP_CONTEXT, e))?;

        let payload: Value = ctx
            .http
            .get(template.render(ip))
            .send()
            .await
            .map_err(|e| ToolError::upstream(ISP_CONTEXT, e))?
            .json()
            .await
            .map_err(|e| ToolError::upstream(ISP_CONTEXT, e))?;

        if payload.get("status").and_then(Value::as_str) == Some("fail") {
            let message = payload
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error");
            return Err(ToolError::LookupFailed {
                subject: ip.to_string(),
                message: message.to_string(),
            });
        }

        let field = |name: &'static str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .ok_or(ToolError::IncompleteData {
                    context: ISP_CONTEXT,
                })
        };

        let query = field("query")?;
        let isp = field("isp")?;
        let org = field("org")?;
        let city = field("city")?;
        let country = field("country")?;

        Ok(format!(
            "ISP Details for {query}: {isp} ({org}) located in {city}, {country}."
        ))
    }
}
