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

//! Local clock tools.

use super::{ExecutorContext, ToolError, ToolExecutor};
use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};

/// `get_current_time` — local date and time.
pub struct CurrentTime;

#[async_trait]
impl ToolExecutor for CurrentTime {
    fn name(&self) -> &'static str {
        "get_current_time"
    }

    async fn execute(
        &self,
        _arguments: &Map<String, Value>,
        _ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let now = Local::now();
        Ok(format!(
            "The current local date and time is: {}",
            now.format("%A, %B %d, %Y %H:%M:%S")
        ))
    }
}

/// `get_current_date` — local calendar date.
pub struct CurrentDate;

#[async_trait]
impl ToolExecutor for CurrentDate {
    fn name(&self) -> &'static str {
        "get_current_date"
    }

    async fn execute(
        &self,
        _arguments: &Map<String, Value>,
        _ctx: &ExecutorContext,
    ) -> Result<String, ToolError> {
        let now = Local::now();
        Ok(format!("Today is {}", now.format("%B %d, %Y")))
    }
}
