//! Tool registration and dispatch.

use serde_json::Value;

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::gemini_run;
use super::runner::ToolRunner;

pub struct ToolRegistry;

impl ToolRegistry {
    pub fn list_tools() -> Vec<ToolDefinition> {
        vec![gemini_run::definition()]
    }

    pub async fn call(
        name: &str,
        arguments: Option<Value>,
        runner: &ToolRunner,
    ) -> McpResult<ToolCallResult> {
        let args = arguments.unwrap_or(Value::Object(serde_json::Map::new()));

        match name {
            gemini_run::NAME => gemini_run::execute(args, runner).await,
            _ => Err(McpError::ToolNotFound(name.to_string())),
        }
    }
}
