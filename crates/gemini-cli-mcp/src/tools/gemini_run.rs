//! Tool: gemini_run — Send a prompt to the Gemini CLI.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::{McpError, McpResult, ToolCallResult, ToolDefinition};

use super::runner::ToolRunner;

pub const NAME: &str = "gemini_run";

#[derive(Debug, Deserialize)]
struct RunParams {
    prompt: String,
}

pub fn definition() -> ToolDefinition {
    ToolDefinition {
        name: NAME.to_string(),
        description: "Run Gemini CLI".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "prompt": { "type": "string" }
            },
            "required": ["prompt"]
        }),
    }
}

pub async fn execute(args: Value, runner: &ToolRunner) -> McpResult<ToolCallResult> {
    let params: RunParams =
        serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))?;

    if params.prompt.trim().is_empty() {
        return Err(McpError::InvalidParams(
            "prompt must not be empty".to_string(),
        ));
    }

    let text = runner.run(&params.prompt).await?;
    Ok(ToolCallResult::text(text))
}
