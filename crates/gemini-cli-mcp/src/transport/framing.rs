//! Message framing for newline-delimited JSON.

use serde_json::Value;

use crate::types::{JsonRpcMessage, McpError, McpResult, RequestId};

/// Parse a single line of text as a JSON-RPC message.
pub fn parse_message(line: &str) -> McpResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Recover the `id` of a line that failed [`parse_message`].
///
/// Only succeeds when the line is valid JSON with a legal id; text that is
/// not JSON at all has no recoverable id.
pub fn recover_id(line: &str) -> Option<RequestId> {
    let value: Value = serde_json::from_str(line.trim()).ok()?;
    value.get("id").and_then(RequestId::from_value)
}

/// Serialize a value to a JSON line (with trailing newline).
pub fn frame_message(value: &Value) -> McpResult<String> {
    let mut json = serde_json::to_string(value).map_err(McpError::Json)?;
    json.push('\n');
    Ok(json)
}
