//! Typed decoding of inbound requests.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::capabilities::InitializeParams;
use super::error::{McpError, McpResult};
use super::message::{JsonRpcRequest, JSONRPC_VERSION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Value>,
}

/// A request after its method has been resolved and its params checked.
#[derive(Debug, Clone)]
pub enum ClientRequest {
    /// `initialize`. Params that fail to decode are tolerated and become `None`.
    Initialize(Option<InitializeParams>),
    ToolsList,
    ToolsCall(ToolCallParams),
    Unknown(String),
}

impl ClientRequest {
    /// Check the envelope and decode method-specific params.
    pub fn decode(request: &JsonRpcRequest) -> McpResult<Self> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(McpError::InvalidRequest(format!(
                "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
                request.jsonrpc
            )));
        }

        match request.method.as_str() {
            "" => Err(McpError::InvalidRequest(
                "Method name must not be empty".to_string(),
            )),
            "initialize" => {
                let params: Option<InitializeParams> = request.params.clone().and_then(|p| {
                    serde_json::from_value(p)
                        .map_err(|e| tracing::debug!("Ignoring malformed initialize params: {e}"))
                        .ok()
                });
                Ok(ClientRequest::Initialize(params))
            }
            "tools/list" => Ok(ClientRequest::ToolsList),
            "tools/call" => {
                let params = request
                    .params
                    .clone()
                    .ok_or_else(|| {
                        McpError::InvalidParams("Tool call params required".to_string())
                    })?;
                let params = serde_json::from_value(params)
                    .map_err(|e| McpError::InvalidParams(e.to_string()))?;
                Ok(ClientRequest::ToolsCall(params))
            }
            other => Ok(ClientRequest::Unknown(other.to_string())),
        }
    }
}
