//! Main request dispatcher — receives JSON-RPC messages, routes to handlers.

use tokio::sync::Mutex;

use serde_json::Value;

use gemini_cli_bridge::GeminiExecutor;

use crate::tools::{ToolRegistry, ToolRunner};
use crate::types::*;

use super::negotiation::NegotiatedCapabilities;

/// Dispatches incoming JSON-RPC messages. Safe to share across tasks; no
/// request observes another's state.
pub struct ProtocolHandler {
    runner: ToolRunner,
    capabilities: Mutex<NegotiatedCapabilities>,
}

impl ProtocolHandler {
    /// `max_concurrent_calls == 0` leaves tool executions unbounded.
    pub fn new(executor: GeminiExecutor, max_concurrent_calls: usize) -> Self {
        Self {
            runner: ToolRunner::new(executor, max_concurrent_calls),
            capabilities: Mutex::new(NegotiatedCapabilities::default()),
        }
    }

    /// Whether the peer has sent the `initialized` notification.
    pub async fn is_initialized(&self) -> bool {
        self.capabilities.lock().await.initialized
    }

    /// Requests always yield exactly one response; anything else yields none.
    pub async fn handle_message(&self, msg: JsonRpcMessage) -> Option<Value> {
        match msg {
            JsonRpcMessage::Request(req) => Some(self.handle_request(req).await),
            JsonRpcMessage::Notification(notif) => {
                self.handle_notification(notif).await;
                None
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::Error(_) => {
                tracing::warn!("Received unexpected response message from client");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();
        let result = match ClientRequest::decode(&request) {
            Ok(decoded) => self.dispatch_request(decoded).await,
            Err(e) => Err(e),
        };

        let serialized = match result {
            Ok(value) => serde_json::to_value(JsonRpcResponse::new(id.clone(), value)),
            Err(e) => {
                match &e {
                    McpError::MethodNotFound(method) => {
                        tracing::debug!("Method not found: {method} (id {id})")
                    }
                    _ => tracing::warn!("Request {id} ({}) failed: {e}", request.method),
                }
                serde_json::to_value(e.to_json_rpc_error(id.clone()))
            }
        };

        serialized.unwrap_or_else(|e| {
            let fallback = McpError::InternalError(e.to_string()).to_json_rpc_error(id);
            serde_json::to_value(fallback).unwrap_or_default()
        })
    }

    async fn dispatch_request(&self, request: ClientRequest) -> McpResult<Value> {
        match request {
            ClientRequest::Initialize(params) => self.handle_initialize(params).await,
            ClientRequest::ToolsList => self.handle_tools_list().await,
            ClientRequest::ToolsCall(params) => self.handle_tools_call(params).await,
            ClientRequest::Unknown(method) => Err(McpError::MethodNotFound(method)),
        }
    }

    async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" | "initialized" => {
                self.capabilities.lock().await.mark_initialized();
            }
            "notifications/cancelled" | "$/cancelRequest" => {
                tracing::info!(
                    "Received cancellation notification; running calls are not interrupted"
                );
            }
            _ => {
                tracing::debug!("Unknown notification: {}", notification.method);
            }
        }
    }

    async fn handle_initialize(&self, params: Option<InitializeParams>) -> McpResult<Value> {
        let result = self.capabilities.lock().await.negotiate(params);
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    async fn handle_tools_list(&self) -> McpResult<Value> {
        let result = ToolListResult {
            tools: ToolRegistry::list_tools(),
        };
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }

    async fn handle_tools_call(&self, params: ToolCallParams) -> McpResult<Value> {
        let result = ToolRegistry::call(&params.name, params.arguments, &self.runner).await?;
        serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
    }
}
