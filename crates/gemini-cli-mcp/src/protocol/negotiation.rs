//! Initialization handshake bookkeeping.

use crate::types::{InitializeParams, InitializeResult, MCP_VERSION};

/// What the peer told us during the handshake. Informational only: the
/// server answers every request the same way before and after it.
#[derive(Debug, Clone, Default)]
pub struct NegotiatedCapabilities {
    pub initialized: bool,
}

impl NegotiatedCapabilities {
    /// The result never depends on `params`.
    pub fn negotiate(&mut self, params: Option<InitializeParams>) -> InitializeResult {
        if let Some(params) = params {
            if params.protocol_version != MCP_VERSION {
                tracing::warn!(
                    "Client requested protocol version {}, server supports {}. \
                     Proceeding with server version.",
                    params.protocol_version,
                    MCP_VERSION
                );
            }
            tracing::info!(
                "Initialized with client: {} v{}",
                params.client_info.name,
                params.client_info.version
            );
        } else {
            tracing::info!("Initialized by anonymous client");
        }

        InitializeResult::default_result()
    }

    pub fn mark_initialized(&mut self) {
        self.initialized = true;
        tracing::info!("MCP handshake complete");
    }
}
