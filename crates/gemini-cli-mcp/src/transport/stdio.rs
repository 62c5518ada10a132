//! Stdio transport — reads JSON-RPC from stdin, writes to stdout.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::protocol::ProtocolHandler;
use crate::types::{McpError, McpResult};

use super::framing;

/// Line-oriented transport for desktop MCP clients.
///
/// Every inbound line is handled on its own task, so a long `tools/call`
/// never holds up the reader. Replies funnel through one writer task and
/// are written whole, one per line, in completion order.
pub struct StdioTransport {
    handler: Arc<ProtocolHandler>,
}

impl StdioTransport {
    pub fn new(handler: ProtocolHandler) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Run the transport loop — reads from stdin, writes to stdout.
    pub async fn run(&self) -> McpResult<()> {
        tracing::info!("Stdio transport started");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve requests from `reader` until EOF, answering on `writer`.
    ///
    /// Calls still running at EOF are awaited and their replies written
    /// before this returns. Lines that are not valid UTF-8 are logged and
    /// skipped. A failed write ends serving with that error.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> McpResult<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let mut writer_task = tokio::spawn(write_loop(writer, rx));

        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        let mut in_flight = JoinSet::new();

        loop {
            buf.clear();
            let read = tokio::select! {
                read = reader.read_until(b'\n', &mut buf) => read.map_err(McpError::Io)?,
                joined = &mut writer_task => {
                    joined.map_err(|e| McpError::Transport(e.to_string()))??;
                    return Err(McpError::Transport("Output stream closed".to_string()));
                }
            };
            if read == 0 {
                break;
            }

            while let Some(done) = in_flight.try_join_next() {
                log_join(done);
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.to_string(),
                Err(e) => {
                    tracing::error!("Dropping message that is not valid UTF-8: {e}");
                    continue;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let handler = Arc::clone(&self.handler);
            let tx = tx.clone();
            in_flight.spawn(async move {
                if let Some(reply) = handle_line(&handler, &line).await {
                    if tx.send(reply).is_err() {
                        tracing::warn!("Writer closed; dropping reply");
                    }
                }
            });
        }

        tracing::info!(
            "EOF on stdin, waiting for {} in-flight request(s)",
            in_flight.len()
        );
        while let Some(done) = in_flight.join_next().await {
            log_join(done);
        }
        drop(tx);

        writer_task
            .await
            .map_err(|e| McpError::Transport(e.to_string()))?
    }
}

async fn handle_line(handler: &ProtocolHandler, line: &str) -> Option<String> {
    let response = match framing::parse_message(line) {
        Ok(msg) => handler.handle_message(msg).await?,
        Err(e) => match framing::recover_id(line) {
            Some(id) => {
                tracing::warn!("Invalid message with id {id}: {e}");
                serde_json::to_value(e.to_json_rpc_error(id)).ok()?
            }
            None => {
                tracing::error!("Dropping unparseable message: {e}");
                return None;
            }
        },
    };

    match framing::frame_message(&response) {
        Ok(framed) => Some(framed),
        Err(e) => {
            tracing::error!("Failed to serialize response: {e}");
            None
        }
    }
}

async fn write_loop<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<String>) -> McpResult<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(framed) = rx.recv().await {
        writer
            .write_all(framed.as_bytes())
            .await
            .map_err(McpError::Io)?;
        writer.flush().await.map_err(McpError::Io)?;
    }
    Ok(())
}

fn log_join(result: Result<(), tokio::task::JoinError>) {
    if let Err(e) = result {
        tracing::error!("Request handler aborted: {e}");
    }
}
