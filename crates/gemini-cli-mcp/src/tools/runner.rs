//! Admission-gated access to the executor.

use gemini_cli_bridge::GeminiExecutor;
use tokio::sync::Semaphore;

use crate::types::{McpError, McpResult};

/// Wraps the executor with a counting gate on live child processes.
///
/// Waiters are admitted in arrival order.
pub struct ToolRunner {
    executor: GeminiExecutor,
    permits: Option<Semaphore>,
}

impl ToolRunner {
    /// `max_concurrent == 0` disables the gate.
    pub fn new(executor: GeminiExecutor, max_concurrent: usize) -> Self {
        let permits = (max_concurrent > 0).then(|| Semaphore::new(max_concurrent));
        Self { executor, permits }
    }

    pub async fn run(&self, prompt: &str) -> McpResult<String> {
        let _permit = match &self.permits {
            Some(permits) => Some(
                permits
                    .acquire()
                    .await
                    .map_err(|e| McpError::InternalError(e.to_string()))?,
            ),
            None => None,
        };

        Ok(self.executor.run(prompt).await?)
    }
}
