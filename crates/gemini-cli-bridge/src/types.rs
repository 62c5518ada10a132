//! Error types for running the Gemini command-line tool.

/// Message used when the tool exits unsuccessfully without writing to stderr.
pub const GENERIC_FAILURE: &str = "Gemini failed";

/// Errors that can occur while running the external tool.
#[derive(thiserror::Error, Debug)]
pub enum GeminiError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but did not exit with status zero. `exit_code` is `None`
    /// when the process was terminated by a signal.
    #[error("{message}")]
    Failed {
        exit_code: Option<i32>,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeminiError {
    /// Build a [`GeminiError::Failed`] from captured stderr text.
    pub fn failed(exit_code: Option<i32>, stderr: &str) -> Self {
        let stderr = stderr.trim();
        let message = if stderr.is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            stderr.to_string()
        };
        GeminiError::Failed { exit_code, message }
    }
}

/// Convenience result type.
pub type GeminiResult<T> = Result<T, GeminiError>;
