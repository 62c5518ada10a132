//! gemini-cli-bridge — run the Gemini command-line tool as a child process.

pub mod executor;
pub mod types;

pub use executor::{GeminiExecutor, DEFAULT_PROGRAM, DEFAULT_PROMPT_FLAG};
pub use types::*;
