//! MCP tool implementations.

pub mod gemini_run;
pub mod registry;
pub mod runner;

pub use registry::ToolRegistry;
pub use runner::ToolRunner;
