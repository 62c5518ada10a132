//! Gemini CLI MCP Server — the `gemini` command-line tool as an MCP tool over stdio.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
