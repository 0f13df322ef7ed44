//! zk Notes MCP Library
//!
//! Model Context Protocol layer: exposes the notebook handlers as tools
//! over newline-delimited JSON-RPC 2.0 on stdio.

pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub use handlers::{ToolError, ToolHandler};
pub use server::McpServer;
