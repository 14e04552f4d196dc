//! MCP surface: server, tools, payload schemas, and error shaping.

pub mod error;
pub mod schemas;
pub mod server;
pub mod tools;
pub mod types;

pub use server::{run_mcp_server, BlockhostServer};
