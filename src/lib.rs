pub mod error;
pub mod host;
pub mod mcp;
pub mod schema;
pub mod session;

pub use error::BlockhostError;
