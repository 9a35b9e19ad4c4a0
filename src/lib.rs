mod config;
mod error;
mod tools;
mod types;
pub mod logging;
pub mod transport;
pub mod server;


pub use config::{CONFIG_ENV, ServerConfig};
pub use error::{ToolError, ToolResult};
pub use server::HelloServer;
pub use tools::{
    DEFAULT_NAME, GetHelloHandler, GreetingArgs, ToolContext, ToolHandler, ToolRegistry,
    default_registry,
};
pub use transport::{DrainingReader, InFlight};
pub use types::Language;

use std::sync::Arc;

/// Convenience function to create a fully configured MCP server.
///
/// This registers the default tools and returns a `HelloServer` that
/// implements rmcp's `ServerHandler`.
pub fn create_server(config: ServerConfig) -> HelloServer {
    let tool_registry = Arc::new(default_registry());
    HelloServer::new(config, tool_registry)
}
