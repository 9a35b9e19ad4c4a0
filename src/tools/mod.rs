//! Tool handler registry for managing MCP tool implementations.
//!
//! This module provides a simple way to register and invoke tool handlers,
//! making it easy to add new tools without modifying the core `ServerHandler`
//! implementation.

mod registry;

pub use registry::{ToolContext, ToolHandler, ToolRegistry};

// Tool handler implementations
mod get_hello;

pub use get_hello::{DEFAULT_NAME, GetHelloHandler, GreetingArgs};

/// Build the registry of every tool this server advertises.
pub fn default_registry() -> ToolRegistry {
    ToolRegistry::new().register_handler(GetHelloHandler::new())
}
