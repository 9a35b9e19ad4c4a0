//! Tool registry for managing MCP tool handlers.
//!
//! Provides a `ToolHandler` trait for implementing tools and a `ToolRegistry`
//! for registering and invoking them. A tool's descriptor is produced by its
//! handler, so every advertised tool always has something to dispatch to.

use std::borrow::Cow;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use rmcp::model::{CallToolRequestParams, CallToolResult, JsonObject, Tool as McpTool};

use crate::error::{ToolError, ToolResult};

/// Context passed to tool handlers during execution.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// The full inbound request, as received from the client.
    pub request: CallToolRequestParams,
}

impl ToolContext {
    pub fn new(request: CallToolRequestParams) -> Self {
        Self { request }
    }

    /// Render the inbound request as JSON for diagnostics.
    pub fn payload(&self) -> String {
        serde_json::to_string(&self.request)
            .unwrap_or_else(|e| format!("<unserializable request: {}>", e))
    }
}

/// Trait for handling MCP tool invocations.
///
/// Each tool implements this trait to define its schema and execution logic.
pub trait ToolHandler: Send + Sync {
    /// Returns the tool's name (e.g., "get_hello").
    fn name(&self) -> &str;

    /// Returns the tool's human-readable title.
    fn title(&self) -> Option<&str> {
        None
    }

    /// Returns the tool's description.
    fn description(&self) -> &str;

    /// Returns the input schema for this tool.
    fn input_schema(&self) -> JsonObject;

    /// Executes the tool with the given arguments.
    fn execute(
        &self,
        args: JsonObject,
        ctx: &ToolContext,
    ) -> Pin<Box<dyn Future<Output = Result<CallToolResult>> + Send + '_>>;

    /// Converts this handler to an `McpTool` for use in `list_tools`.
    fn to_mcp_tool(&self) -> McpTool {
        McpTool {
            name: Cow::Owned(self.name().to_string()),
            title: self.title().map(|s| s.to_string()),
            description: Some(Cow::Owned(self.description().to_string())),
            input_schema: Arc::new(self.input_schema()),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }
    }
}

/// Ordered registry of tool handlers.
///
/// Registration order is the order tools are listed to clients.
#[derive(Clone)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool handler.
    ///
    /// A handler registered under an existing name replaces the previous one
    /// and keeps its position.
    pub fn register(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let name = handler.name().to_string();
        match self.index.get(&name) {
            Some(&pos) => self.handlers[pos] = handler,
            None => {
                self.index.insert(name, self.handlers.len());
                self.handlers.push(handler);
            }
        }
        self
    }

    /// Register a tool handler from a type that implements `ToolHandler`.
    pub fn register_handler<T: ToolHandler + 'static>(self, handler: T) -> Self {
        self.register(Arc::new(handler))
    }

    /// Get a tool handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.index.get(name).map(|&pos| self.handlers[pos].clone())
    }

    /// List all registered tool names in registration order.
    pub fn list_names(&self) -> Vec<String> {
        self.handlers.iter().map(|h| h.name().to_string()).collect()
    }

    /// Get all registered tools as `McpTool` instances for `list_tools`.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.handlers.iter().map(|h| h.to_mcp_tool()).collect()
    }

    /// Execute a tool by name with the given arguments.
    ///
    /// The handler runs on its own task, so a panic inside it surfaces here as
    /// `ToolError::Panicked` instead of unwinding through the service loop.
    pub async fn call_tool(
        &self,
        name: &str,
        args: JsonObject,
        ctx: &ToolContext,
    ) -> ToolResult<CallToolResult> {
        let handler = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let ctx = ctx.clone();
        let task = tokio::spawn(async move { handler.execute(args, &ctx).await });

        match task.await {
            Ok(result) => result.map_err(ToolError::from),
            Err(e) => {
                tracing::error!(tool = %name, "Tool task failed: {}", e);
                Err(ToolError::Panicked(name.to_string()))
            }
        }
    }

    /// Check if a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
