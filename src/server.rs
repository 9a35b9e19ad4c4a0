//! MCP server implementation using rmcp.
//!
//! Routes `tools/list` and `tools/call` requests to the tool registry. Tool
//! failures never escape as protocol errors: they come back as tool results
//! with `isError` set.

use std::future::Future;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};

use crate::config::ServerConfig;
use crate::tools::{ToolContext, ToolRegistry};
use crate::transport::InFlight;

/// MCP server that handles protocol requests and delegates to tool handlers.
#[derive(Clone)]
pub struct HelloServer {
    config: Arc<ServerConfig>,
    tool_registry: Arc<ToolRegistry>,
    in_flight: InFlight,
}

impl HelloServer {
    /// Create a new MCP server with the given identity and tool registry.
    pub fn new(config: ServerConfig, tool_registry: Arc<ToolRegistry>) -> Self {
        Self {
            config: Arc::new(config),
            tool_registry,
            in_flight: InFlight::new(),
        }
    }

    /// Get the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get the tool registry.
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Tracker of tool calls still executing.
    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// Build the `tools/list` response.
    pub fn list_tools_result(&self) -> ListToolsResult {
        tracing::debug!("Received list tools request");
        ListToolsResult {
            tools: self.tool_registry.list_tools(),
            next_cursor: None,
            ..Default::default()
        }
    }

    /// Dispatch a `tools/call` request to its handler.
    ///
    /// Unknown tools and handler failures are converted into error results.
    pub async fn dispatch(&self, request: CallToolRequestParams) -> CallToolResult {
        let _guard = self.in_flight.enter();
        let tool_name = request.name.to_string();
        let args = request.arguments.clone().unwrap_or_default();
        let ctx = ToolContext::new(request);

        tracing::debug!(
            tool = %tool_name,
            payload = %ctx.payload(),
            "Received tool call"
        );

        match self.tool_registry.call_tool(&tool_name, args, &ctx).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(tool = %tool_name, "Error handling tool call: {}", e);
                e.to_call_tool_result()
            }
        }
    }
}

impl ServerHandler for HelloServer {
    fn ping(
        &self,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<(), McpError>> + Send + '_ {
        std::future::ready(Ok(()))
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        std::future::ready(Ok(self.list_tools_result()))
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { Ok(self.dispatch(request).await) }
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: self.config.implementation(),
            instructions: self.config.instructions.clone(),
        }
    }
}
