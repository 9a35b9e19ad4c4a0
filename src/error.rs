//! Error types for tool dispatch.
//!
//! Every variant is reported back to the client as an error-shaped
//! `CallToolResult` rather than as a JSON-RPC error.

use rmcp::model::{CallToolResult, Content};
use std::fmt;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug)]
pub enum ToolError {
    /// No handler is registered under the requested name.
    UnknownTool(String),

    /// The handler returned an error.
    Execution(anyhow::Error),

    /// The handler task panicked or was aborted before producing a result.
    Panicked(String),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool(name) => write!(f, "Unknown tool: {}", name),
            Self::Execution(err) => write!(f, "{:#}", err),
            Self::Panicked(name) => write!(f, "Tool '{}' terminated unexpectedly", name),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Execution(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ToolError {
    fn from(err: anyhow::Error) -> Self {
        Self::Execution(err)
    }
}

/// Result type for tool dispatch.
pub type ToolResult<T> = Result<T, ToolError>;

impl ToolError {
    /// Convert this error into the tool result returned to the client.
    pub fn to_call_tool_result(&self) -> CallToolResult {
        CallToolResult::error(vec![Content::text(format!("Error: {}", self))])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(&result.content[0]).unwrap();
        value["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn test_unknown_tool_result() {
        let result = ToolError::UnknownTool("nonexistent".into()).to_call_tool_result();
        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 1);
        assert_eq!(result_text(&result), "Error: Unknown tool: nonexistent");
    }

    #[test]
    fn test_execution_error_keeps_message() {
        let err = ToolError::from(anyhow::anyhow!("invalid arguments"));
        assert_eq!(err.to_string(), "invalid arguments");
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(result_text(&err.to_call_tool_result()), "Error: invalid arguments");
    }

    #[test]
    fn test_execution_error_includes_cause_chain() {
        use anyhow::Context;

        let cause: anyhow::Result<()> = Err(anyhow::anyhow!("invalid type: integer `42`"));
        let err = ToolError::from(cause.context("Invalid arguments for get_hello").unwrap_err());

        let text = result_text(&err.to_call_tool_result());
        assert!(text.starts_with("Error: Invalid arguments for get_hello"));
        assert!(text.contains("invalid type: integer `42`"));
    }

    #[test]
    fn test_panicked_names_tool() {
        let err = ToolError::Panicked("get_hello".into());
        assert!(err.to_string().contains("get_hello"));
        assert_eq!(err.to_call_tool_result().is_error, Some(true));
    }
}
