//! Handler for the `get_hello` tool.
//!
//! Greets a name in one of the supported languages.

use std::future::Future;
use std::pin::Pin;

use anyhow::Context;
use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Deserialize;
use serde_json::json;

use crate::tools::{ToolContext, ToolHandler};
use crate::types::Language;

/// Name greeted when the caller does not supply one.
pub const DEFAULT_NAME: &str = "World";

/// Arguments accepted by `get_hello`.
///
/// `language` is kept as raw JSON: a value that is not a supported code,
/// including one that is not a string at all, selects English.
#[derive(Debug, Default, Deserialize)]
pub struct GreetingArgs {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub language: Option<serde_json::Value>,
}

impl GreetingArgs {
    /// Parse the raw tool arguments.
    pub fn from_args(args: JsonObject) -> anyhow::Result<Self> {
        serde_json::from_value(serde_json::Value::Object(args))
            .context("Invalid arguments for get_hello")
    }

    /// Compute the greeting, applying defaults for missing fields.
    pub fn greeting(&self) -> String {
        let name = self.name.as_deref().unwrap_or(DEFAULT_NAME);
        self.language().greet(name)
    }

    /// The requested language, or English when absent or unrecognized.
    pub fn language(&self) -> Language {
        self.language
            .as_ref()
            .and_then(|v| v.as_str())
            .map(Language::from_code)
            .unwrap_or_default()
    }
}

/// Handler for the `get_hello` tool.
#[derive(Debug, Default)]
pub struct GetHelloHandler;

impl GetHelloHandler {
    pub fn new() -> Self {
        Self
    }

    /// Build the input schema for this tool.
    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let languages: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();

        let mut properties = serde_json::Map::new();
        properties.insert(
            "name".to_string(),
            json!({
                "type": "string",
                "description": "Name to greet (default: \"World\")."
            }),
        );
        properties.insert(
            "language".to_string(),
            json!({
                "type": "string",
                "enum": languages,
                "description": "Greeting language (default: \"en\").",
                "default": "en"
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!([]));
        schema
    }
}

impl ToolHandler for GetHelloHandler {
    fn name(&self) -> &str {
        "get_hello"
    }

    fn description(&self) -> &str {
        "A simple hello world tool for demonstration"
    }

    fn input_schema(&self) -> JsonObject {
        self.input_schema()
    }

    fn execute(
        &self,
        args: JsonObject,
        ctx: &ToolContext,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<CallToolResult>> + Send + '_>> {
        tracing::debug!(payload = %ctx.payload(), "get_hello invoked");

        Box::pin(async move {
            let greeting = GreetingArgs::from_args(args)?.greeting();

            Ok(CallToolResult {
                content: vec![Content::text(greeting)],
                structured_content: None,
                is_error: Some(false),
                meta: None,
            })
        })
    }
}
