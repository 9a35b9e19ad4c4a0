use rmcp::model::Implementation;
use serde::Deserialize;
use std::{fs, path::Path};

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "HELLO_MCP_CONFIG";

const DEFAULT_INSTRUCTIONS: &str =
    "Demonstration server exposing a single `get_hello` tool that greets a name in English, Spanish or French.";

/// Server identity reported during the MCP initialize handshake.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: Some(DEFAULT_INSTRUCTIONS.to_string()),
        }
    }
}

impl ServerConfig {
    /// Load the config from `path`, or use the defaults when no path is given.
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Could not read config file `{}`: {}", path.display(), e)
        })?;
        Self::from_json(&raw).map_err(|e| {
            anyhow::anyhow!("Invalid config file `{}`: {}", path.display(), e)
        })
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let cfg: ServerConfig = serde_json::from_str(raw)?;
        if cfg.name.trim().is_empty() {
            return Err(anyhow::anyhow!("Server `name` must not be empty"));
        }
        Ok(cfg)
    }

    /// The implementation info advertised to clients.
    pub fn implementation(&self) -> Implementation {
        Implementation {
            name: self.name.clone(),
            version: self.version.clone(),
            title: None,
            icons: None,
            website_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_path() {
        let cfg = ServerConfig::load(None).unwrap();
        assert_eq!(cfg, ServerConfig::default());
        assert_eq!(cfg.name, "hello-mcp");
        assert!(cfg.instructions.is_some());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "myApp", "version": "1.0.0" }}"#).unwrap();

        let cfg = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.name, "myApp");
        assert_eq!(cfg.version, "1.0.0");
        assert_eq!(cfg.instructions, ServerConfig::default().instructions);

        let info = cfg.implementation();
        assert_eq!(info.name, "myApp");
        assert_eq!(info.version, "1.0.0");
    }

    #[test]
    fn test_null_instructions() {
        let cfg = ServerConfig::from_json(r#"{ "instructions": null }"#).unwrap();
        assert!(cfg.instructions.is_none());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = ServerConfig::load(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ServerConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_empty_name_is_error() {
        assert!(ServerConfig::from_json(r#"{ "name": "  " }"#).is_err());
    }
}
