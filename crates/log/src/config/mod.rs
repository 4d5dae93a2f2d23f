//! Configuration types for the logging system.
//!
//! - `Config`, `Format`: core configuration structs
//! - `Fields`: global fields attached to a root span
//! - `presets`: pre-configured setups (development, production, test, env)

mod presets;

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level filter (e.g., "info", "debug,ilm_step=trace")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Emit ANSI colors (ignored for JSON)
    pub colors: bool,

    /// Include the event target (module path)
    pub target: bool,

    /// Global fields to include in all events
    pub fields: Fields,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable with colors and indentation
    Pretty,
    /// Compact single-line output
    Compact,
    /// Structured JSON output
    Json,
}

impl Format {
    /// Parse a format name; unknown names fall back to [`Format::Compact`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Global fields recorded on the root span
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// Service name
    pub service: Option<String>,
    /// Deployment environment
    pub env: Option<String>,
    /// Node name within the cluster
    pub node: Option<String>,
}

impl Fields {
    /// Read fields from `ILM_SERVICE`, `ILM_ENV` and `ILM_NODE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            service: std::env::var("ILM_SERVICE").ok(),
            env: std::env::var("ILM_ENV").ok(),
            node: std::env::var("ILM_NODE").ok(),
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.service.is_none() && self.env.is_none() && self.node.is_none()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            colors: true,
            target: true,
            fields: Fields::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn format_from_name() {
        assert_eq!(Format::from_name("JSON"), Format::Json);
        assert_eq!(Format::from_name("pretty"), Format::Pretty);
        assert_eq!(Format::from_name("logfmt"), Format::Compact);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: Config = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, Format::Json);
        assert!(config.fields.is_empty());
    }
}
