//! Configuration presets for common scenarios

use super::{Config, Fields, Format};

impl Config {
    /// Create configuration from environment variables
    ///
    /// `ILM_LOG` wins over `RUST_LOG`; `ILM_LOG_FORMAT` selects the format.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(level) = std::env::var("ILM_LOG") {
            config.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            config.level = level;
        }

        if let Ok(format) = std::env::var("ILM_LOG_FORMAT") {
            config.format = Format::from_name(&format);
        }

        config.fields = Fields::from_env();
        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            colors: true,
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            colors: false,
            ..Self::default()
        }
    }

    /// Test configuration (trace level, no colors)
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            colors: false,
            target: false,
            ..Self::default()
        }
    }
}
