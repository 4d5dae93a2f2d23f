//! Logger builder implementation

use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::Error;
use crate::config::{Config, Format};

/// Boxed fmt layer; the concrete type differs per [`Format`].
type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger alive
///
/// Holds the root span carrying the global [`Fields`](crate::Fields);
/// dropping the guard exits that span.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span_guard: Option<tracing::span::EnteredSpan>,
}

impl LoggerGuard {
    /// Guard that owns nothing (logger already installed elsewhere).
    #[must_use]
    pub fn noop() -> Self {
        Self {
            _root_span_guard: None,
        }
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> Result<LoggerGuard, Error> {
        let filter = EnvFilter::try_new(&self.config.level).map_err(|e| Error::Filter {
            filter: self.config.level.clone(),
            reason: e.to_string(),
        })?;

        Registry::default()
            .with(self.fmt_layer())
            .with(filter)
            .try_init()
            .map_err(|e| Error::Init(e.to_string()))?;

        let fields = &self.config.fields;
        let root_span_guard = (!fields.is_empty()).then(|| {
            tracing::info_span!(
                "ilm",
                service = fields.service.as_deref().unwrap_or(""),
                env = fields.env.as_deref().unwrap_or(""),
                node = fields.node.as_deref().unwrap_or("")
            )
            .entered()
        });

        Ok(LoggerGuard {
            _root_span_guard: root_span_guard,
        })
    }

    fn fmt_layer(&self) -> BoxedLayer {
        let Config {
            colors, target, ..
        } = self.config;
        match self.config.format {
            Format::Pretty => fmt::layer()
                .pretty()
                .with_ansi(colors)
                .with_target(target)
                .with_writer(std::io::stderr)
                .boxed(),
            Format::Compact => fmt::layer()
                .compact()
                .with_ansi(colors)
                .with_target(target)
                .with_writer(std::io::stderr)
                .boxed(),
            Format::Json => fmt::layer()
                .json()
                .with_target(target)
                .with_current_span(true)
                .with_writer(std::io::stderr)
                .boxed(),
        }
    }
}
