//! # ILM Log
//!
//! Logging setup and injectable observability hooks for lifecycle steps.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ilm_log::Config;
//!
//! let _guard = ilm_log::init_with(Config::from_env()).expect("logger");
//! tracing::info!(index = "logs-000001", "evaluating rollover readiness");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;

pub mod observability;

pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, Fields, Format};

/// Error type for logger operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filter directive could not be parsed
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// Offending filter string
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber could not be installed
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pick a configuration from the environment and build profile, then install it
///
/// `ILM_LOG`/`RUST_LOG` select [`Config::from_env`]; otherwise debug builds use
/// [`Config::development`] and release builds [`Config::production`].
pub fn auto_init() -> Result<LoggerGuard> {
    if std::env::var("ILM_LOG").is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> Result<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> Result<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests; a no-op when a subscriber is already installed
pub fn init_test() -> LoggerGuard {
    if tracing::dispatcher::has_been_set() {
        return LoggerGuard::noop();
    }
    init_with(Config::test()).unwrap_or_else(|_| LoggerGuard::noop())
}
