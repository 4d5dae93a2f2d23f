#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # ILM Core
//!
//! Shared building blocks for index lifecycle steps.
//!
//! ## Key Components
//!
//! - **Names**: [`IndexName`], [`AliasName`]: validated string newtypes
//! - **Step keys**: [`StepKey`]: `phase/action/name` position of a step in a policy
//! - **Units**: [`ByteSize`], [`TimeValue`]: `"50gb"` / `"30d"` threshold notation
//! - **Settings**: [`Settings`]: flat index settings with typed getters and
//!   the lifecycle keys [`LIFECYCLE_ROLLOVER_ALIAS`] and [`LIFECYCLE_INDEXING_COMPLETE`]
//!
//! ## Usage
//!
//! ```rust
//! use ilm_core::{ByteSize, Settings, LIFECYCLE_ROLLOVER_ALIAS};
//!
//! let settings = Settings::new().with(LIFECYCLE_ROLLOVER_ALIAS, "logs-write");
//! assert_eq!(settings.rollover_alias(), Some("logs-write"));
//!
//! let max_size: ByteSize = "50gb".parse().unwrap();
//! assert_eq!(max_size.to_string(), "50gb");
//! ```

pub mod error;
pub mod settings;
pub mod units;

mod keys;

pub use error::CoreError;
pub use keys::{AliasName, IndexName, StepKey};
pub use settings::{LIFECYCLE_INDEXING_COMPLETE, LIFECYCLE_ROLLOVER_ALIAS, Settings};
pub use units::{ByteSize, TimeValue};

/// Result type used throughout the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
