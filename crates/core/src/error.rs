//! Core error types.

use thiserror::Error;

/// Errors produced while parsing identifiers, unit values and settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CoreError {
    /// An index or alias name failed validation.
    #[error("invalid {kind} name [{name}]: {reason}")]
    InvalidName {
        /// What kind of name was being validated (`index`, `alias`).
        kind: &'static str,
        /// The rejected input.
        name: String,
        /// Why the input was rejected.
        reason: &'static str,
    },

    /// A byte-size string could not be parsed.
    #[error("failed to parse byte size [{input}]: {reason}")]
    InvalidByteSize {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        reason: &'static str,
    },

    /// A time-value string could not be parsed.
    #[error("failed to parse time value [{input}]: {reason}")]
    InvalidTimeValue {
        /// The rejected input.
        input: String,
        /// Why the input was rejected.
        reason: &'static str,
    },

    /// A setting holds a value of the wrong shape.
    #[error("failed to parse value [{value}] for setting [{key}]: {reason}")]
    InvalidSetting {
        /// Setting key.
        key: String,
        /// Raw value found in the settings bag.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}
