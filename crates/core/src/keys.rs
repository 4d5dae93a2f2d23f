use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum allowed length, in bytes, of an index or alias name.
const NAME_MAX_LEN: usize = 255;

/// Characters that may never appear in an index or alias name.
const FORBIDDEN_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ',', '#', ':'];

/// Shared validation for index and alias names.
///
/// Rules:
/// - Non-empty and at most 255 bytes.
/// - No whitespace and none of `\ / * ? " < > | , # :`.
/// - Must not start with `_`, `-` or `+`.
/// - Must not be `.` or `..`.
/// - Index names must additionally be lowercase.
fn validate_name(kind: &'static str, raw: &str, lowercase_only: bool) -> Result<(), CoreError> {
    let reject = |reason| {
        Err(CoreError::InvalidName {
            kind,
            name: raw.to_owned(),
            reason,
        })
    };

    if raw.is_empty() {
        return reject("must not be empty");
    }
    if raw.len() > NAME_MAX_LEN {
        return reject("must not be longer than 255 bytes");
    }
    if raw == "." || raw == ".." {
        return reject("must not be '.' or '..'");
    }
    if raw.starts_with(['_', '-', '+']) {
        return reject("must not start with '_', '-', or '+'");
    }
    if raw.chars().any(char::is_whitespace) {
        return reject("must not contain whitespace");
    }
    if raw.contains(FORBIDDEN_CHARS) {
        return reject("must not contain any of [\\, /, *, ?, \", <, >, |, ,, #, :]");
    }
    if lowercase_only && raw.chars().any(char::is_uppercase) {
        return reject("must be lowercase");
    }
    Ok(())
}

macro_rules! name_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $lowercase:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and wrap a name.
            pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
                let raw = raw.into();
                validate_name($kind, &raw, $lowercase)?;
                Ok(Self(raw))
            }

            /// Return the inner string slice.
            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(name: $name) -> Self {
                name.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

name_type!(
    /// Validated name of an index (the rotated resource).
    ///
    /// # Examples
    ///
    /// ```
    /// use ilm_core::IndexName;
    ///
    /// let index: IndexName = "logs-000001".parse().unwrap();
    /// assert_eq!(index.as_str(), "logs-000001");
    /// assert!("Logs".parse::<IndexName>().is_err());
    /// ```
    IndexName,
    "index",
    true
);

name_type!(
    /// Validated name of an alias bound to one or more indices.
    AliasName,
    "alias",
    false
);

/// Position of a step inside a lifecycle policy: `phase/action/name`.
///
/// The sequencer uses the key of the current step and the key of the step
/// that follows it to advance the per-index state machine.
#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepKey {
    /// Policy phase (`hot`, `warm`, ...).
    pub phase: String,
    /// Action within the phase (`rollover`, ...).
    pub action: String,
    /// Step name within the action.
    pub name: String,
}

impl StepKey {
    /// Create a step key.
    pub fn new(
        phase: impl Into<String>,
        action: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            phase: phase.into(),
            action: action.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.phase, self.action, self.name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("logs-000001")]
    #[case("logs.2024.01")]
    #[case(".ds-logs")]
    fn accepts_valid_index_names(#[case] raw: &str) {
        let index = IndexName::new(raw).unwrap();
        assert_eq!(index, raw);
    }

    #[rstest]
    #[case("", "must not be empty")]
    #[case("..", "must not be '.' or '..'")]
    #[case("_hidden", "must not start with '_', '-', or '+'")]
    #[case("logs 1", "must not contain whitespace")]
    #[case("logs,other", "must not contain any of [\\, /, *, ?, \", <, >, |, ,, #, :]")]
    #[case("Logs", "must be lowercase")]
    fn rejects_invalid_index_names(#[case] raw: &str, #[case] expected: &str) {
        match IndexName::new(raw) {
            Err(CoreError::InvalidName { kind, reason, .. }) => {
                assert_eq!(kind, "index");
                assert_eq!(reason, expected);
            }
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }

    #[test]
    fn alias_names_allow_uppercase() {
        assert!(AliasName::new("Logs-Write").is_ok());
    }

    #[test]
    fn rejects_overlong_names() {
        let long = "a".repeat(NAME_MAX_LEN + 1);
        assert!(AliasName::new(long).is_err());
        assert!(AliasName::new("a".repeat(NAME_MAX_LEN)).is_ok());
    }

    #[test]
    fn map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(AliasName::new("logs-write").unwrap(), 1);
        assert_eq!(map.get("logs-write"), Some(&1));
    }

    #[test]
    fn serde_rejects_invalid_name() {
        let err = serde_json::from_str::<IndexName>("\"UPPER\"").unwrap_err();
        assert!(err.to_string().contains("must be lowercase"));
    }

    #[test]
    fn step_key_display() {
        let key = StepKey::new("hot", "rollover", "check-rollover-ready");
        assert_eq!(key.to_string(), "hot/rollover/check-rollover-ready");
    }
}
