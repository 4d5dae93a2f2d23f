//! Flat index settings bag and the lifecycle setting keys read from it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Name of the alias an index is rolled over through.
pub const LIFECYCLE_ROLLOVER_ALIAS: &str = "index.lifecycle.rollover_alias";

/// Marks an index as finished: no further writes and no rollover expected.
pub const LIFECYCLE_INDEXING_COMPLETE: &str = "index.lifecycle.indexing_complete";

/// Immutable-by-convention key/value settings of an index.
///
/// Values are stored as strings, the way they arrive from cluster state;
/// typed getters parse on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Create an empty settings bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a setting.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw string value of a setting.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// String value of a setting, treating an empty string as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Boolean value of a setting; `default` when the setting is absent.
    ///
    /// Only `true` and `false` are accepted.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, CoreError> {
        match self.get(key) {
            None => Ok(default),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(CoreError::InvalidSetting {
                key: key.to_owned(),
                value: other.to_owned(),
                reason: "expected [true] or [false]",
            }),
        }
    }

    /// Configured rollover alias, if set and non-empty.
    pub fn rollover_alias(&self) -> Option<&str> {
        self.get_non_empty(LIFECYCLE_ROLLOVER_ALIAS)
    }

    /// Whether `index.lifecycle.indexing_complete` is set to `true`.
    pub fn indexing_complete(&self) -> Result<bool, CoreError> {
        self.get_bool(LIFECYCLE_INDEXING_COMPLETE, false)
    }

    /// Number of settings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no settings are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Settings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_alias_is_treated_as_absent() {
        let settings = Settings::new().with(LIFECYCLE_ROLLOVER_ALIAS, "");
        assert_eq!(settings.rollover_alias(), None);
        assert_eq!(settings.get(LIFECYCLE_ROLLOVER_ALIAS), Some(""));
    }

    #[test]
    fn rollover_alias_is_read() {
        let settings = Settings::new().with(LIFECYCLE_ROLLOVER_ALIAS, "logs-write");
        assert_eq!(settings.rollover_alias(), Some("logs-write"));
    }

    #[test]
    fn indexing_complete_defaults_to_false() {
        assert!(!Settings::new().indexing_complete().unwrap());
    }

    #[test]
    fn indexing_complete_parses_booleans() {
        let on = Settings::new().with(LIFECYCLE_INDEXING_COMPLETE, "true");
        let off = Settings::new().with(LIFECYCLE_INDEXING_COMPLETE, "false");
        assert!(on.indexing_complete().unwrap());
        assert!(!off.indexing_complete().unwrap());
    }

    #[test]
    fn indexing_complete_rejects_garbage() {
        let settings = Settings::new().with(LIFECYCLE_INDEXING_COMPLETE, "TRUE");
        let err = settings.indexing_complete().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSetting { .. }));
    }

    #[test]
    fn collects_from_pairs_and_serializes_flat() {
        let settings: Settings = [(LIFECYCLE_ROLLOVER_ALIAS, "a")].into_iter().collect();
        assert_eq!(settings.len(), 1);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json, serde_json::json!({ "index.lifecycle.rollover_alias": "a" }));
    }
}
