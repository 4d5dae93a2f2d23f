//! Rollover thresholds configured on a policy's rollover action.

use std::fmt;

use ilm_core::{ByteSize, TimeValue};
use serde::{Deserialize, Serialize};

/// Single rollover condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Index is older than the given age.
    MaxAge(TimeValue),
    /// Primary store is larger than the given size.
    MaxSize(ByteSize),
    /// Index holds more than the given number of documents.
    MaxDocs(u64),
}

impl Condition {
    /// Wire name of the condition.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MaxAge(_) => "max_age",
            Self::MaxSize(_) => "max_size",
            Self::MaxDocs(_) => "max_docs",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxAge(age) => write!(f, "[{}: {age}]", self.name()),
            Self::MaxSize(size) => write!(f, "[{}: {size}]", self.name()),
            Self::MaxDocs(docs) => write!(f, "[{}: {docs}]", self.name()),
        }
    }
}

/// Optional size, age and document-count thresholds.
///
/// All three may be absent; a dry run with no conditions reports no condition
/// as met.
///
/// ```rust
/// use ilm_step::RolloverThresholds;
///
/// let thresholds: RolloverThresholds =
///     serde_json::from_str(r#"{"max_size":"50gb","max_age":"30d"}"#).unwrap();
/// assert_eq!(thresholds.conditions().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolloverThresholds {
    /// Maximum primary store size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<ByteSize>,
    /// Maximum index age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<TimeValue>,
    /// Maximum document count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_docs: Option<u64>,
}

impl RolloverThresholds {
    /// No thresholds.
    pub const fn new() -> Self {
        Self {
            max_size: None,
            max_age: None,
            max_docs: None,
        }
    }

    /// Set the size threshold.
    #[must_use]
    pub const fn with_max_size(mut self, size: ByteSize) -> Self {
        self.max_size = Some(size);
        self
    }

    /// Set the age threshold.
    #[must_use]
    pub const fn with_max_age(mut self, age: TimeValue) -> Self {
        self.max_age = Some(age);
        self
    }

    /// Set the document-count threshold.
    #[must_use]
    pub const fn with_max_docs(mut self, docs: u64) -> Self {
        self.max_docs = Some(docs);
        self
    }

    /// Present thresholds as conditions, in age, size, docs order.
    pub fn conditions(&self) -> Vec<Condition> {
        [
            self.max_age.map(Condition::MaxAge),
            self.max_size.map(Condition::MaxSize),
            self.max_docs.map(Condition::MaxDocs),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Returns `true` if no threshold is set.
    pub const fn is_empty(&self) -> bool {
        self.max_size.is_none() && self.max_age.is_none() && self.max_docs.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Condition::MaxDocs(1000), "[max_docs: 1000]")]
    #[case(Condition::MaxAge(TimeValue::from_days(30)), "[max_age: 30d]")]
    #[case(Condition::MaxSize(ByteSize::from_gb(50)), "[max_size: 50gb]")]
    fn condition_display(#[case] condition: Condition, #[case] expected: &str) {
        assert_eq!(condition.to_string(), expected);
    }

    #[test]
    fn conditions_only_lists_present_thresholds() {
        assert!(RolloverThresholds::new().conditions().is_empty());
        assert!(RolloverThresholds::default().is_empty());

        let thresholds = RolloverThresholds::new()
            .with_max_docs(1000)
            .with_max_age(TimeValue::from_days(1));
        assert_eq!(
            thresholds.conditions(),
            vec![
                Condition::MaxAge(TimeValue::from_days(1)),
                Condition::MaxDocs(1000)
            ]
        );
        assert!(!thresholds.is_empty());
    }

    #[test]
    fn deserializes_policy_json() {
        let thresholds: RolloverThresholds =
            serde_json::from_str(r#"{"max_size":"50gb","max_age":"30d","max_docs":1000}"#).unwrap();

        assert_eq!(
            thresholds,
            RolloverThresholds::new()
                .with_max_size(ByteSize::from_gb(50))
                .with_max_age(TimeValue::from_days(30))
                .with_max_docs(1000)
        );
    }

    #[test]
    fn rejects_malformed_units() {
        let err = serde_json::from_str::<RolloverThresholds>(r#"{"max_size":"50 furlongs"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn serializes_absent_thresholds_as_missing_fields() {
        let json = serde_json::to_value(RolloverThresholds::new().with_max_docs(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "max_docs": 5 }));
    }
}
