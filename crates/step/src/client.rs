//! Port to the storage coordinator that executes rollover requests.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use ilm_core::{AliasName, ByteSize, IndexName, TimeValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::thresholds::Condition;

/// Failure of a request sent through an [`IndicesClient`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// The request never reached the coordinator or the connection broke.
    #[error("transport error: {0}")]
    Transport(String),

    /// The coordinator did not answer within the master timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The coordinator refused the request.
    #[error("request rejected with status {status}: {reason}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Coordinator's explanation.
        reason: String,
    },
}

/// Rollover request addressed to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverRequest {
    /// Alias to roll over.
    pub alias: AliasName,
    /// Explicit name for the new index; `None` lets the coordinator derive it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_index: Option<IndexName>,
    /// Evaluate conditions without performing the rollover.
    #[serde(default)]
    pub dry_run: bool,
    /// How long the coordinator may take to answer.
    #[serde(with = "duration_millis")]
    pub master_timeout: Duration,
    /// Conditions to check, at most one per kind.
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl RolloverRequest {
    /// Request a rollover of `alias` with no conditions and a 30s master timeout.
    pub fn new(alias: AliasName) -> Self {
        Self {
            alias,
            new_index: None,
            dry_run: false,
            master_timeout: Duration::from_secs(30),
            conditions: Vec::new(),
        }
    }

    /// Set the dry-run flag.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the master node timeout.
    #[must_use]
    pub fn master_node_timeout(mut self, timeout: Duration) -> Self {
        self.master_timeout = timeout;
        self
    }

    /// Add or replace a condition of the same kind.
    #[must_use]
    pub fn add_condition(mut self, condition: Condition) -> Self {
        match self
            .conditions
            .iter_mut()
            .find(|existing| existing.name() == condition.name())
        {
            Some(existing) => *existing = condition,
            None => self.conditions.push(condition),
        }
        self
    }

    /// Add a `max_age` condition.
    #[must_use]
    pub fn add_max_index_age_condition(self, age: TimeValue) -> Self {
        self.add_condition(Condition::MaxAge(age))
    }

    /// Add a `max_size` condition.
    #[must_use]
    pub fn add_max_index_size_condition(self, size: ByteSize) -> Self {
        self.add_condition(Condition::MaxSize(size))
    }

    /// Add a `max_docs` condition.
    #[must_use]
    pub fn add_max_index_docs_condition(self, docs: u64) -> Self {
        self.add_condition(Condition::MaxDocs(docs))
    }
}

/// Coordinator's answer to a [`RolloverRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverResponse {
    /// Index the alias pointed to.
    pub old_index: String,
    /// Index the alias would point to (or now points to).
    pub new_index: String,
    /// Per-condition result keyed by the condition's display form.
    #[serde(default)]
    pub condition_status: BTreeMap<String, bool>,
    /// Echo of the request's dry-run flag.
    #[serde(default)]
    pub dry_run: bool,
    /// Whether the rollover was performed.
    #[serde(default)]
    pub rolled_over: bool,
}

impl RolloverResponse {
    /// Returns `true` if at least one condition was met; `false` for an empty map.
    pub fn any_condition_met(&self) -> bool {
        self.condition_status.values().any(|met| *met)
    }
}

/// Storage coordinator that executes rollover requests.
///
/// Implementations own transport, authentication and retries of the
/// underlying protocol. Each call must resolve exactly once, with either a
/// response or an error.
#[async_trait]
pub trait IndicesClient: Send + Sync {
    /// Execute a rollover request.
    async fn rollover(&self, request: RolloverRequest) -> Result<RolloverResponse, ClientError>;
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
