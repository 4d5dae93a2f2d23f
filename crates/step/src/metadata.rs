//! Read-only index snapshot handed to a step on every evaluation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use ilm_core::{AliasName, IndexName, LIFECYCLE_INDEXING_COMPLETE, LIFECYCLE_ROLLOVER_ALIAS, Settings};
use serde::{Deserialize, Serialize};

use crate::thresholds::Condition;

/// Snapshot of one index: settings, alias bindings and rollover history.
///
/// Owned by the cluster-state layer; steps only ever borrow it and never
/// keep it past a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    index: IndexName,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    aliases: BTreeMap<AliasName, AliasMetadata>,
    #[serde(default)]
    rollover_info: BTreeMap<AliasName, RolloverInfo>,
}

impl IndexMetadata {
    /// Start building a snapshot for `index`.
    pub fn builder(index: IndexName) -> IndexMetadataBuilder {
        IndexMetadataBuilder {
            metadata: Self {
                index,
                settings: Settings::new(),
                aliases: BTreeMap::new(),
                rollover_info: BTreeMap::new(),
            },
        }
    }

    /// Name of the index.
    pub fn index(&self) -> &IndexName {
        &self.index
    }

    /// Index settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Aliases bound to this index.
    pub fn aliases(&self) -> &BTreeMap<AliasName, AliasMetadata> {
        &self.aliases
    }

    /// Completed rollovers, keyed by the alias that was rolled over.
    pub fn rollover_info(&self) -> &BTreeMap<AliasName, RolloverInfo> {
        &self.rollover_info
    }

    /// Binding of `alias` to this index.
    pub fn alias_binding(&self, alias: &str) -> AliasBinding {
        match self.aliases.get(alias) {
            Some(meta) => AliasBinding::Bound(meta.write_binding()),
            None => AliasBinding::NotBound,
        }
    }

    /// Returns `true` if this index was already rolled over through `alias`.
    pub fn was_rolled_over(&self, alias: &str) -> bool {
        self.rollover_info.contains_key(alias)
    }
}

/// Builder for [`IndexMetadata`].
#[derive(Debug, Clone)]
pub struct IndexMetadataBuilder {
    metadata: IndexMetadata,
}

impl IndexMetadataBuilder {
    /// Replace all settings.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.metadata.settings = settings;
        self
    }

    /// Set one setting.
    pub fn setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.settings.insert(key, value);
        self
    }

    /// Set `index.lifecycle.rollover_alias`.
    pub fn rollover_alias(self, alias: impl Into<String>) -> Self {
        self.setting(LIFECYCLE_ROLLOVER_ALIAS, alias)
    }

    /// Set `index.lifecycle.indexing_complete`.
    pub fn indexing_complete(self, complete: bool) -> Self {
        self.setting(LIFECYCLE_INDEXING_COMPLETE, complete.to_string())
    }

    /// Bind an alias to the index.
    pub fn alias(mut self, name: AliasName, alias: AliasMetadata) -> Self {
        self.metadata.aliases.insert(name, alias);
        self
    }

    /// Record a completed rollover.
    pub fn rollover_info(mut self, info: RolloverInfo) -> Self {
        self.metadata.rollover_info.insert(info.alias.clone(), info);
        self
    }

    /// Finish the snapshot.
    pub fn build(self) -> IndexMetadata {
        self.metadata
    }
}

/// Per-index view of an alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMetadata {
    /// Explicit write-index flag; `None` for a classic single-index alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_write_index: Option<bool>,
}

impl AliasMetadata {
    /// Classic alias without a write-index flag.
    pub const fn implicit() -> Self {
        Self {
            is_write_index: None,
        }
    }

    /// Alias with an explicit write-index flag.
    pub const fn write_index(is_write_index: bool) -> Self {
        Self {
            is_write_index: Some(is_write_index),
        }
    }

    /// Interpret the tri-state flag.
    pub const fn write_binding(&self) -> WriteBinding {
        match self.is_write_index {
            Some(true) => WriteBinding::WriteTarget,
            Some(false) => WriteBinding::NotWriteTarget,
            None => WriteBinding::ImplicitSingleBinding,
        }
    }
}

/// Write designation of an index within an alias.
///
/// `ImplicitSingleBinding` is what a classic alias pointing at exactly one
/// index reports: no explicit flag, but that index receives the writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteBinding {
    /// Explicitly the write index (`is_write_index: true`).
    WriteTarget,
    /// Explicitly not the write index (`is_write_index: false`).
    NotWriteTarget,
    /// No flag; sole member of the alias and write target by default.
    ImplicitSingleBinding,
}

impl WriteBinding {
    /// Returns `true` unless another index is the write target.
    pub const fn accepts_writes(self) -> bool {
        !matches!(self, Self::NotWriteTarget)
    }
}

/// Relationship between an alias and the index under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasBinding {
    /// The alias does not point to this index.
    NotBound,
    /// The alias points to this index with the given write designation.
    Bound(WriteBinding),
}

impl AliasBinding {
    /// Returns `true` if the alias points to this index.
    pub const fn points_to_this_index(self) -> bool {
        matches!(self, Self::Bound(_))
    }

    /// Write designation, if the alias points to this index.
    pub const fn write_binding(self) -> Option<WriteBinding> {
        match self {
            Self::Bound(binding) => Some(binding),
            Self::NotBound => None,
        }
    }

    /// Returns `true` only for an explicit `is_write_index: true` binding.
    pub const fn is_explicit_write_target(self) -> bool {
        matches!(self, Self::Bound(WriteBinding::WriteTarget))
    }
}

/// Record of a completed rollover of this index through an alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverInfo {
    /// Alias that was rolled over.
    pub alias: AliasName,
    /// Conditions that were met when the rollover happened.
    #[serde(default)]
    pub met_conditions: Vec<Condition>,
    /// When the rollover happened.
    pub time: DateTime<Utc>,
}

impl RolloverInfo {
    /// Create a rollover record.
    pub fn new(alias: AliasName, met_conditions: Vec<Condition>, time: DateTime<Utc>) -> Self {
        Self {
            alias,
            met_conditions,
            time,
        }
    }
}
