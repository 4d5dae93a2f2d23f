//! Synchronous classification of an index snapshot.

use ilm_core::{AliasName, LIFECYCLE_INDEXING_COMPLETE, LIFECYCLE_ROLLOVER_ALIAS};

use crate::client::ClientError;
use crate::error::StepError;
use crate::metadata::IndexMetadata;
use crate::reporter::{ConditionStatus, EmptyInfo};

/// Classification of one evaluation.
///
/// Every variant except [`PendingDryRun`](Self::PendingDryRun) is terminal.
/// The step resolves a pending outcome into
/// [`DryRunSatisfied`](Self::DryRunSatisfied) or
/// [`OperationError`](Self::OperationError) before reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationOutcome {
    /// The index was already rolled over through its alias.
    AlreadyRotated,
    /// Indexing is complete and the index no longer takes writes.
    IndexingComplete,
    /// Lifecycle settings or aliases are missing or inconsistent.
    ConfigurationError(String),
    /// The index is bound to the alias but is not its write index.
    WriteBindingError(String),
    /// Indexing is complete yet the index is still the explicit write index.
    IndexingCompleteConflict(String),
    /// A dry-run rollover of `alias` must be asked for.
    PendingDryRun {
        /// Alias to dry-run.
        alias: AliasName,
    },
    /// Dry run answered; `true` if any condition was met.
    DryRunSatisfied(bool),
    /// Dry run failed.
    OperationError(ClientError),
}

impl EvaluationOutcome {
    /// Returns `false` only for [`PendingDryRun`](Self::PendingDryRun).
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::PendingDryRun { .. })
    }

    /// Convert a terminal outcome into what the reporter receives.
    ///
    /// A pending outcome becomes [`StepError::DryRunPending`].
    pub fn into_step_outcome(self) -> Result<ConditionStatus, StepError> {
        match self {
            Self::AlreadyRotated | Self::IndexingComplete => Ok(ConditionStatus::ready(true)),
            Self::DryRunSatisfied(met) => Ok(ConditionStatus::new(met, EmptyInfo {})),
            Self::ConfigurationError(reason) => Err(StepError::Configuration(reason)),
            Self::WriteBindingError(reason) => Err(StepError::WriteBinding(reason)),
            Self::IndexingCompleteConflict(reason) => Err(StepError::IndexingCompleteConflict(reason)),
            Self::OperationError(cause) => Err(StepError::Operation(cause)),
            Self::PendingDryRun { alias } => Err(StepError::DryRunPending {
                alias: alias.into(),
            }),
        }
    }
}

/// Decides whether an index can be rolled over without asking the coordinator.
///
/// Checks run in a fixed order and the first match wins:
///
/// 1. rollover alias setting present and non-empty
/// 2. no rollover recorded for that alias yet
/// 3. `indexing_complete` set: conflict if still the explicit write index,
///    otherwise done
/// 4. alias points to this index
/// 5. this index is (explicitly or implicitly) the write index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Create an evaluator.
    pub const fn new() -> Self {
        Self
    }

    /// Classify `metadata`.
    pub fn evaluate(&self, metadata: &IndexMetadata) -> EvaluationOutcome {
        let index = metadata.index();

        let Some(alias) = metadata.settings().rollover_alias() else {
            return EvaluationOutcome::ConfigurationError(format!(
                "setting [{LIFECYCLE_ROLLOVER_ALIAS}] for index [{index}] is empty or not defined"
            ));
        };

        if metadata.was_rolled_over(alias) {
            return EvaluationOutcome::AlreadyRotated;
        }

        let binding = metadata.alias_binding(alias);

        let indexing_complete = match metadata.settings().indexing_complete() {
            Ok(complete) => complete,
            Err(err) => return EvaluationOutcome::ConfigurationError(err.to_string()),
        };
        if indexing_complete {
            if binding.is_explicit_write_target() {
                return EvaluationOutcome::IndexingCompleteConflict(format!(
                    "index [{index}] has [{LIFECYCLE_INDEXING_COMPLETE}] set to [true], \
                     but is still the write index for alias [{alias}]"
                ));
            }
            return EvaluationOutcome::IndexingComplete;
        }

        let Some((alias, _)) = metadata.aliases().get_key_value(alias) else {
            return EvaluationOutcome::ConfigurationError(format!(
                "{LIFECYCLE_ROLLOVER_ALIAS} [{alias}] does not point to index [{index}]"
            ));
        };

        match binding.write_binding() {
            Some(write) if write.accepts_writes() => EvaluationOutcome::PendingDryRun {
                alias: alias.clone(),
            },
            _ => EvaluationOutcome::WriteBindingError(format!(
                "index [{index}] is not the write index for alias [{alias}]"
            )),
        }
    }
}
